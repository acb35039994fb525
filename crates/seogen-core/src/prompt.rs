//! Generation tasks and the prompts sent for each topic.

use crate::config::GenerationConfig;
use crate::llm::{ChatMessage, ChatRequest};
use crate::slug::derive_filename;
use std::collections::HashSet;

/// Topics used when neither the command line nor the config file lists any.
pub const DEFAULT_TOPICS: &[&str] = &[
    "How to choose the best WiFi hotspot solution for hotels",
    "Firewall vs UTM: what small hotels need to know",
    "Top 5 tips to improve hotel WiFi speeds",
];

/// One unit of generation work. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    topic: String,
    request: ChatRequest,
}

impl Task {
    pub fn new(topic: impl Into<String>, request: ChatRequest) -> Self {
        Self {
            topic: topic.into(),
            request,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

pub fn system_prompt(company: &str) -> String {
    format!(
        "You are an SEO copywriter for a WiFi / hospitality services company ({}). \
         Produce clean HTML output.",
        company
    )
}

pub fn user_prompt(topic: &str) -> String {
    format!(
        "Write a 700-900 word SEO blog in HTML about: {topic}.\n\
         Include:\n\
         - <title> (<=60 chars)\n\
         - <meta name=\"description\"> (<=155 chars)\n\
         - H1 and H2s\n\
         - Two short FAQs (schema-friendly)\n\
         - Suggested internal link targets (use example paths)\n\
         Output only an HTML snippet.\n"
    )
}

/// Chat request for one topic.
pub fn build_request(topic: &str, company: &str, cfg: &GenerationConfig) -> ChatRequest {
    ChatRequest {
        model: cfg.model.clone(),
        messages: vec![
            ChatMessage::system(system_prompt(company)),
            ChatMessage::user(user_prompt(topic)),
        ],
        max_tokens: cfg.max_tokens,
        temperature: cfg.temperature,
        n: 1,
    }
}

/// Topics for a run: command-line topics win, then the config file list,
/// then [`DEFAULT_TOPICS`].
pub fn select_topics(cli_topics: &[String], config_topics: Option<&[String]>) -> Vec<String> {
    if !cli_topics.is_empty() {
        return cli_topics.to_vec();
    }
    match config_topics {
        Some(t) if !t.is_empty() => t.to_vec(),
        _ => DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
    }
}

/// Builds tasks in order, dropping blank topics and topics whose filename
/// collides with an earlier one.
pub fn build_tasks<S: AsRef<str>>(topics: &[S], company: &str, cfg: &GenerationConfig) -> Vec<Task> {
    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(topics.len());
    for topic in topics {
        let topic = topic.as_ref().trim();
        if topic.is_empty() {
            continue;
        }
        if let Some(name) = derive_filename(topic) {
            if !seen.insert(name.clone()) {
                tracing::warn!(topic, filename = %name, "duplicate topic skipped");
                continue;
            }
        }
        tasks.push(Task::new(topic, build_request(topic, company, cfg)));
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn request_carries_config_and_prompts() {
        let cfg = GenerationConfig::default();
        let req = build_request("Hotel WiFi", "Acme", &cfg);
        assert_eq!(req.model, "gpt-4o-mini");
        assert_eq!(req.max_tokens, 1200);
        assert_eq!(req.n, 1);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, Role::System);
        assert!(req.messages[0].content.contains("Acme"));
        assert_eq!(req.messages[1].role, Role::User);
        let user = &req.messages[1].content;
        assert!(user.contains("about: Hotel WiFi."));
        assert!(user.contains("<=60 chars"));
        assert!(user.contains("<=155 chars"));
        assert!(user.contains("Two short FAQs"));
        assert!(user.contains("Output only an HTML snippet."));
    }

    #[test]
    fn tasks_keep_order_and_drop_duplicates() {
        let cfg = GenerationConfig::default();
        let tasks = build_tasks(
            &["Beta topic", "  ", "Alpha topic", "beta   TOPIC!", "???"],
            "Acme",
            &cfg,
        );
        let topics: Vec<&str> = tasks.iter().map(Task::topic).collect();
        // "???" is kept; it fails later as a per-task error.
        assert_eq!(topics, vec!["Beta topic", "Alpha topic", "???"]);
    }

    #[test]
    fn default_topics_are_distinct() {
        let tasks = build_tasks(DEFAULT_TOPICS, "Acme", &GenerationConfig::default());
        assert_eq!(tasks.len(), DEFAULT_TOPICS.len());
    }

    #[test]
    fn topic_precedence() {
        let cli = vec!["From CLI".to_string()];
        let file = vec!["From file".to_string()];
        assert_eq!(select_topics(&cli, Some(file.as_slice())), cli);
        assert_eq!(select_topics(&[], Some(file.as_slice())), file);
        assert_eq!(select_topics(&[], Some(&[][..])).len(), DEFAULT_TOPICS.len());
        assert_eq!(select_topics(&[], None)[2], "Top 5 tips to improve hotel WiFi speeds");
    }
}
