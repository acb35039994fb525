use crate::retry::CallError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Extract `choices[0].message.content` (trimmed) from a completion body.
///
/// Anything that does not yield non-empty text is `CallError::Malformed`.
pub fn parse_completion(body: &[u8]) -> Result<String, CallError> {
    let parsed: ChatResponse = serde_json::from_slice(body)
        .map_err(|e| CallError::Malformed(format!("invalid JSON: {}", e)))?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CallError::Malformed("no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| CallError::Malformed("choice has no content".to_string()))?;
    let content = content.trim();
    if content.is_empty() {
        return Err(CallError::Malformed("empty content".to_string()));
    }
    Ok(content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_choice_content() {
        let body = br#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"  <h1>Hi</h1>\n"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "<h1>Hi</h1>");
    }

    #[test]
    fn rejects_bad_shapes() {
        for body in [
            &b"not json"[..],
            br#"{"choices":[]}"#,
            br#"{}"#,
            br#"{"choices":[{"message":{"content":null}}]}"#,
            br#"{"choices":[{"message":{"content":"   "}}]}"#,
        ] {
            assert!(
                matches!(parse_completion(body), Err(CallError::Malformed(_))),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
