//! `seogen topics` – show what a run would generate.

use anyhow::Result;
use seogen_core::config::SeogenConfig;
use seogen_core::prompt::select_topics;
use seogen_core::slug::derive_filename;

pub fn run_topics(cfg: &SeogenConfig) -> Result<()> {
    let topics = select_topics(&[], cfg.topics.as_deref());
    println!("{:<50} {}", "FILE", "TOPIC");
    for t in topics {
        let file = derive_filename(&t).unwrap_or_else(|| "-".to_string());
        println!("{:<50} {}", file, t);
    }
    Ok(())
}
