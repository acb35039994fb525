pub mod config;
pub mod logging;

pub mod checksum;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod retry;
pub mod runner;
pub mod sitemap;
pub mod slug;
pub mod storage;
