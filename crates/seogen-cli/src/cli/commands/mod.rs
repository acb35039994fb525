//! CLI command handlers, one per file.

mod checksum;
mod generate;
mod sitemap_preview;
mod topics;

pub use checksum::run_checksum;
pub use generate::{run_generate, GenerateOverrides};
pub use sitemap_preview::run_sitemap_preview;
pub use topics::run_topics;
