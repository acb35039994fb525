//! CLI for seogen.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seogen_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_generate, run_sitemap_preview, run_topics, GenerateOverrides};

/// Top-level CLI for seogen.
#[derive(Debug, Parser)]
#[command(name = "seogen")]
#[command(about = "seogen: generate SEO blog posts and a sitemap via a chat-completion API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Generate one post per topic, then write the sitemap. Needs OPENAI_API_KEY.
    Generate {
        /// Topic to generate (repeatable). Overrides the config file and built-in topics.
        #[arg(long = "topic", value_name = "TOPIC")]
        topics: Vec<String>,
        /// Directory for generated posts.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Path of the sitemap to write.
        #[arg(long, value_name = "PATH")]
        sitemap: Option<PathBuf>,
        /// Retries per topic after the first attempt.
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,
        /// Pause between topics, in seconds.
        #[arg(long, value_name = "SECS")]
        pause_secs: Option<f64>,
    },

    /// List the topics a run would use and their output filenames.
    Topics,

    /// Print the sitemap for the given post filenames without calling the API.
    SitemapPreview {
        /// Post filename (repeatable), e.g. `my-post.html`.
        #[arg(long = "name", value_name = "FILE")]
        names: Vec<String>,
        /// Site root; defaults to SITE_BASE_URL or the built-in default.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },

    /// Compute SHA-256 of a generated post.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Generate {
                topics,
                out_dir,
                sitemap,
                max_retries,
                pause_secs,
            } => {
                let overrides = GenerateOverrides {
                    topics,
                    out_dir,
                    sitemap,
                    max_retries,
                    pause_secs,
                };
                run_generate(cfg, overrides)?;
            }
            CliCommand::Topics => run_topics(&cfg)?,
            CliCommand::SitemapPreview { names, base_url } => {
                run_sitemap_preview(&names, base_url.as_deref())?
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
