//! `seogen generate` – run every topic and write the sitemap.

use anyhow::{bail, Result};
use seogen_core::config::{RetryConfig, SeogenConfig, Settings};
use seogen_core::llm::CurlTransport;
use seogen_core::pipeline;
use seogen_core::prompt::{build_tasks, select_topics};
use seogen_core::retry::ThreadWaiter;
use seogen_core::runner::RunEvent;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Command-line values that override the config file.
#[derive(Debug, Default)]
pub struct GenerateOverrides {
    pub topics: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub sitemap: Option<PathBuf>,
    pub max_retries: Option<u32>,
    pub pause_secs: Option<f64>,
}

impl GenerateOverrides {
    pub(crate) fn apply(&self, cfg: &mut SeogenConfig) {
        if let Some(dir) = &self.out_dir {
            cfg.output_dir = dir.clone();
        }
        if let Some(path) = &self.sitemap {
            cfg.sitemap_path = path.clone();
        }
        if let Some(n) = self.max_retries {
            cfg.retry.get_or_insert_with(RetryConfig::default).max_retries = n;
        }
        if let Some(secs) = self.pause_secs {
            cfg.pause_secs = secs;
        }
    }
}

pub fn run_generate(mut cfg: SeogenConfig, overrides: GenerateOverrides) -> Result<()> {
    overrides.apply(&mut cfg);
    // Credential check happens before any task runs.
    let settings = Settings::from_env(cfg)?;
    tracing::debug!("settings: {:?}", settings);

    let topics = select_topics(&overrides.topics, settings.config.topics.as_deref());
    let tasks = build_tasks(&topics, &settings.company_name, &settings.config.generation);
    if tasks.is_empty() {
        bail!("no topics to generate");
    }

    let generation = &settings.config.generation;
    let transport = CurlTransport::new(
        generation.endpoint.clone(),
        settings.api_key.clone(),
        Duration::from_secs(generation.request_timeout_secs),
    );

    let (progress_tx, progress_rx) = mpsc::channel::<RunEvent>();
    let printer = thread::spawn(move || {
        for event in progress_rx {
            print_event(&event);
        }
    });

    let result = pipeline::generate(&settings, &tasks, &transport, &ThreadWaiter, Some(progress_tx));
    let _ = printer.join();
    let out = result?;

    println!("Wrote {}", out.sitemap_path.display());
    let written = out.report.written().count();
    let failed: Vec<_> = out.report.failed().collect();
    println!("{} written, {} failed", written, failed.len());
    for f in failed {
        println!("  failed: {} ({})", f.topic, f.error);
    }
    tracing::info!(written, failed = out.report.failed().count(), "generate completed");
    Ok(())
}

fn print_event(event: &RunEvent) {
    match event {
        RunEvent::TaskStarted {
            index,
            total,
            topic,
        } => println!("[{}/{}] Generating: {}", index, total, topic),
        RunEvent::Retrying {
            retry,
            max_retries,
            delay,
            reason,
            error,
            ..
        } => println!(
            "  {} ({}). Retry {}/{} after {:.1}s",
            reason,
            error,
            retry,
            max_retries,
            delay.as_secs_f64()
        ),
        RunEvent::Written { path, attempts, .. } => {
            println!("  Wrote: {} (attempts: {})", path.display(), attempts)
        }
        RunEvent::Failed { error, .. } => println!("  Failed (final): {}", error),
    }
}
