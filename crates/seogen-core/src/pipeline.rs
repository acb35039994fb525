//! A full generation run: tasks, then the sitemap of what was written.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

use crate::config::Settings;
use crate::llm::ChatTransport;
use crate::prompt::Task;
use crate::retry::Waiter;
use crate::runner::{RunEvent, RunReport, TaskRunner};
use crate::sitemap;
use crate::storage::ArtifactWriter;

/// Result of [`generate`].
#[derive(Debug)]
pub struct Generation {
    pub report: RunReport,
    pub sitemap_path: PathBuf,
}

/// Run every task, then write a sitemap listing exactly the artifacts written
/// by this run. Only the sitemap write can fail the whole run.
pub fn generate<T, W>(
    settings: &Settings,
    tasks: &[Task],
    transport: &T,
    waiter: &W,
    progress: Option<Sender<RunEvent>>,
) -> Result<Generation>
where
    T: ChatTransport + ?Sized,
    W: Waiter + ?Sized,
{
    let cfg = &settings.config;
    let writer = ArtifactWriter::new(&cfg.output_dir);

    let mut runner = TaskRunner::new(transport, &writer, waiter)
        .with_policy(cfg.retry_policy())
        .with_pause(cfg.pause());
    if let Some(tx) = progress {
        runner = runner.with_progress(tx);
    }
    let report = runner.run(tasks);

    let xml = sitemap::build_sitemap(
        &settings.site_base_url,
        &report.artifact_names(),
        sitemap::today_utc(),
    );
    sitemap::write_sitemap(&cfg.sitemap_path, &xml)?;
    tracing::info!(path = %cfg.sitemap_path.display(), "wrote sitemap");

    Ok(Generation {
        report,
        sitemap_path: cfg.sitemap_path.clone(),
    })
}
