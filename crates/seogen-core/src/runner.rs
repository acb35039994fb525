//! Sequential task runner: one retried chat call per task, failures isolated
//! per task, successful posts written and collected in order.

use crate::checksum;
use crate::llm::ChatTransport;
use crate::prompt::Task;
use crate::retry::{run_with_retry, RetryPolicy, Success, TerminalFailure, Waiter};
use crate::storage::{Artifact, ArtifactError, ArtifactWriter};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Progress notifications for a front end. Sending is best effort.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    TaskStarted {
        index: usize,
        total: usize,
        topic: String,
    },
    Retrying {
        topic: String,
        retry: u32,
        max_retries: u32,
        delay: Duration,
        reason: &'static str,
        error: String,
    },
    Written {
        topic: String,
        path: PathBuf,
        attempts: u32,
    },
    Failed {
        topic: String,
        error: String,
    },
}

/// Why a task produced no artifact.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error(transparent)]
    Call(#[from] TerminalFailure),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

#[derive(Debug)]
pub struct WrittenTask {
    pub topic: String,
    pub artifact: Artifact,
    pub attempts: u32,
    /// SHA-256 of the file as written; `None` if it could not be read back.
    pub sha256: Option<String>,
}

#[derive(Debug)]
pub struct FailedTask {
    pub topic: String,
    pub error: TaskError,
}

#[derive(Debug)]
pub enum TaskOutcome {
    Written(WrittenTask),
    Failed(FailedTask),
}

/// Per-task outcomes of one run, in task order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub fn written(&self) -> impl Iterator<Item = &WrittenTask> {
        self.outcomes.iter().filter_map(|o| match o {
            TaskOutcome::Written(w) => Some(w),
            TaskOutcome::Failed(_) => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = &FailedTask> {
        self.outcomes.iter().filter_map(|o| match o {
            TaskOutcome::Failed(f) => Some(f),
            TaskOutcome::Written(_) => None,
        })
    }

    /// Filenames of written artifacts, in task order.
    pub fn artifact_names(&self) -> Vec<&str> {
        self.written().map(|w| w.artifact.filename.as_str()).collect()
    }
}

/// Runs tasks one at a time against a [`ChatTransport`].
pub struct TaskRunner<'a, T: ?Sized, W: ?Sized> {
    transport: &'a T,
    writer: &'a ArtifactWriter,
    waiter: &'a W,
    policy: RetryPolicy,
    pause: Duration,
    progress: Option<Sender<RunEvent>>,
}

impl<'a, T, W> TaskRunner<'a, T, W>
where
    T: ChatTransport + ?Sized,
    W: Waiter + ?Sized,
{
    pub fn new(transport: &'a T, writer: &'a ArtifactWriter, waiter: &'a W) -> Self {
        Self {
            transport,
            writer,
            waiter,
            policy: RetryPolicy::default(),
            pause: Duration::from_secs(2),
            progress: None,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pause inserted between consecutive tasks.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_progress(mut self, tx: Sender<RunEvent>) -> Self {
        self.progress = Some(tx);
        self
    }

    fn emit(&self, event: RunEvent) {
        if let Some(tx) = &self.progress {
            let _ = tx.send(event);
        }
    }

    /// Attempt every task in order. A failed task never stops the ones after it.
    pub fn run(&self, tasks: &[Task]) -> RunReport {
        let mut report = RunReport {
            outcomes: Vec::with_capacity(tasks.len()),
        };
        let total = tasks.len();

        for (i, task) in tasks.iter().enumerate() {
            self.emit(RunEvent::TaskStarted {
                index: i + 1,
                total,
                topic: task.topic().to_string(),
            });
            tracing::info!(topic = task.topic(), index = i + 1, total, "generating");

            let outcome = self.run_one(task);
            match &outcome {
                TaskOutcome::Written(w) => {
                    tracing::info!(
                        topic = %w.topic,
                        path = %w.artifact.path.display(),
                        attempts = w.attempts,
                        "wrote artifact"
                    );
                    self.emit(RunEvent::Written {
                        topic: w.topic.clone(),
                        path: w.artifact.path.clone(),
                        attempts: w.attempts,
                    });
                }
                TaskOutcome::Failed(f) => {
                    tracing::error!(topic = %f.topic, error = %f.error, "task failed, skipping");
                    self.emit(RunEvent::Failed {
                        topic: f.topic.clone(),
                        error: f.error.to_string(),
                    });
                }
            }
            report.outcomes.push(outcome);

            if i + 1 < total && !self.pause.is_zero() {
                self.waiter.wait(self.pause);
            }
        }

        tracing::info!(
            written = report.written().count(),
            failed = report.failed().count(),
            "run finished"
        );
        report
    }

    fn run_one(&self, task: &Task) -> TaskOutcome {
        let topic = task.topic();
        let called = run_with_retry(
            &self.policy,
            self.waiter,
            |r| {
                self.emit(RunEvent::Retrying {
                    topic: topic.to_string(),
                    retry: r.retry,
                    max_retries: r.max_retries,
                    delay: r.delay,
                    reason: r.kind.reason(),
                    error: r.error.to_string(),
                })
            },
            |attempt| {
                tracing::debug!(topic, attempt, "calling chat completion");
                self.transport.complete(task.request())
            },
        );

        let result = called
            .map_err(TaskError::from)
            .and_then(|Success { value, attempts }| {
                let artifact = self.writer.write(topic, &value)?;
                Ok((artifact, attempts))
            });

        match result {
            Ok((artifact, attempts)) => {
                let sha256 = match checksum::sha256_path(&artifact.path) {
                    Ok(d) => Some(d),
                    Err(e) => {
                        tracing::warn!(path = %artifact.path.display(), error = %e, "checksum failed");
                        None
                    }
                };
                TaskOutcome::Written(WrittenTask {
                    topic: topic.to_string(),
                    artifact,
                    attempts,
                    sha256,
                })
            }
            Err(error) => TaskOutcome::Failed(FailedTask {
                topic: topic.to_string(),
                error,
            }),
        }
    }
}
