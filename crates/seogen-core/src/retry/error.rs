//! Per-attempt and terminal error types for chat-completion calls.

use super::policy::ErrorKind;
use std::fmt;

/// Error returned by a single call attempt (curl failure, HTTP error, or bad body).
/// Kept separate from anyhow so the executor can classify it before giving up.
#[derive(Debug)]
pub enum CallError {
    /// Building the request failed (bad URL, header list). Never retried.
    Setup(curl::Error),
    /// Curl failed while performing the transfer (timeout, connection, etc.).
    Transport(curl::Error),
    /// Server answered with a non-2xx status.
    Http { status: u32, body: String },
    /// 2xx response whose body is not a usable completion.
    Malformed(String),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Setup(e) => write!(f, "request setup: {}", e),
            CallError::Transport(e) => write!(f, "{}", e),
            CallError::Http { status, body } => {
                write!(f, "HTTP {}", status)?;
                let snippet = body.trim();
                if !snippet.is_empty() {
                    let cut: String = snippet.chars().take(200).collect();
                    write!(f, ": {}", cut)?;
                }
                Ok(())
            }
            CallError::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallError::Setup(e) | CallError::Transport(e) => Some(e),
            CallError::Http { .. } | CallError::Malformed(_) => None,
        }
    }
}

/// Outcome of an executor run that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum TerminalFailure {
    /// Non-retryable error on the given attempt.
    #[error("fatal error on attempt {attempts}: {source}")]
    Fatal {
        attempts: u32,
        #[source]
        source: CallError,
    },
    /// Every attempt failed with a retryable error.
    #[error("retries exhausted after {attempts} attempts ({reason}): {source}")]
    Exhausted {
        attempts: u32,
        reason: &'static str,
        #[source]
        source: CallError,
    },
}

impl TerminalFailure {
    /// Total attempts made, initial call included.
    pub fn attempts(&self) -> u32 {
        match self {
            TerminalFailure::Fatal { attempts, .. } | TerminalFailure::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn last_error(&self) -> &CallError {
        match self {
            TerminalFailure::Fatal { source, .. } | TerminalFailure::Exhausted { source, .. } => {
                source
            }
        }
    }

    pub(crate) fn from_kind(kind: ErrorKind, attempts: u32, source: CallError) -> Self {
        if kind.is_retryable() {
            TerminalFailure::Exhausted {
                attempts,
                reason: kind.reason(),
                source,
            }
        } else {
            TerminalFailure::Fatal { attempts, source }
        }
    }
}
