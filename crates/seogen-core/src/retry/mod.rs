//! Retry and backoff policy.
//!
//! This module encapsulates error classification (rate limiting, server
//! errors, network failures) and exponential backoff decisions so the task
//! runner can wrap every chat-completion call in the same policy.

mod classify;
mod error;
mod policy;
mod run;
mod waiter;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::{CallError, TerminalFailure};
pub use policy::{BackoffPolicy, ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryAttempt, Success};
pub use waiter::{RecordingWaiter, ThreadWaiter, Waiter};
