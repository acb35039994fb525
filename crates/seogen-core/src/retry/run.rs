//! Retry loop: run a call until success, a fatal error, or the budget is spent.

use super::classify;
use super::error::{CallError, TerminalFailure};
use super::policy::{ErrorKind, RetryDecision, RetryPolicy};
use super::waiter::Waiter;
use std::time::Duration;

/// A successful call plus the number of attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Success<T> {
    pub value: T,
    pub attempts: u32,
}

/// One failed attempt that is about to be retried.
#[derive(Debug)]
pub struct RetryAttempt<'a> {
    /// Retry number (1 = first retry after the initial call).
    pub retry: u32,
    pub max_retries: u32,
    pub kind: ErrorKind,
    pub delay: Duration,
    pub error: &'a CallError,
}

/// Runs `call` until it succeeds or the retry policy says to stop.
///
/// `call` receives the 1-based attempt number. On retryable failure the
/// waiter is asked to block for the backoff delay before the next attempt;
/// `on_retry` sees every scheduled retry before the wait starts.
pub fn run_with_retry<T, F, W, R>(
    policy: &RetryPolicy,
    waiter: &W,
    mut on_retry: R,
    mut call: F,
) -> Result<Success<T>, TerminalFailure>
where
    F: FnMut(u32) -> Result<T, CallError>,
    W: Waiter + ?Sized,
    R: FnMut(&RetryAttempt<'_>),
{
    let mut retries = 0u32;
    loop {
        let attempt = retries + 1;
        let err = match call(attempt) {
            Ok(value) => {
                return Ok(Success {
                    value,
                    attempts: attempt,
                })
            }
            Err(e) => e,
        };
        let kind = classify::classify(&err);
        match policy.decide(retries, kind) {
            RetryDecision::NoRetry | RetryDecision::Exhausted => {
                return Err(TerminalFailure::from_kind(kind, attempt, err));
            }
            RetryDecision::RetryAfter(delay) => {
                retries += 1;
                tracing::warn!(
                    attempt = retries,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    reason = kind.reason(),
                    error = %err,
                    "call failed, retrying"
                );
                on_retry(&RetryAttempt {
                    retry: retries,
                    max_retries: policy.max_retries,
                    kind,
                    delay,
                    error: &err,
                });
                waiter.wait(delay);
            }
        }
    }
}
