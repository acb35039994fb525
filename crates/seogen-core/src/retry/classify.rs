//! Classify HTTP status and curl errors into retry policy error kinds.

use super::error::CallError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 => ErrorKind::RateLimited,
        500 | 502 | 503 | 504 => ErrorKind::ServerError(code as u16),
        _ => ErrorKind::Fatal,
    }
}

/// Classify a curl error raised while performing a transfer.
///
/// Every transport failure is retryable; timeouts are reported separately
/// so the diagnostics say which one happened.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        ErrorKind::Timeout
    } else {
        ErrorKind::Network
    }
}

/// Classify a call error into an ErrorKind.
pub fn classify(e: &CallError) -> ErrorKind {
    match e {
        CallError::Transport(ce) => classify_curl_error(ce),
        CallError::Http { status, .. } => classify_http_status(*status),
        CallError::Setup(_) | CallError::Malformed(_) => ErrorKind::Fatal,
    }
}
