//! HTTP transport for chat-completion calls.

use super::request::ChatRequest;
use super::response::parse_completion;
use crate::retry::CallError;
use std::fmt;
use std::time::Duration;

/// One attempt at a chat completion. Implementations must not retry
/// internally; the executor owns the retry loop.
pub trait ChatTransport {
    /// Send `request` and return the generated text.
    fn complete(&self, request: &ChatRequest) -> Result<String, CallError>;
}

impl<T: ChatTransport + ?Sized> ChatTransport for &T {
    fn complete(&self, request: &ChatRequest) -> Result<String, CallError> {
        (**self).complete(request)
    }
}

/// Blocking libcurl transport with bearer authentication.
pub struct CurlTransport {
    endpoint: String,
    api_key: String,
    timeout: Duration,
}

impl fmt::Debug for CurlTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurlTransport")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl CurlTransport {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout,
        }
    }
}

impl ChatTransport for CurlTransport {
    fn complete(&self, request: &ChatRequest) -> Result<String, CallError> {
        let payload = serde_json::to_vec(request)
            .map_err(|e| CallError::Malformed(format!("cannot encode request: {}", e)))?;
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(&self.endpoint).map_err(CallError::Setup)?;
        easy.post(true).map_err(CallError::Setup)?;
        easy.post_fields_copy(&payload).map_err(CallError::Setup)?;
        easy.connect_timeout(Duration::from_secs(15).min(self.timeout))
            .map_err(CallError::Setup)?;
        easy.timeout(self.timeout).map_err(CallError::Setup)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("Authorization: Bearer {}", self.api_key))
            .map_err(CallError::Setup)?;
        list.append("Content-Type: application/json")
            .map_err(CallError::Setup)?;
        easy.http_headers(list).map_err(CallError::Setup)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            model = %request.model,
            bytes = payload.len(),
            "POST chat completion"
        );

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(CallError::Setup)?;
            transfer.perform().map_err(CallError::Transport)?;
        }

        let code = easy.response_code().map_err(CallError::Transport)?;
        if !(200..300).contains(&code) {
            return Err(CallError::Http {
                status: code,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        parse_completion(&body)
    }
}
