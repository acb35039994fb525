//! Chat-completion client: request/response wire types and the transport seam.
//!
//! The core only relies on the chat shape (`model`, `messages`, `max_tokens`,
//! `temperature`, `n` in; `choices[0].message.content` out), not on any
//! vendor's wider API.

mod request;
mod response;
mod transport;

pub use request::{ChatMessage, ChatRequest, Role};
pub use response::parse_completion;
pub use transport::{ChatTransport, CurlTransport};
