//! Backend HTTP seam: wire types and the calls that use them.

pub mod client;
pub mod types;

pub use client::{ApiError, ChatResponder, HttpResponder, fetch_client_config, load_starter_questions};
pub use types::{ChatMessage, ChatRequest, ClientConfig};
