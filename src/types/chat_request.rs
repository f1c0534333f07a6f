use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Request body for `POST /chat`.
///
/// The request is stateless: it carries only the latest user message, not
/// the conversation history, plus a freshly minted `rquid`. The `rquid` is
/// an opaque idempotency key; its dedup window is the backend's business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The new message, always a single user entry.
    pub messages: Vec<ChatMessage>,

    /// Fresh random request identifier, never reused across calls.
    pub rquid: String,
}

impl ChatRequest {
    /// Build a request carrying one user message and the given `rquid`.
    pub fn new(message: impl Into<String>, rquid: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(message)],
            rquid: rquid.into(),
        }
    }
}

/// Success body for `POST /chat`: one assistant reply per call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    /// The assistant's reply text.
    pub reply: String,
}
