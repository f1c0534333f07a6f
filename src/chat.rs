//! The chat client and the transcript contract around it.
//!
//! Each send is stateless from the client's perspective: one user message
//! plus a fresh `rquid` goes out, one assistant reply comes back, and
//! prior turns are never retransmitted. [`ChatThread`] is the caller-side
//! transcript: an append-only log that stays coherent through failures by
//! recording a synthetic assistant entry in place of the missing reply.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::client::Portal;
use crate::error::{Error, Result};
use crate::observability;
use crate::session::SessionStore;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

const CHAT_FALLBACK: &str = "Failed to send message";

/// Assistant-role notice appended when a send fails, so the transcript
/// keeps alternating sensibly.
pub const FALLBACK_REPLY: &str = "Something went wrong while contacting the backend.";

/// Client for the chat route, a read-only consumer of the session.
#[derive(Debug, Clone)]
pub struct ChatClient {
    portal: Portal,
    session: Arc<SessionStore>,
}

impl ChatClient {
    /// Create a new chat client over a shared session.
    pub fn new(portal: Portal, session: Arc<SessionStore>) -> Self {
        Self { portal, session }
    }

    /// Send one user message and return the assistant's reply.
    ///
    /// The bearer token is attached only if present; an unauthenticated
    /// send is tolerated and left for the backend to judge. A fresh
    /// `rquid` is minted per call, never reused.
    pub async fn send(&self, message: impl Into<String>) -> Result<ChatResponse> {
        let request = ChatRequest::new(message, Uuid::new_v4().to_string());

        observability::CHAT_SENDS.click();
        let token = self.session.access_token();
        self.portal
            .post_json("chat", &request, token.as_deref(), CHAT_FALLBACK)
            .await
    }
}

/// An append-only conversation log with single-flight sends.
///
/// State machine per submission: idle, sending, back to idle on success
/// or failure. While sending, another submission is rejected with a busy
/// error and the transcript is untouched. Every accepted attempt grows
/// the transcript by exactly two entries: the user message, then either
/// the reply or [`FALLBACK_REPLY`].
#[derive(Debug)]
pub struct ChatThread {
    client: ChatClient,
    messages: Mutex<Vec<ChatMessage>>,
    sending: AtomicBool,
}

impl ChatThread {
    /// Create an empty thread.
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            messages: Mutex::new(Vec::new()),
            sending: AtomicBool::new(false),
        }
    }

    /// Create a thread seeded with an assistant greeting.
    pub fn with_greeting(client: ChatClient, greeting: impl Into<String>) -> Self {
        Self {
            client,
            messages: Mutex::new(vec![ChatMessage::assistant(greeting)]),
            sending: AtomicBool::new(false),
        }
    }

    /// A snapshot of the transcript.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages
            .lock()
            .expect("chat thread lock poisoned")
            .clone()
    }

    /// Number of transcript entries.
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .expect("chat thread lock poisoned")
            .len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a send is currently in flight.
    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::SeqCst)
    }

    fn push(&self, message: ChatMessage) {
        self.messages
            .lock()
            .expect("chat thread lock poisoned")
            .push(message);
    }

    /// Submit a message and record both sides of the exchange.
    ///
    /// Blank input is rejected locally without touching the transcript.
    /// A submission while another is in flight is rejected with a busy
    /// error. On failure the error is returned to the caller and a
    /// synthetic assistant entry takes the reply's place.
    pub async fn send(&self, input: &str) -> Result<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::validation(
                "message must not be empty",
                Some("message".to_string()),
            ));
        }

        if self
            .sending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::busy("a message is already in flight"));
        }

        self.push(ChatMessage::user(input));

        let outcome = match self.client.send(input).await {
            Ok(response) => {
                self.push(ChatMessage::assistant(response.reply.clone()));
                Ok(response.reply)
            }
            Err(err) => {
                observability::CHAT_FAILURES.click();
                self.push(ChatMessage::assistant(FALLBACK_REPLY));
                Err(err)
            }
        };

        self.sending.store(false, Ordering::SeqCst);
        outcome
    }
}
