// Public modules
pub mod auth;
pub mod chat;
pub mod client;
pub mod config;
pub mod documents;
pub mod error;
pub mod observability;
pub mod session;
pub mod types;

// Re-exports
pub use auth::AuthClient;
pub use chat::{ChatClient, ChatThread, FALLBACK_REPLY};
pub use client::Portal;
pub use config::PortalConfig;
pub use documents::DocumentClient;
pub use error::{Error, Result};
pub use session::SessionStore;
pub use types::*;
