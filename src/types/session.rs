use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// The credential triple representing an authenticated user.
///
/// All three fields are set together on login and cleared together on
/// logout; partial state is never produced. `expires_at` is informational
/// only: the client never gates a request on it, and the backend remains
/// the sole authority on rejecting a stale token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// The bearer token attached to authenticated requests.
    pub access_token: String,

    /// The refresh token. Stored but unused: no refresh flow exists.
    pub refresh_token: String,

    /// Expiry timestamp as returned by the backend, kept verbatim.
    pub expires_at: String,
}

impl Session {
    /// Create a new session from the three credential fields.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: expires_at.into(),
        }
    }

    /// Parse `expires_at` as an RFC 3339 timestamp, for display.
    ///
    /// Returns `None` when the backend sent something unparseable; that is
    /// not an error and never affects request handling.
    pub fn expires_at_time(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.expires_at, &Rfc3339).ok()
    }

    /// Whether the stored expiry lies in the past, for display purposes.
    ///
    /// Requests proceed with the stored token regardless of this value.
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        match self.expires_at_time() {
            Some(expires_at) => expires_at < now,
            None => false,
        }
    }
}
