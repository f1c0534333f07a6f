use serde::{Deserialize, Serialize};

use crate::types::Session;

/// Request body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Normalized 11-digit phone number.
    pub phone: String,

    /// The account password, sent verbatim.
    pub password: String,
}

/// Success body for `POST /login`: the credential triple.
///
/// Logging in does not persist anything. The caller decides whether to
/// hand this to a [`SessionStore`](crate::SessionStore) via the `From`
/// conversion below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// The bearer token for subsequent authenticated requests.
    pub access_token: String,

    /// The refresh token.
    pub refresh_token: String,

    /// Expiry timestamp, kept verbatim.
    pub expires_at: String,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Session {
            access_token: resp.access_token,
            refresh_token: resp.refresh_token,
            expires_at: resp.expires_at,
        }
    }
}
