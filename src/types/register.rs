use serde::{Deserialize, Serialize};

/// Request body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Normalized 11-digit phone number.
    pub phone: String,

    /// The account password, sent verbatim.
    pub password: String,
}

/// Success body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    /// Identifier of the newly created user.
    pub user_id: String,
}
