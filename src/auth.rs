//! Registration and login.
//!
//! The auth client is pure request/response: a successful login returns
//! the credential triple and nothing more. Handing the result to a
//! [`SessionStore`](crate::SessionStore) is the caller's responsibility,
//! which keeps the store single-writer.

use crate::client::Portal;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

const REGISTER_FALLBACK: &str = "Registration failed";
const LOGIN_FALLBACK: &str = "Login failed";

/// Client for the register and login routes. Neither requires a token.
#[derive(Debug, Clone)]
pub struct AuthClient {
    portal: Portal,
}

impl AuthClient {
    /// Create a new auth client.
    pub fn new(portal: Portal) -> Self {
        Self { portal }
    }

    /// Register a new account.
    ///
    /// The phone number is normalized (non-digits stripped) and must come
    /// to exactly 11 digits; the password must be non-empty. Requests
    /// failing local validation never reach the network. On a non-success
    /// status the response body is discarded and a fixed message is
    /// returned.
    pub async fn register(&self, phone: &str, password: &str) -> Result<RegisterResponse> {
        let phone = normalize_phone(phone)?;
        ensure_password(password)?;
        observability::AUTH_REGISTRATIONS.click();

        let request = RegisterRequest {
            phone,
            password: password.to_string(),
        };
        let response = self.portal.post_raw("register", &request, None).await?;

        if !response.status().is_success() {
            observability::CLIENT_REQUEST_ERRORS.click();
            return Err(Error::api(response.status().as_u16(), REGISTER_FALLBACK));
        }

        response.json::<RegisterResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Log in and return the credential triple.
    ///
    /// On a non-success status the error carries the backend's body text
    /// when non-empty, else a fixed fallback. Nothing is persisted here.
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginResponse> {
        let phone = normalize_phone(phone)?;
        ensure_password(password)?;
        observability::AUTH_LOGINS.click();

        let request = LoginRequest {
            phone,
            password: password.to_string(),
        };
        self.portal
            .post_json("login", &request, None, LOGIN_FALLBACK)
            .await
    }
}

/// Strip non-digits from a phone number and require exactly 11 digits.
///
/// Accepts masked UI forms like `+7 (777) 123-45-67`; the normalized
/// digit string is what goes on the wire.
pub fn normalize_phone(raw: &str) -> Result<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        observability::AUTH_VALIDATION_FAILURES.click();
        return Err(Error::validation(
            "phone number must contain exactly 11 digits",
            Some("phone".to_string()),
        ));
    }
    Ok(digits)
}

fn ensure_password(password: &str) -> Result<()> {
    if password.is_empty() {
        observability::AUTH_VALIDATION_FAILURES.click();
        return Err(Error::validation(
            "password must not be empty",
            Some("password".to_string()),
        ));
    }
    Ok(())
}
