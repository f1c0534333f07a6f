use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::observability;

const DEFAULT_BASE_URL: &str = "http://localhost:4321/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared HTTP core for the portal backend.
///
/// Owns the connection pool, the resolved base URL and the client-side
/// timeout. The domain clients ([`AuthClient`](crate::AuthClient),
/// [`DocumentClient`](crate::DocumentClient),
/// [`ChatClient`](crate::ChatClient)) each hold a clone of this.
#[derive(Debug, Clone)]
pub struct Portal {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
}

impl Portal {
    /// Create a new portal handle.
    ///
    /// The base URL can be provided directly or read from the
    /// APORT_BASE_URL environment variable; absent both, it falls back to
    /// the local development default.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new portal handle with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var("APORT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        };
        let base_url = Url::parse(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// The resolved base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(Error::from)
    }

    /// Map reqwest transport failures into our error type.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        observability::CLIENT_REQUEST_ERRORS.click();
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Turn a non-success response into an error.
    ///
    /// The body text becomes the message when non-empty, else `fallback`.
    /// A 401 maps to an authentication error; only the backend decides
    /// when a token is stale.
    pub(crate) async fn error_for_status(response: Response, fallback: &str) -> Error {
        observability::CLIENT_REQUEST_ERRORS.click();
        let status_code = response.status().as_u16();

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            fallback.to_string()
        } else {
            body
        };

        match status_code {
            401 => Error::authentication(message),
            _ => Error::api(status_code, message),
        }
    }

    /// Issue a POST with a JSON body and return the raw response.
    ///
    /// Only transport failures are mapped here; status handling is the
    /// caller's business (registration discards the error body, everything
    /// else carries it).
    pub(crate) async fn post_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<Response> {
        observability::CLIENT_REQUESTS.click();
        let url = self.endpoint(path)?;

        let mut request = self.client.post(url).headers(self.default_headers());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    /// POST a JSON body and decode a JSON success response.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<T> {
        let response = self.post_raw(path, body, token).await?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response, fallback).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// GET and decode a JSON success response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        fallback: &str,
    ) -> Result<T> {
        observability::CLIENT_REQUESTS.click();
        let url = self.endpoint(path)?;

        let mut request = self.client.get(url).headers(self.default_headers());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response, fallback).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_creation() {
        let portal = Portal::new(Some("http://backend.example:9000/".to_string())).unwrap();
        assert_eq!(portal.base_url.as_str(), "http://backend.example:9000/");
        assert_eq!(portal.timeout, DEFAULT_TIMEOUT);

        let portal = Portal::with_options(
            Some("http://backend.example:9000".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(portal.timeout, Duration::from_secs(5));
    }

    #[test]
    fn endpoint_joins_routes() {
        let portal = Portal::new(Some("http://backend.example:9000".to_string())).unwrap();
        assert_eq!(
            portal.endpoint("register").unwrap().as_str(),
            "http://backend.example:9000/register"
        );
        assert_eq!(
            portal.endpoint("upload").unwrap().as_str(),
            "http://backend.example:9000/upload"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = Portal::new(Some("not a url".to_string())).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }
}
