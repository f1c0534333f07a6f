use serde::{Deserialize, Serialize};

use crate::types::DocumentUpload;

/// Wire body for `POST /upload`.
///
/// The create payload and the list response are intentionally two distinct
/// types: the backend assigns its own identifiers on ingest and returns a
/// differently shaped record from listing (see
/// [`DocumentListEntry`](crate::types::DocumentListEntry)). They share
/// only `name`, `company_id`, `priority` and the request identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentCreateRequest {
    /// Fresh idempotency key, minted per call.
    pub request_id: String,

    /// Document content: raw text or base64-encoded file bytes.
    pub document: String,

    /// Display name for the document.
    pub name: String,

    /// Owning company identifier.
    pub company_id: String,

    /// High-priority flag.
    pub priority: bool,
}

impl DocumentCreateRequest {
    /// Assemble the wire payload from a caller upload and a minted key.
    ///
    /// `fallback_company_id` fills in when the upload names no company.
    pub fn new(
        upload: DocumentUpload,
        request_id: impl Into<String>,
        fallback_company_id: &str,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            document: upload.document,
            name: upload.name,
            company_id: upload
                .company_id
                .unwrap_or_else(|| fallback_company_id.to_string()),
            priority: upload.priority,
        }
    }
}

/// Success body for `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// Optional human-readable confirmation from the backend.
    #[serde(default)]
    pub message: Option<String>,
}
