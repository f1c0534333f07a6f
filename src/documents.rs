//! Document listing and upload.

use std::sync::Arc;

use uuid::Uuid;

use crate::client::Portal;
use crate::error::{Error, Result};
use crate::observability;
use crate::session::SessionStore;
use crate::types::{DocumentCreateRequest, DocumentListEntry, DocumentUpload, UploadResponse};

const LIST_FALLBACK: &str = "Failed to fetch documents";
const UPLOAD_FALLBACK: &str = "Failed to upload document";

/// Placeholder company used when a caller supplies none.
const DEFAULT_COMPANY_ID: &str = "auto";

/// Client for the document routes, a read-only consumer of the session.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    portal: Portal,
    session: Arc<SessionStore>,
}

impl DocumentClient {
    /// Create a new document client over a shared session.
    pub fn new(portal: Portal, session: Arc<SessionStore>) -> Self {
        Self { portal, session }
    }

    /// List uploaded documents.
    ///
    /// Requires an access token: with none stored this fails locally,
    /// making zero network calls. A stored-but-expired token is still
    /// sent; the backend answers with 401 if it disagrees.
    pub async fn list(&self) -> Result<Vec<DocumentListEntry>> {
        let token = self
            .session
            .access_token()
            .ok_or_else(|| Error::missing_credential("no access token in session"))?;

        observability::DOCUMENT_LISTS.click();
        self.portal
            .get_json("upload", Some(&token), LIST_FALLBACK)
            .await
    }

    /// Upload a document.
    ///
    /// A fresh `request_id` is minted on every call, even for identical
    /// uploads, so backend-side dedup never conflates two submissions.
    /// The token is attached when present; the backend decides whether an
    /// unauthenticated upload is acceptable.
    pub async fn create(&self, upload: DocumentUpload) -> Result<UploadResponse> {
        let request =
            DocumentCreateRequest::new(upload, Uuid::new_v4().to_string(), DEFAULT_COMPANY_ID);

        observability::DOCUMENT_UPLOADS.click();
        let token = self.session.access_token();
        self.portal
            .post_json("upload", &request, token.as_deref(), UPLOAD_FALLBACK)
            .await
    }
}
