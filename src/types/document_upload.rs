use base64::Engine;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// A document a caller wants to upload.
///
/// This is the caller-facing half of the create path. It deliberately has
/// no request identifier: [`DocumentClient::create`](crate::DocumentClient::create)
/// mints a fresh one per call, so two uploads with identical fields still
/// carry distinct idempotency keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    /// The document content: raw text, or base64-encoded file bytes.
    pub document: String,

    /// Display name for the document.
    pub name: String,

    /// Owning company, when the caller knows one.
    pub company_id: Option<String>,

    /// Whether the backend should treat this document as high priority.
    pub priority: bool,
}

impl DocumentUpload {
    /// Create an upload from raw text content.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            document: text.into(),
            name: name.into(),
            company_id: None,
            priority: false,
        }
    }

    /// Create an upload from a file path, encoding the contents as base64.
    ///
    /// The document name defaults to the file name.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let name = match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => name.to_string(),
            None => {
                return Err(Error::validation(
                    format!("path has no usable file name: {}", path.display()),
                    Some("path".to_string()),
                ));
            }
        };

        let mut file = File::open(path)
            .map_err(|e| Error::io(format!("failed to open {}: {e}", path.display()), e))?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|e| Error::io(format!("failed to read {}: {e}", path.display()), e))?;

        let document = base64::engine::general_purpose::STANDARD.encode(&buffer);

        Ok(Self {
            document,
            name,
            company_id: None,
            priority: false,
        })
    }

    /// Sets the owning company.
    pub fn with_company_id(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    /// Sets the priority flag.
    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }
}
