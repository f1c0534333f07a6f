//! Credential storage for the portal session.
//!
//! The store is an explicitly injected object, not ambient global state:
//! callers construct one and hand a shared handle to each client. It is
//! single-writer (the login caller) and multi-reader (document and chat
//! clients). Mutations always replace or remove the whole record, so a
//! partial credential triple is never observable.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{from_reader, to_writer_pretty};

use crate::error::{Error, Result};
use crate::types::Session;

/// Stores the credential triple, optionally persisted to a JSON file.
///
/// `save` overwrites any prior session, `access_token` is a non-failing
/// lookup, and `clear` removes all three fields together (logout is a
/// first-class operation). No expiry enforcement happens here: requests
/// proceed with whatever token is stored, and the backend alone rejects
/// stale tokens.
#[derive(Debug)]
pub struct SessionStore {
    inner: Mutex<Option<Session>>,
    path: Option<PathBuf>,
}

impl SessionStore {
    /// Create a store with no backing file.
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(None),
            path: None,
        }
    }

    /// Open a store backed by a JSON file, loading any persisted session.
    ///
    /// A missing file is an empty store, not an error. An unreadable or
    /// corrupt file is an error: silently discarding credentials would
    /// look like a spontaneous logout.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let session = if path.exists() {
            let file = File::open(&path)
                .map_err(|e| Error::io(format!("failed to open {}: {e}", path.display()), e))?;
            let reader = BufReader::new(file);
            Some(from_reader(reader)?)
        } else {
            None
        };

        Ok(Self {
            inner: Mutex::new(session),
            path: Some(path),
        })
    }

    /// Persist a session, overwriting any prior one.
    pub fn save(&self, session: Session) -> Result<()> {
        if let Some(path) = &self.path {
            let file = File::create(path)
                .map_err(|e| Error::io(format!("failed to write {}: {e}", path.display()), e))?;
            let writer = BufWriter::new(file);
            to_writer_pretty(writer, &session)?;
        }

        let mut inner = self.inner.lock().expect("session store lock poisoned");
        *inner = Some(session);
        Ok(())
    }

    /// Non-failing lookup of the access token.
    pub fn access_token(&self) -> Option<String> {
        let inner = self.inner.lock().expect("session store lock poisoned");
        inner.as_ref().map(|s| s.access_token.clone())
    }

    /// The full session, if one is stored.
    pub fn session(&self) -> Option<Session> {
        let inner = self.inner.lock().expect("session store lock poisoned");
        inner.clone()
    }

    /// Whether a session is currently stored.
    pub fn is_authenticated(&self) -> bool {
        let inner = self.inner.lock().expect("session store lock poisoned");
        inner.is_some()
    }

    /// Remove the session: all three fields go together (logout).
    pub fn clear(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if path.exists() {
                std::fs::remove_file(path).map_err(|e| {
                    Error::io(format!("failed to remove {}: {e}", path.display()), e)
                })?;
            }
        }

        let mut inner = self.inner.lock().expect("session store lock poisoned");
        *inner = None;
        Ok(())
    }
}
