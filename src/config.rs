//! Client-side configuration file.
//!
//! A small YAML document holding the backend base URL, the request
//! timeout and the persisted UI preferences (theme, language). The
//! session credentials live elsewhere, in the
//! [`SessionStore`](crate::SessionStore), so that store keeps its
//! all-or-nothing invariant.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::Portal;
use crate::error::{Error, Result};
use crate::types::{Language, Theme};

/// Configuration for the portal client and its CLI front-ends.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PortalConfig {
    /// Backend base URL; `None` defers to the environment or the default.
    pub base_url: Option<String>,

    /// Request timeout in seconds; `None` keeps the client default.
    pub timeout_secs: Option<u64>,

    /// Interface language.
    pub language: Language,

    /// Interface theme.
    pub theme: Theme,
}

impl PortalConfig {
    /// Load a configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read {}: {e}", path.display()), e))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load a configuration, treating a missing file as the default.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Persist the configuration as YAML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .map_err(|e| Error::io(format!("failed to write {}: {e}", path.display()), e))
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build a [`Portal`] from this configuration.
    pub fn portal(&self) -> Result<Portal> {
        Portal::with_options(self.base_url.clone(), self.timeout())
    }
}
