use serde::{Deserialize, Serialize};

/// One record from `GET /upload`.
///
/// The backend has shipped two generations of this shape: an early one
/// echoing the client fields (`id`, `name`, ...) and a later one with
/// server-assigned `DocumentID`/`DocumentName`/`UserID`. The aliases below
/// accept both; renderers should go through [`display_name`].
///
/// [`display_name`]: DocumentListEntry::display_name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DocumentListEntry {
    /// Document identifier, client-supplied or server-assigned.
    #[serde(default, alias = "DocumentID")]
    pub id: Option<String>,

    /// Document name.
    #[serde(default, alias = "DocumentName")]
    pub name: Option<String>,

    /// Owning user, present only in the server-assigned shape.
    #[serde(default, alias = "UserID")]
    pub user_id: Option<String>,

    /// Owning company.
    #[serde(default)]
    pub company_id: Option<String>,

    /// High-priority flag.
    #[serde(default)]
    pub priority: bool,

    /// Ingest timestamp, when the backend reports one.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl DocumentListEntry {
    /// The name to render, reconciled across shapes.
    ///
    /// Falls back to `"Untitled"` when the name is absent or blank.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "Untitled",
        }
    }
}
