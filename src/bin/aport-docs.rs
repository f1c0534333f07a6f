//! Command-line tool for listing and uploading documents.
//!
//! # Usage
//!
//! ```bash
//! # List the documents visible to the stored session
//! aport-docs
//!
//! # Upload a file (base64-encoded on the wire), then re-list
//! aport-docs --file report.pdf
//!
//! # Upload a text snippet under a given name
//! aport-docs --text "hello" --name doc.txt --priority
//! ```
//!
//! Listing requires a stored session; log in first with `aport-chat`.

use std::path::PathBuf;
use std::sync::Arc;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use aport::{DocumentClient, DocumentUpload, PortalConfig, SessionStore};

/// Command-line arguments for the aport-docs tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct Args {
    /// Backend base URL, overriding the config file and environment.
    #[arrrg(optional, "Backend base URL (overrides config and APORT_BASE_URL)", "URL")]
    base_url: Option<String>,

    /// Path to the YAML config file.
    #[arrrg(optional, "Config file path (default: ~/.aport/config.yaml)", "PATH")]
    config: Option<String>,

    /// Path to the persisted session file.
    #[arrrg(optional, "Session file path (default: ~/.aport/session.json)", "PATH")]
    session: Option<String>,

    /// Upload the file at this path.
    #[arrrg(optional, "Upload the file at PATH (base64-encoded)", "PATH")]
    file: Option<String>,

    /// Upload this text as the document body.
    #[arrrg(optional, "Upload TEXT as the document body (needs --name)", "TEXT")]
    text: Option<String>,

    /// Document name for --text uploads.
    #[arrrg(optional, "Document name for --text uploads", "NAME")]
    name: Option<String>,

    /// Company identifier for the upload.
    #[arrrg(optional, "Company identifier for the upload", "ID")]
    company_id: Option<String>,

    /// Mark the upload high priority.
    #[arrrg(flag, "Mark the upload high priority")]
    priority: bool,
}

fn default_path(file: &str) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".aport").join(file)
}

fn build_upload(args: &Args) -> Result<Option<DocumentUpload>, Box<dyn std::error::Error>> {
    let mut upload = match (&args.file, &args.text) {
        (Some(_), Some(_)) => {
            return Err("pass either --file or --text, not both".into());
        }
        (Some(path), None) => DocumentUpload::from_path(path)?,
        (None, Some(text)) => {
            let name = args
                .name
                .clone()
                .ok_or("--text uploads need a --name")?;
            DocumentUpload::from_text(name, text.clone())
        }
        (None, None) => return Ok(None),
    };

    if let Some(company_id) = &args.company_id {
        upload = upload.with_company_id(company_id.clone());
    }
    Ok(Some(upload.with_priority(args.priority)))
}

fn print_listing(entries: &[aport::DocumentListEntry]) {
    if entries.is_empty() {
        println!("No documents uploaded yet.");
        return;
    }
    for entry in entries {
        match &entry.id {
            Some(id) => println!("{} ({})", entry.display_name(), id),
            None => println!("{}", entry.display_name()),
        }
    }
}

/// Main entry point for the aport-docs tool.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = Args::from_command_line_relaxed("aport-docs [OPTIONS]");

    let config_path = args
        .config
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path("config.yaml"));
    let session_path = args
        .session
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path("session.json"));

    let mut config = PortalConfig::load_or_default(&config_path)?;
    if let Some(base_url) = args.base_url.clone() {
        config.base_url = Some(base_url);
    }

    let portal = config.portal()?;
    let store = Arc::new(SessionStore::open(&session_path)?);
    let documents = DocumentClient::new(portal, store);

    if let Some(upload) = build_upload(&args)? {
        let outcome = documents.create(upload).await?;
        match outcome.message {
            Some(message) => println!("{message}"),
            None => println!("Document uploaded successfully"),
        }
    }

    print_listing(&documents.list().await?);
    Ok(())
}
