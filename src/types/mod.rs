// Public modules
pub mod chat_message;
pub mod chat_request;
pub mod document_create_request;
pub mod document_list_entry;
pub mod document_upload;
pub mod login;
pub mod preferences;
pub mod register;
pub mod session;

// Re-exports
pub use chat_message::{ChatMessage, ChatRole};
pub use chat_request::{ChatRequest, ChatResponse};
pub use document_create_request::{DocumentCreateRequest, UploadResponse};
pub use document_list_entry::DocumentListEntry;
pub use document_upload::DocumentUpload;
pub use login::{LoginRequest, LoginResponse};
pub use preferences::{Language, Theme};
pub use register::{RegisterRequest, RegisterResponse};
pub use session::Session;
