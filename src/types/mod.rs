// Public modules
pub mod chat_message;
pub mod chat_request;

// Re-exports
pub use chat_message::{ChatMessage, Role};
pub use chat_request::ChatRequest;
