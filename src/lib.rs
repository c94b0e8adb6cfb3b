// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod extract;
pub mod transcript;
pub mod types;

// Re-exports
pub use client::{Galba, Reply};
pub use error::{Error, Result};
pub use extract::extract_text;
pub use transcript::Transcript;
pub use types::*;
