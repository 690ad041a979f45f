//! edtext: ed-style line addressing over in-memory text
//!
//! Resolve expressions such as `5,7`, `/pattern/+2` or `$-1` against a
//! document's lines and extract the selected lines as a new document.
//! The `edtext` binary at src/main.rs wraps this library.

pub mod address;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod logger;
pub mod range;
pub mod replacement;
pub mod resolver;

// Re-export commonly used types for convenience
pub use address::{Address, Position};
pub use document::Document;
pub use error::{EdError, Result};
pub use range::{Range, Separator};
pub use resolver::{resolve_address, resolve_all, resolve_range};
