//! copitrace-providers - Locate and normalize raw chat-history storage
//!
//! Everything that touches the filesystem lives here: resolving VS Code
//! user-data roots per platform, walking workspaceStorage for candidate
//! session files, and parsing the two known raw schemas into the unified
//! model from `copitrace-types`.
//!
//! The provider reads directly from the editor's data directories on each
//! invocation and never writes to them; the storage stays the single
//! source of truth. Per-file failures are downgraded to warnings so one
//! bad file never aborts a run.

// Error types
pub mod error;

// Storage root resolution
pub mod paths;

// Provider implementation
pub mod copilot;

pub use copilot::{
    AGENT, SessionFile, extract, extract_from_roots, locate_sessions, normalize_chat_session,
    normalize_editing_session,
};
pub use error::{Error, Result};
pub use paths::{resolve_storage_roots, resolve_storage_roots_in};
