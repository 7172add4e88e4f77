//! copitrace-types - Unified data model for normalized chat history
//!
//! VS Code stores Copilot chat history as versioned, undocumented JSON
//! fragments whose shape drifts across editor releases. This crate defines
//! the uniform record model everything downstream works against: sessions,
//! messages, and the workspace-level batch with its discovery warnings.
//!
//! All types here are plain value objects. They are constructed once per
//! extraction run and read-only afterwards; nothing in this crate touches
//! the filesystem.

pub mod session;
pub mod workspace;

pub use session::{ChatSession, Message, MessageRole, SessionKind};
pub use workspace::{DiscoveryWarning, Extraction, WorkspaceData};
