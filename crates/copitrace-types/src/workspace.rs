use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::ChatSession;

/// One extraction batch: every session found for one agent, in discovery
/// order (directory traversal order, not sorted by time).
///
/// `metadata` carries aggregate information such as the storage roots that
/// were searched and the resulting session count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceData {
    pub agent: String,
    #[serde(default)]
    pub chat_sessions: Vec<ChatSession>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl WorkspaceData {
    pub fn new(agent: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            chat_sessions: Vec::new(),
            metadata: Map::new(),
        }
    }

    pub fn total_messages(&self) -> usize {
        self.chat_sessions.iter().map(|s| s.messages.len()).sum()
    }
}

/// Non-fatal problem recorded during discovery or normalization.
///
/// Warnings are diagnostics, never errors: an unreadable directory or a
/// malformed session file contributes a warning and the run continues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl DiscoveryWarning {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result of an extraction run: the normalized data plus every warning
/// accumulated along the way, in the order the problems were encountered.
///
/// Extraction is a total function over its input file set; per-file
/// failures land here instead of aborting the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub data: WorkspaceData,
    #[serde(default)]
    pub warnings: Vec<DiscoveryWarning>,
}

impl Extraction {
    pub fn new(data: WorkspaceData) -> Self {
        Self {
            data,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, path: impl Into<PathBuf>, reason: impl Into<String>) {
        self.warnings.push(DiscoveryWarning::new(path, reason));
    }
}
