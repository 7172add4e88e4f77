pub mod discovery;
pub mod parser;
pub(crate) mod schema;

pub use discovery::{SessionFile, locate_sessions};
pub use parser::{normalize_chat_session, normalize_editing_session};

use copitrace_types::{Extraction, SessionKind, WorkspaceData};
use serde_json::json;
use std::path::{Path, PathBuf};

/// Identifier of the producing assistant. The field exists on every record
/// so other agents can join the model later.
pub const AGENT: &str = "copilot";

/// Extract all Copilot chat history from auto-discovered VS Code roots.
///
/// A machine without any editor installation yields an empty extraction
/// with an empty warning list.
pub fn extract() -> Extraction {
    extract_from_roots(&crate::paths::resolve_storage_roots())
}

/// Extract from an explicit set of user-data roots.
///
/// Total over its input set: per-file and per-directory failures become
/// warnings on the returned [`Extraction`], never errors.
pub fn extract_from_roots(roots: &[PathBuf]) -> Extraction {
    let mut extraction = Extraction::new(WorkspaceData::new(AGENT));

    for root in roots {
        collect_root(root, &mut extraction);
    }

    let session_count = extraction.data.chat_sessions.len();
    let metadata = &mut extraction.data.metadata;
    metadata.insert(
        "discovery_roots".to_string(),
        json!(
            roots
                .iter()
                .map(|root| root.display().to_string())
                .collect::<Vec<_>>()
        ),
    );
    metadata.insert("session_count".to_string(), json!(session_count));

    extraction
}

fn collect_root(root: &Path, extraction: &mut Extraction) {
    let files = locate_sessions(root, &mut extraction.warnings);

    for file in files {
        let normalized = match file.kind {
            SessionKind::ChatSession => normalize_chat_session(&file.path),
            SessionKind::ChatEditingSession => normalize_editing_session(&file.path),
            SessionKind::Other => continue,
        };

        match normalized {
            Ok(mut session) => {
                let metadata = &mut session.metadata;
                metadata.insert(
                    "source_file".to_string(),
                    json!(file.path.display().to_string()),
                );
                metadata.insert("workspace_id".to_string(), json!(file.workspace_id));
                if let Ok(stat) = std::fs::metadata(&file.path) {
                    metadata.insert("file_size".to_string(), json!(stat.len()));
                }
                extraction.data.chat_sessions.push(session);
            }
            Err(err) => extraction.warn(&file.path, err.to_string()),
        }
    }
}
