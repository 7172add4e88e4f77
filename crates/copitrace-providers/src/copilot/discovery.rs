use copitrace_types::{DiscoveryWarning, SessionKind};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const WORKSPACE_STORAGE: &str = "workspaceStorage";
const CHAT_SESSIONS_DIR: &str = "chatSessions";
const EDITING_SESSIONS_DIR: &str = "chatEditingSessions";
const EDITING_STATE_FILE: &str = "state.json";

/// Candidate session file found under a user-data root, tagged with the
/// raw schema kind and the owning workspace id.
#[derive(Debug, Clone)]
pub struct SessionFile {
    pub path: PathBuf,
    pub kind: SessionKind,
    pub workspace_id: String,
}

/// Enumerate candidate session files under one user-data root.
///
/// Matches `workspaceStorage/<id>/chatSessions/*.json` and
/// `workspaceStorage/<id>/chatEditingSessions/*/state.json`. A workspace
/// may hold one kind, both, or neither. Unreadable directories are
/// recorded as warnings and skipped; files come back in filesystem
/// enumeration order, unsorted.
pub fn locate_sessions(
    user_data_root: &Path,
    warnings: &mut Vec<DiscoveryWarning>,
) -> Vec<SessionFile> {
    let storage = user_data_root.join(WORKSPACE_STORAGE);
    if !storage.is_dir() {
        // No workspace storage at all is a normal empty result.
        return Vec::new();
    }

    let mut found = Vec::new();

    // workspaceStorage/<id>/chatSessions/<file>.json  -> depth 3
    // workspaceStorage/<id>/chatEditingSessions/<id>/state.json -> depth 4
    for entry in WalkDir::new(&storage).min_depth(3).max_depth(4) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| storage.clone());
                warnings.push(DiscoveryWarning::new(path, format!("unreadable: {}", err)));
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        match entry.depth() {
            3 => {
                if dir_name_at(path, 1) == Some(CHAT_SESSIONS_DIR)
                    && path.extension().is_some_and(|ext| ext == "json")
                    && let Some(workspace_id) = dir_name_at(path, 2)
                {
                    found.push(SessionFile {
                        path: path.to_path_buf(),
                        kind: SessionKind::ChatSession,
                        workspace_id: workspace_id.to_string(),
                    });
                }
            }
            4 => {
                if path.file_name().is_some_and(|name| name == EDITING_STATE_FILE)
                    && dir_name_at(path, 2) == Some(EDITING_SESSIONS_DIR)
                    && let Some(workspace_id) = dir_name_at(path, 3)
                {
                    found.push(SessionFile {
                        path: path.to_path_buf(),
                        kind: SessionKind::ChatEditingSession,
                        workspace_id: workspace_id.to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    found
}

/// Name of the directory `levels` ancestors above the file.
fn dir_name_at(path: &Path, levels: usize) -> Option<&str> {
    let mut current = path;
    for _ in 0..levels {
        current = current.parent()?;
    }
    current.file_name()?.to_str()
}
