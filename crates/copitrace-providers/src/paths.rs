use std::path::{Path, PathBuf};

/// VS Code variant directories under the per-OS config root share the
/// "Code" prefix: "Code", "Code - Insiders", "Code - OSS", "Code - Exploration".
fn is_editor_variant(name: &str) -> bool {
    name == "Code" || name.starts_with("Code - ")
}

/// Base directory the editor keeps its per-variant data under.
///
/// One template per OS: `~/.config` on Linux, `~/Library/Application Support`
/// on macOS, `%APPDATA%` (Roaming) on Windows. `dirs::config_dir` resolves
/// exactly these three.
pub fn editor_config_base() -> Option<PathBuf> {
    dirs::config_dir()
}

/// Resolve existing VS Code user-data roots on this machine.
///
/// Expands the per-OS template across installed editor variants and keeps
/// only roots that exist. A machine without any VS Code installation yields
/// an empty set; that is a valid, silent outcome, not an error.
pub fn resolve_storage_roots() -> Vec<PathBuf> {
    match editor_config_base() {
        Some(base) => resolve_storage_roots_in(&base),
        None => Vec::new(),
    }
}

/// Expand `<base>/<variant>/User` for every variant directory present.
///
/// Zero matches (nothing installed) and multiple matches (stable plus
/// Insiders) are both normal. Results are sorted by path so discovery
/// order is stable across runs.
pub fn resolve_storage_roots_in(base: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(base) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut roots: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(is_editor_variant)
        })
        .map(|entry| entry.path().join("User"))
        .filter(|root| root.is_dir())
        .collect();

    roots.sort();
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn variant_names() {
        assert!(is_editor_variant("Code"));
        assert!(is_editor_variant("Code - Insiders"));
        assert!(is_editor_variant("Code - OSS"));
        assert!(!is_editor_variant("CodeRunner"));
        assert!(!is_editor_variant("chromium"));
    }

    #[test]
    fn expands_all_installed_variants() {
        let base = TempDir::new().unwrap();
        fs::create_dir_all(base.path().join("Code/User")).unwrap();
        fs::create_dir_all(base.path().join("Code - Insiders/User")).unwrap();
        fs::create_dir_all(base.path().join("chromium")).unwrap();

        let roots = resolve_storage_roots_in(base.path());
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], base.path().join("Code/User"));
        assert_eq!(roots[1], base.path().join("Code - Insiders/User"));
    }

    #[test]
    fn variant_without_user_dir_is_skipped() {
        let base = TempDir::new().unwrap();
        fs::create_dir_all(base.path().join("Code")).unwrap();

        assert!(resolve_storage_roots_in(base.path()).is_empty());
    }

    #[test]
    fn missing_base_yields_empty_set() {
        let base = TempDir::new().unwrap();
        let gone = base.path().join("does-not-exist");

        assert!(resolve_storage_roots_in(&gone).is_empty());
    }
}
