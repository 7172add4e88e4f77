use copitrace_providers::extract_from_roots;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_chat_session(root: &Path, workspace: &str, name: &str, value: &serde_json::Value) {
    let dir = root.join("workspaceStorage").join(workspace).join("chatSessions");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), serde_json::to_string(value).unwrap()).unwrap();
}

fn sample_session(text: &str) -> serde_json::Value {
    json!({
        "sessionId": "s1",
        "requests": [{"message": {"text": text}, "response": {"value": "ok"}}],
    })
}

#[test]
fn zero_roots_yield_empty_extraction_without_warnings() {
    let extraction = extract_from_roots(&[]);

    assert_eq!(extraction.data.agent, "copilot");
    assert!(extraction.data.chat_sessions.is_empty());
    assert_eq!(extraction.data.total_messages(), 0);
    assert!(extraction.warnings.is_empty());
}

#[test]
fn root_without_workspace_storage_is_silent() {
    let root = TempDir::new().unwrap();

    let extraction = extract_from_roots(&[root.path().to_path_buf()]);

    assert!(extraction.data.chat_sessions.is_empty());
    assert!(extraction.warnings.is_empty());
}

#[test]
fn malformed_file_becomes_warning_and_valid_files_survive() {
    let root = TempDir::new().unwrap();
    write_chat_session(root.path(), "ws1", "good-1.json", &sample_session("first"));
    write_chat_session(root.path(), "ws1", "good-2.json", &sample_session("second"));

    let bad = root
        .path()
        .join("workspaceStorage/ws1/chatSessions/broken.json");
    fs::write(&bad, "{truncated").unwrap();

    let extraction = extract_from_roots(&[root.path().to_path_buf()]);

    assert_eq!(extraction.data.chat_sessions.len(), 2);
    assert_eq!(extraction.warnings.len(), 1);
    assert_eq!(extraction.warnings[0].path, bad);
}

#[test]
fn sessions_carry_source_metadata() {
    let root = TempDir::new().unwrap();
    write_chat_session(root.path(), "ws42", "one.json", &sample_session("hello"));

    let extraction = extract_from_roots(&[root.path().to_path_buf()]);

    assert_eq!(extraction.data.chat_sessions.len(), 1);
    let session = &extraction.data.chat_sessions[0];
    assert_eq!(session.metadata["workspace_id"], json!("ws42"));
    assert!(
        session.metadata["source_file"]
            .as_str()
            .unwrap()
            .ends_with("one.json")
    );
    assert!(session.metadata["file_size"].as_u64().unwrap() > 0);

    assert_eq!(extraction.data.metadata["session_count"], json!(1));
    let roots = extraction.data.metadata["discovery_roots"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
}

#[test]
fn both_kinds_across_workspaces_are_collected() {
    let root = TempDir::new().unwrap();
    write_chat_session(root.path(), "ws1", "chat.json", &sample_session("hi"));

    let editing_dir = root
        .path()
        .join("workspaceStorage/ws2/chatEditingSessions/e1");
    fs::create_dir_all(&editing_dir).unwrap();
    fs::write(
        editing_dir.join("state.json"),
        serde_json::to_string(&json!({"linearHistory": [{"workingSet": []}]})).unwrap(),
    )
    .unwrap();

    let extraction = extract_from_roots(&[root.path().to_path_buf()]);

    assert_eq!(extraction.data.chat_sessions.len(), 2);
    assert!(extraction.warnings.is_empty());

    let kinds: Vec<_> = extraction
        .data
        .chat_sessions
        .iter()
        .map(|s| s.kind.as_str())
        .collect();
    assert!(kinds.contains(&"chat_session"));
    assert!(kinds.contains(&"chat_editing_session"));
}
