use anyhow::Result;
use chrono::Local;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;

use crate::output::truncate;

// Markdown exports are meant for skimming; deep dives use the JSON export.
const MAX_SESSIONS: usize = 10;
const MAX_MESSAGES: usize = 3;
const MAX_CONTENT_CHARS: usize = 500;
const MAX_SEARCH_RESULTS: usize = 20;

/// Render the export bundle to a Markdown summary file.
pub fn write(bundle: &Value, path: &Path) -> Result<()> {
    let doc = render(bundle);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc)?;
    Ok(())
}

fn render(bundle: &Value) -> String {
    let mut doc = String::new();

    let _ = writeln!(doc, "# GitHub Copilot Chat History");
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "**Export Date:** {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(doc);

    if let Some(stats) = bundle.get("statistics") {
        render_summary(&mut doc, stats);
    }

    if let Some(sessions) = bundle
        .pointer("/chat_data/chat_sessions")
        .and_then(Value::as_array)
        .filter(|sessions| !sessions.is_empty())
    {
        render_sessions(&mut doc, sessions);
    }

    if let Some(results) = bundle
        .get("search_results")
        .and_then(Value::as_array)
        .filter(|results| !results.is_empty())
    {
        render_search_results(&mut doc, results);
    }

    doc
}

/// Session ids are UUIDs; the first 8 chars are enough for a heading.
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

fn render_summary(doc: &mut String, stats: &Value) {
    let _ = writeln!(doc, "## Summary");
    let _ = writeln!(doc);
    let _ = writeln!(
        doc,
        "- **Total Sessions:** {}",
        stats["total_sessions"].as_u64().unwrap_or(0)
    );
    let _ = writeln!(
        doc,
        "- **Total Messages:** {}",
        stats["total_messages"].as_u64().unwrap_or(0)
    );
    if let Some(earliest) = stats.pointer("/date_range/earliest").and_then(Value::as_str) {
        let latest = stats
            .pointer("/date_range/latest")
            .and_then(Value::as_str)
            .unwrap_or(earliest);
        let _ = writeln!(doc, "- **Date Range:** {} to {}", earliest, latest);
    }
    let _ = writeln!(doc);
}

fn render_sessions(doc: &mut String, sessions: &[Value]) {
    let _ = writeln!(doc, "## Chat Sessions");
    let _ = writeln!(doc);

    for (index, session) in sessions.iter().take(MAX_SESSIONS).enumerate() {
        let session_id = session["session_id"].as_str().unwrap_or("unknown");
        let _ = writeln!(doc, "### Session {}: {}", index + 1, short_id(session_id));
        let _ = writeln!(doc);
        let _ = writeln!(
            doc,
            "- **Agent:** {}",
            session["agent"].as_str().unwrap_or("unknown")
        );
        if let Some(timestamp) = session["timestamp"].as_str() {
            let _ = writeln!(doc, "- **Timestamp:** {}", timestamp);
        }

        let messages = session["messages"].as_array().cloned().unwrap_or_default();
        let _ = writeln!(doc, "- **Messages:** {}", messages.len());
        let _ = writeln!(doc);

        for (msg_index, message) in messages.iter().take(MAX_MESSAGES).enumerate() {
            let role = message["role"].as_str().unwrap_or("unknown");
            let _ = writeln!(doc, "#### Message {} ({})", msg_index + 1, role);
            let _ = writeln!(doc);
            let _ = writeln!(doc, "```");
            let content = message["content"].as_str().unwrap_or("");
            let _ = writeln!(doc, "{}", truncate(content, MAX_CONTENT_CHARS));
            let _ = writeln!(doc, "```");
            let _ = writeln!(doc);
        }

        if messages.len() > MAX_MESSAGES {
            let _ = writeln!(doc, "... and {} more messages", messages.len() - MAX_MESSAGES);
            let _ = writeln!(doc);
        }
    }

    if sessions.len() > MAX_SESSIONS {
        let _ = writeln!(doc, "... and {} more sessions", sessions.len() - MAX_SESSIONS);
        let _ = writeln!(doc);
    }
}

fn render_search_results(doc: &mut String, results: &[Value]) {
    let _ = writeln!(doc, "## Search Results");
    let _ = writeln!(doc);

    for (index, result) in results.iter().take(MAX_SEARCH_RESULTS).enumerate() {
        let _ = writeln!(doc, "### Match {}", index + 1);
        let _ = writeln!(doc);
        let session_id = result["session_id"].as_str().unwrap_or("unknown");
        let _ = writeln!(doc, "- **Session:** {}", short_id(session_id));
        let _ = writeln!(
            doc,
            "- **Role:** {}",
            result.pointer("/message/role").and_then(Value::as_str).unwrap_or("unknown")
        );
        let _ = writeln!(doc);
        let _ = writeln!(doc, "**Context:**");
        let _ = writeln!(doc);
        let _ = writeln!(doc, "```");
        let _ = writeln!(doc, "{}", result["context"].as_str().unwrap_or(""));
        let _ = writeln!(doc, "```");
        let _ = writeln!(doc);
    }

    if results.len() > MAX_SEARCH_RESULTS {
        let _ = writeln!(
            doc,
            "... and {} more matches",
            results.len() - MAX_SEARCH_RESULTS
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_summary_sessions_and_matches() {
        let bundle = json!({
            "chat_data": {
                "agent": "copilot",
                "chat_sessions": [{
                    "session_id": "abcdef123456",
                    "agent": "copilot",
                    "kind": "chat_session",
                    "messages": [
                        {"role": "user", "content": "fix the bug"},
                        {"role": "assistant", "content": "done"},
                    ],
                }],
            },
            "statistics": {"total_sessions": 1, "total_messages": 2},
            "search_results": [{
                "session_id": "abcdef123456",
                "message_index": 0,
                "message": {"role": "user", "content": "fix the bug"},
                "offset": 0,
                "context": "fix the bug",
            }],
        });

        let doc = render(&bundle);
        assert!(doc.starts_with("# GitHub Copilot Chat History"));
        assert!(doc.contains("- **Total Sessions:** 1"));
        assert!(doc.contains("### Session 1:"));
        assert!(doc.contains("#### Message 1 (user)"));
        assert!(doc.contains("## Search Results"));
        assert!(doc.contains("fix the bug"));
    }

    #[test]
    fn empty_bundle_still_renders_header() {
        let doc = render(&json!({}));
        assert!(doc.starts_with("# GitHub Copilot Chat History"));
        assert!(!doc.contains("## Chat Sessions"));
    }
}
