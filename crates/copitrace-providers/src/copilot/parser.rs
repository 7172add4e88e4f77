use chrono::{DateTime, TimeZone, Utc};
use copitrace_types::{ChatSession, Message, MessageRole, SessionKind};
use serde_json::{Map, Value, json};
use std::path::Path;

use super::schema::{ChatSessionFile, EditingSessionFile};
use crate::error::{Error, Result};

// Field-name aliases probed per logical field, in priority order. Schema
// drift across editor versions is absorbed by appending candidates here,
// not by branching per version. Dots descend into nested objects.
const USER_TEXT_KEYS: &[&str] = &["message.text", "message", "text"];
const RESPONSE_TEXT_KEYS: &[&str] = &["value", "text", "content"];
const ROLE_KEYS: &[&str] = &["role", "author", "kind"];
const CONTENT_KEYS: &[&str] = &["content", "text", "value", "message"];
const MESSAGE_ID_KEYS: &[&str] = &["id", "requestId", "messageId"];
const TIMESTAMP_KEYS: &[&str] = &["timestamp", "createdAt", "date"];
const FILE_PATH_KEYS: &[&str] = &["uri.fsPath", "uri.path", "uri", "path", "resource.path"];

/// Walk a dotted path into nested objects.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, key| current.get(key))
}

/// First candidate path that resolves to a string value.
fn probe_str<'a>(value: &'a Value, paths: &[&str]) -> Option<&'a str> {
    paths
        .iter()
        .filter_map(|path| lookup(value, path))
        .find_map(Value::as_str)
}

/// Accepts RFC 3339 strings and epoch-millisecond numbers.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn probe_timestamp(value: &Value, paths: &[&str]) -> Option<DateTime<Utc>> {
    paths
        .iter()
        .filter_map(|path| lookup(value, path))
        .find_map(parse_timestamp)
}

fn file_mtime(path: &Path) -> Option<DateTime<Utc>> {
    std::fs::metadata(path)
        .ok()?
        .modified()
        .ok()
        .map(DateTime::<Utc>::from)
}

fn copy_fields(source: &Value, keys: &[&str], metadata: &mut Map<String, Value>) {
    for key in keys {
        if let Some(value) = source.get(key).filter(|value| !value.is_null()) {
            metadata.insert((*key).to_string(), value.clone());
        }
    }
}

/// Normalize one `chatSessions/*.json` file into a session.
///
/// Malformed JSON or a payload that is not an object is an error the
/// caller records as a warning; a recognized envelope with missing fields
/// is never an error.
pub fn normalize_chat_session(path: &Path) -> Result<ChatSession> {
    let text = std::fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&text)?;
    if !raw.is_object() {
        return Err(Error::Parse(
            "expected a top-level session object".to_string(),
        ));
    }
    let envelope: ChatSessionFile = serde_json::from_value(raw)?;

    let session_id = envelope
        .session_id
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(|| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()));

    let session_ts = envelope
        .creation_date
        .as_ref()
        .and_then(parse_timestamp)
        .or_else(|| envelope.last_message_date.as_ref().and_then(parse_timestamp))
        .or_else(|| file_mtime(path));

    let mut messages = Vec::new();
    for turn in &envelope.requests {
        normalize_turn(turn, session_ts, &mut messages);
    }

    let mut metadata = Map::new();
    if let Some(version) = &envelope.version {
        metadata.insert("version".to_string(), version.clone());
    }
    if let Some(name) = &envelope.requester_username {
        metadata.insert("requesterUsername".to_string(), json!(name));
    }
    if let Some(name) = &envelope.responder_username {
        metadata.insert("responderUsername".to_string(), json!(name));
    }
    if let Some(location) = &envelope.initial_location {
        metadata.insert("initialLocation".to_string(), json!(location));
    }
    if let Some(raw_date) = &envelope.creation_date {
        metadata.insert("creationDate".to_string(), raw_date.clone());
    }
    if let Some(raw_date) = &envelope.last_message_date {
        metadata.insert("lastMessageDate".to_string(), raw_date.clone());
    }
    if let Some(imported) = envelope.is_imported {
        metadata.insert("isImported".to_string(), json!(imported));
    }
    if let Some(title) = &envelope.custom_title {
        metadata.insert("customTitle".to_string(), json!(title));
    }
    metadata.insert("total_requests".to_string(), json!(envelope.requests.len()));

    Ok(ChatSession {
        session_id,
        agent: super::AGENT.to_string(),
        kind: SessionKind::ChatSession,
        timestamp: session_ts,
        messages,
        metadata,
    })
}

/// Map one raw turn to its messages, in source order.
///
/// Two turn shapes exist. Request-shaped turns pair a user prompt with an
/// assistant response and yield up to two messages. Utterance-shaped turns
/// carry their own role and content and yield exactly one, falling back to
/// `role="unknown"` / `content=""` when no alias matches - partial
/// information is preferred over dropping the record.
fn normalize_turn(turn: &Value, fallback_ts: Option<DateTime<Utc>>, out: &mut Vec<Message>) {
    let timestamp = probe_timestamp(turn, TIMESTAMP_KEYS).or(fallback_ts);

    if turn.get("message").is_some() || turn.get("response").is_some() {
        if let Some(text) = probe_str(turn, USER_TEXT_KEYS).filter(|text| !text.is_empty()) {
            let mut metadata = Map::new();
            metadata.insert("type".to_string(), json!("user_request"));
            copy_fields(turn, &["agent", "variableData", "modelId"], &mut metadata);
            out.push(Message {
                id: probe_str(turn, &["requestId"]).map(str::to_string),
                role: MessageRole::User,
                content: text.to_string(),
                timestamp,
                metadata,
            });
        }

        if let Some(response) = turn.get("response").filter(|value| !value.is_null()) {
            let text = response
                .as_str()
                .or_else(|| probe_str(response, RESPONSE_TEXT_KEYS));
            if let Some(text) = text.filter(|text| !text.is_empty()) {
                let mut metadata = Map::new();
                metadata.insert("type".to_string(), json!("assistant_response"));
                copy_fields(
                    turn,
                    &[
                        "result",
                        "followups",
                        "isCanceled",
                        "contentReferences",
                        "codeCitations",
                    ],
                    &mut metadata,
                );
                if let Some(raw_ts) = turn.get("timestamp") {
                    metadata.insert("requestTimestamp".to_string(), raw_ts.clone());
                }
                out.push(Message {
                    id: probe_str(turn, &["responseId"]).map(str::to_string),
                    role: MessageRole::Assistant,
                    content: text.to_string(),
                    timestamp,
                    metadata,
                });
            }
        }
        return;
    }

    let role = probe_str(turn, ROLE_KEYS)
        .map(MessageRole::parse)
        .unwrap_or_default();
    let content = turn
        .as_str()
        .or_else(|| probe_str(turn, CONTENT_KEYS))
        .unwrap_or_default()
        .to_string();
    out.push(Message {
        id: probe_str(turn, MESSAGE_ID_KEYS).map(str::to_string),
        role,
        content,
        timestamp,
        metadata: Map::new(),
    });
}

/// Normalize one `chatEditingSessions/*/state.json` file into a session.
///
/// Editing sessions describe file-edit state, not dialogue. One system
/// message is synthesized per history entry and one for a non-empty recent
/// snapshot; this is a declared lossy projection into the uniform message
/// shape, not a reconstruction of the edit history. A state file with no
/// history and no snapshot yields a session with zero messages, which is
/// valid.
pub fn normalize_editing_session(path: &Path) -> Result<ChatSession> {
    let text = std::fs::read_to_string(path)?;
    let raw: Value = serde_json::from_str(&text)?;
    if !raw.is_object() {
        return Err(Error::Parse(
            "expected a top-level editing-state object".to_string(),
        ));
    }
    let envelope: EditingSessionFile = serde_json::from_value(raw)?;

    let timestamp = file_mtime(path);

    // The embedded sessionId is frequently empty; the owning directory
    // name is the session id in that layout.
    let session_id = envelope
        .session_id
        .clone()
        .filter(|id| !id.is_empty())
        .or_else(|| {
            path.parent()
                .and_then(|dir| dir.file_name())
                .map(|name| name.to_string_lossy().into_owned())
        });

    let mut messages = Vec::new();
    for (index, entry) in envelope.linear_history.iter().enumerate() {
        messages.push(history_entry_message(entry, index, timestamp));
    }
    if let Some(snapshot) = envelope
        .recent_snapshot
        .as_ref()
        .filter(|snapshot| snapshot.as_object().is_some_and(|map| !map.is_empty()))
    {
        messages.push(snapshot_message(snapshot, session_id.as_deref(), timestamp));
    }

    let mut metadata = Map::new();
    if let Some(version) = &envelope.version {
        metadata.insert("version".to_string(), version.clone());
    }
    if let Some(index) = &envelope.linear_history_index {
        metadata.insert("linearHistoryIndex".to_string(), index.clone());
    }
    if !envelope.initial_file_contents.is_empty() {
        metadata.insert(
            "initialFileContents".to_string(),
            Value::Array(envelope.initial_file_contents.clone()),
        );
    }

    Ok(ChatSession {
        session_id,
        agent: super::AGENT.to_string(),
        kind: SessionKind::ChatEditingSession,
        timestamp,
        messages,
        metadata,
    })
}

fn history_entry_message(entry: &Value, index: usize, timestamp: Option<DateTime<Utc>>) -> Message {
    let working_set = entry
        .get("workingSet")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let entries = entry
        .get("entries")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut content = format!(
        "Chat editing session with {} files in working set",
        working_set.len()
    );
    if !entries.is_empty() {
        content.push_str(&format!(" and {} entries", entries.len()));
    }

    let id = probe_str(entry, &["requestId"])
        .map(str::to_string)
        .unwrap_or_else(|| format!("request_{}", index));

    let mut metadata = Map::new();
    metadata.insert("type".to_string(), json!("user_request"));
    let files = working_set_files(&working_set);
    if !files.is_empty() {
        metadata.insert("files".to_string(), json!(files));
    }
    metadata.insert("workingSet".to_string(), Value::Array(working_set));
    metadata.insert("entries".to_string(), Value::Array(entries));

    Message {
        id: Some(id),
        role: MessageRole::System,
        content,
        timestamp,
        metadata,
    }
}

fn snapshot_message(
    snapshot: &Value,
    session_id: Option<&str>,
    timestamp: Option<DateTime<Utc>>,
) -> Message {
    let working_set = snapshot
        .get("workingSet")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut metadata = Map::new();
    metadata.insert("type".to_string(), json!("snapshot"));
    let files = working_set_files(&working_set);
    if !files.is_empty() {
        metadata.insert("files".to_string(), json!(files));
    }
    metadata.insert("recentSnapshot".to_string(), snapshot.clone());

    Message {
        id: Some(format!("snapshot_{}", session_id.unwrap_or_default())),
        role: MessageRole::System,
        content: format!("Recent snapshot with {} files", working_set.len()),
        timestamp,
        metadata,
    }
}

/// Best-effort extraction of affected file paths from working-set entries,
/// which may be bare strings or objects carrying a URI in several layouts.
fn working_set_files(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .as_str()
                .or_else(|| probe_str(entry, FILE_PATH_KEYS))
                .map(str::to_string)
        })
        .collect()
}
