use serde::Deserialize;
use serde_json::Value;

/// Top-level envelope of a `chatSessions/*.json` payload.
///
/// Every field is optional: the format is versioned and undocumented, and
/// older editor releases omit most of the metadata. Turn objects inside
/// `requests` drift too much across versions for a rigid struct; they stay
/// raw and go through alias probing in the parser.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ChatSessionFile {
    pub session_id: Option<String>,
    pub version: Option<Value>,
    /// RFC 3339 string in current versions, epoch milliseconds in older ones.
    pub creation_date: Option<Value>,
    pub last_message_date: Option<Value>,
    pub requester_username: Option<String>,
    pub responder_username: Option<String>,
    pub initial_location: Option<String>,
    pub is_imported: Option<bool>,
    pub custom_title: Option<String>,
    pub requests: Vec<Value>,
}

/// Top-level envelope of a `chatEditingSessions/*/state.json` payload.
///
/// Describes file-edit state rather than dialogue; there is no canonical
/// messages array. History entries and the snapshot stay raw `Value`s.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct EditingSessionFile {
    pub session_id: Option<String>,
    pub version: Option<Value>,
    pub linear_history: Vec<Value>,
    pub linear_history_index: Option<Value>,
    pub recent_snapshot: Option<Value>,
    pub initial_file_contents: Vec<Value>,
}
