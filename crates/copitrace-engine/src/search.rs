use copitrace_types::Message;
use serde::Serialize;
use std::borrow::Cow;

use crate::Corpus;

/// Characters of context captured on each side of a match.
const CONTEXT_RADIUS: usize = 100;

/// Substring search parameters.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub case_sensitive: bool,
    pub agent: Option<String>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            case_sensitive: false,
            agent: None,
            limit: None,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Restrict matches to sessions of one agent (exact match).
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Keep only the first N matches in corpus order.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One matching (session, message) pair, borrowed from the corpus.
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch<'a> {
    pub session_id: Option<&'a str>,
    pub agent: &'a str,
    pub message_index: usize,
    pub message: &'a Message,
    /// Byte offset of the match within the searched content.
    pub offset: usize,
    pub context: String,
}

impl Corpus {
    /// Linear substring scan over message content, in corpus insertion
    /// order. Repeated calls with the same query return identical results;
    /// a limit truncates the sequence without changing which matches come
    /// first.
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchMatch<'_>> {
        let needle = if query.case_sensitive {
            Cow::Borrowed(query.query.as_str())
        } else {
            Cow::Owned(query.query.to_lowercase())
        };

        let mut matches = Vec::new();

        'sessions: for session in &self.data().chat_sessions {
            if let Some(agent) = &query.agent
                && session.agent != *agent
            {
                continue;
            }

            for (message_index, message) in session.messages.iter().enumerate() {
                let haystack: Cow<str> = if query.case_sensitive {
                    Cow::Borrowed(message.content.as_str())
                } else {
                    Cow::Owned(message.content.to_lowercase())
                };

                if let Some(offset) = haystack.find(needle.as_ref()) {
                    matches.push(SearchMatch {
                        session_id: session.session_id.as_deref(),
                        agent: &session.agent,
                        message_index,
                        message,
                        offset,
                        context: context_window(&haystack, offset, needle.len()),
                    });

                    if let Some(limit) = query.limit
                        && matches.len() >= limit
                    {
                        break 'sessions;
                    }
                }
            }
        }

        matches
    }
}

/// Slice a window around the match, nudged outward to char boundaries.
fn context_window(content: &str, offset: usize, len: usize) -> String {
    let mut begin = offset.saturating_sub(CONTEXT_RADIUS);
    while begin > 0 && !content.is_char_boundary(begin) {
        begin -= 1;
    }
    let mut end = (offset + len).saturating_add(CONTEXT_RADIUS).min(content.len());
    while end < content.len() && !content.is_char_boundary(end) {
        end += 1;
    }
    content[begin..end].to_string()
}
