use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::Corpus;

/// Earliest and latest timestamp observed across sessions and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

/// Aggregate statistics over one corpus.
///
/// Histograms use BTreeMaps so serialized output is deterministically
/// ordered.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    pub total_sessions: usize,
    pub total_messages: usize,
    pub sessions_by_kind: BTreeMap<String, usize>,
    pub messages_by_role: BTreeMap<String, usize>,
    pub sessions_by_agent: BTreeMap<String, usize>,
    pub date_range: Option<DateRange>,
}

impl Corpus {
    /// Compute aggregate statistics.
    ///
    /// Sessions and messages without a timestamp are counted but excluded
    /// from the date range.
    pub fn stats(&self) -> CorpusStats {
        let data = self.data();

        let mut total_messages = 0;
        let mut sessions_by_kind: BTreeMap<String, usize> = BTreeMap::new();
        let mut messages_by_role: BTreeMap<String, usize> = BTreeMap::new();
        let mut sessions_by_agent: BTreeMap<String, usize> = BTreeMap::new();
        let mut range: Option<DateRange> = None;

        let mut observe = |timestamp: Option<DateTime<Utc>>| {
            let Some(ts) = timestamp else { return };
            range = Some(match range {
                None => DateRange {
                    earliest: ts,
                    latest: ts,
                },
                Some(current) => DateRange {
                    earliest: current.earliest.min(ts),
                    latest: current.latest.max(ts),
                },
            });
        };

        for session in &data.chat_sessions {
            *sessions_by_kind
                .entry(session.kind.as_str().to_string())
                .or_insert(0) += 1;
            *sessions_by_agent.entry(session.agent.clone()).or_insert(0) += 1;
            observe(session.timestamp);

            for message in &session.messages {
                total_messages += 1;
                *messages_by_role
                    .entry(message.role.as_str().to_string())
                    .or_insert(0) += 1;
                observe(message.timestamp);
            }
        }

        CorpusStats {
            total_sessions: data.chat_sessions.len(),
            total_messages,
            sessions_by_kind,
            messages_by_role,
            sessions_by_agent,
            date_range: range,
        }
    }
}
