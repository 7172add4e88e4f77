use chrono::{TimeZone, Utc};
use copitrace_engine::{Corpus, SearchQuery};
use copitrace_types::{ChatSession, Message, MessageRole, SessionKind, WorkspaceData};
use serde_json::Map;

fn message(role: MessageRole, content: &str) -> Message {
    Message {
        id: None,
        role,
        content: content.to_string(),
        timestamp: None,
        metadata: Map::new(),
    }
}

fn session(kind: SessionKind, messages: Vec<Message>) -> ChatSession {
    ChatSession {
        session_id: Some(format!("session-{}", messages.len())),
        agent: "copilot".to_string(),
        kind,
        timestamp: None,
        messages,
        metadata: Map::new(),
    }
}

fn corpus(sessions: Vec<ChatSession>) -> Corpus {
    let mut data = WorkspaceData::new("copilot");
    data.chat_sessions = sessions;
    Corpus::new(data)
}

#[test]
fn stats_for_single_chat_session_scenario() {
    let corpus = corpus(vec![session(
        SessionKind::ChatSession,
        vec![
            message(MessageRole::User, "fix the bug"),
            message(MessageRole::Assistant, "done"),
        ],
    )]);

    let stats = corpus.stats();
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.total_messages, 2);
    assert_eq!(stats.messages_by_role["user"], 1);
    assert_eq!(stats.messages_by_role["assistant"], 1);
    assert_eq!(stats.sessions_by_kind["chat_session"], 1);
    assert_eq!(stats.sessions_by_agent["copilot"], 1);
}

#[test]
fn stats_message_count_matches_sum_over_sessions() {
    let sessions = vec![
        session(
            SessionKind::ChatSession,
            vec![
                message(MessageRole::User, "a"),
                message(MessageRole::Assistant, "b"),
                message(MessageRole::User, "c"),
            ],
        ),
        session(SessionKind::ChatEditingSession, Vec::new()),
        session(
            SessionKind::ChatSession,
            vec![message(MessageRole::System, "snapshot")],
        ),
    ];
    let expected: usize = sessions.iter().map(|s| s.messages.len()).sum();

    let corpus = corpus(sessions);
    assert_eq!(corpus.stats().total_messages, expected);
    assert_eq!(corpus.stats().total_sessions, 3);
}

#[test]
fn stats_date_range_skips_missing_timestamps() {
    let early = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    let mut dated = session(
        SessionKind::ChatSession,
        vec![
            Message {
                timestamp: Some(late),
                ..message(MessageRole::User, "late")
            },
            message(MessageRole::Assistant, "undated"),
        ],
    );
    dated.timestamp = Some(early);

    let undated = session(
        SessionKind::ChatSession,
        vec![message(MessageRole::User, "no time at all")],
    );

    let corpus = corpus(vec![dated, undated]);
    let stats = corpus.stats();

    assert_eq!(stats.total_messages, 3);
    let range = stats.date_range.expect("range from dated entries");
    assert_eq!(range.earliest, early);
    assert_eq!(range.latest, late);
}

#[test]
fn stats_empty_corpus_has_no_range() {
    let corpus = corpus(Vec::new());
    let stats = corpus.stats();

    assert_eq!(stats.total_sessions, 0);
    assert_eq!(stats.total_messages, 0);
    assert!(stats.date_range.is_none());
    assert!(stats.sessions_by_kind.is_empty());
}

#[test]
fn search_case_sensitivity_scenario() {
    let corpus = corpus(vec![session(
        SessionKind::ChatSession,
        vec![
            message(MessageRole::User, "use docker"),
            message(MessageRole::Assistant, "Docker setup"),
        ],
    )]);

    let sensitive = corpus.search(&SearchQuery::new("Docker").case_sensitive(true));
    assert_eq!(sensitive.len(), 1);
    assert_eq!(sensitive[0].message.content, "Docker setup");

    let insensitive = corpus.search(&SearchQuery::new("Docker"));
    assert_eq!(insensitive.len(), 2);

    // Insensitive results are a superset of the sensitive ones.
    for found in &sensitive {
        assert!(
            insensitive
                .iter()
                .any(|m| m.message_index == found.message_index)
        );
    }
}

#[test]
fn search_is_idempotent() {
    let corpus = corpus(vec![session(
        SessionKind::ChatSession,
        vec![
            message(MessageRole::User, "docker compose up"),
            message(MessageRole::Assistant, "docker build done"),
        ],
    )]);

    let query = SearchQuery::new("docker");
    let first = corpus.search(&query);
    let second = corpus.search(&query);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.message_index, b.message_index);
        assert_eq!(a.offset, b.offset);
        assert_eq!(a.context, b.context);
    }
}

#[test]
fn search_limit_keeps_first_matches_in_order() {
    let corpus = corpus(vec![session(
        SessionKind::ChatSession,
        vec![
            message(MessageRole::User, "alpha match"),
            message(MessageRole::Assistant, "beta match"),
            message(MessageRole::User, "gamma match"),
        ],
    )]);

    let limited = corpus.search(&SearchQuery::new("match").limit(2));
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].message_index, 0);
    assert_eq!(limited[1].message_index, 1);
}

#[test]
fn search_agent_filter_is_exact() {
    let mut other = session(
        SessionKind::ChatSession,
        vec![message(MessageRole::User, "docker on another agent")],
    );
    other.agent = "copilot-labs".to_string();

    let corpus = corpus(vec![
        session(
            SessionKind::ChatSession,
            vec![message(MessageRole::User, "docker here")],
        ),
        other,
    ]);

    let filtered = corpus.search(&SearchQuery::new("docker").agent("copilot"));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].agent, "copilot");
}

#[test]
fn search_reports_offset_and_context() {
    let corpus = corpus(vec![session(
        SessionKind::ChatSession,
        vec![message(MessageRole::User, "please use docker for this")],
    )]);

    let matches = corpus.search(&SearchQuery::new("docker"));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].offset, 11);
    assert!(matches[0].context.contains("docker"));
    assert_eq!(matches[0].message_index, 0);
}
