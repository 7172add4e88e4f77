use anyhow::Result;
use copitrace_engine::Corpus;
use copitrace_types::Extraction;

use crate::output;

pub fn handle(extraction: Extraction) -> Result<()> {
    let Extraction { data, warnings } = extraction;

    if data.chat_sessions.is_empty() {
        println!("No chat sessions found");
        output::print_warnings(&warnings);
        return Ok(());
    }

    let corpus = Corpus::new(data);
    let stats = corpus.stats();

    println!("{}", output::heading("GitHub Copilot chat statistics"));
    println!("  Total sessions: {}", stats.total_sessions);
    println!("  Total messages: {}", stats.total_messages);
    if let Some(range) = &stats.date_range {
        println!(
            "  Date range: {} to {}",
            range.earliest.to_rfc3339(),
            range.latest.to_rfc3339()
        );
    }

    if !stats.sessions_by_kind.is_empty() {
        println!();
        println!("{}", output::heading("Session kinds"));
        for (kind, count) in &stats.sessions_by_kind {
            println!("  {}: {}", kind, count);
        }
    }

    if !stats.messages_by_role.is_empty() {
        println!();
        println!("{}", output::heading("Message roles"));
        for (role, count) in &stats.messages_by_role {
            println!("  {}: {}", role, count);
        }
    }

    if !stats.sessions_by_agent.is_empty() {
        println!();
        println!("{}", output::heading("Agent activity"));
        for (agent, count) in &stats.sessions_by_agent {
            println!("  {}: {} sessions", agent, count);
        }
    }

    output::print_warnings(&warnings);
    Ok(())
}
