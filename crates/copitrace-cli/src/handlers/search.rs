use anyhow::Result;
use copitrace_engine::{Corpus, SearchQuery};
use copitrace_types::Extraction;

use crate::output;

pub fn handle(
    extraction: Extraction,
    query: &str,
    limit: usize,
    case_sensitive: bool,
    agent: Option<String>,
) -> Result<()> {
    let Extraction { data, warnings } = extraction;

    if data.chat_sessions.is_empty() {
        println!("No chat sessions found");
        output::print_warnings(&warnings);
        return Ok(());
    }

    let corpus = Corpus::new(data);

    let mut search = SearchQuery::new(query).case_sensitive(case_sensitive);
    if let Some(agent) = agent {
        search = search.agent(agent);
    }
    let matches = corpus.search(&search);

    if matches.is_empty() {
        println!("No matches found for '{}'", query);
        output::print_warnings(&warnings);
        return Ok(());
    }

    println!("Found {} matches for '{}'", matches.len(), query);

    for (index, found) in matches.iter().take(limit).enumerate() {
        println!();
        println!("{}", output::heading(&format!("Match {}:", index + 1)));
        println!("  Session: {}", found.session_id.unwrap_or("unknown"));
        println!("  Role: {}", found.message.role.as_str());
        println!("  Context: {}", output::truncate(&found.context, 200));
    }

    if matches.len() > limit {
        println!();
        println!("... and {} more matches", matches.len() - limit);
    }

    output::print_warnings(&warnings);
    Ok(())
}
