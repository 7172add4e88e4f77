use anyhow::Result;
use copitrace_engine::{Corpus, CorpusStats, SearchQuery};
use copitrace_types::Extraction;
use serde_json::Value;
use std::path::PathBuf;

use crate::args::ExportFormat;
use crate::export;
use crate::output;

pub fn handle(
    extraction: Extraction,
    output_path: Option<PathBuf>,
    format: ExportFormat,
    search: Option<String>,
    verbose: bool,
) -> Result<()> {
    let Extraction { data, warnings } = extraction;

    if data.chat_sessions.is_empty() {
        output::print_warnings(&warnings);
        anyhow::bail!(
            "no GitHub Copilot chat data found (make sure VS Code or VS Code Insiders is installed and Copilot chat has been used)"
        );
    }

    println!("Found {} chat sessions", data.chat_sessions.len());

    let corpus = Corpus::new(data);
    let stats = corpus.stats();

    let search_results = match search.as_deref() {
        Some(query) => {
            let matches = corpus.search(&SearchQuery::new(query));
            println!("Found {} matches for '{}'", matches.len(), query);
            Some(matches)
        }
        None => None,
    };

    match output_path {
        Some(path) => {
            let mut bundle = serde_json::Map::new();
            bundle.insert("chat_data".to_string(), serde_json::to_value(corpus.data())?);
            bundle.insert("statistics".to_string(), serde_json::to_value(&stats)?);
            if let Some(matches) = &search_results {
                bundle.insert("search_results".to_string(), serde_json::to_value(matches)?);
            }
            let bundle = Value::Object(bundle);

            match format {
                ExportFormat::Json => export::json::write(&bundle, &path)?,
                ExportFormat::Markdown => export::markdown::write(&bundle, &path)?,
            }
            println!("Chat data saved to {}", path.display());
        }
        None => print_summary(&stats, verbose),
    }

    output::print_warnings(&warnings);
    Ok(())
}

fn print_summary(stats: &CorpusStats, verbose: bool) {
    println!();
    println!("{}", output::heading("Chat history summary"));
    println!("  Sessions: {}", stats.total_sessions);
    println!("  Messages: {}", stats.total_messages);

    if let Some(range) = &stats.date_range {
        println!(
            "  Date range: {} to {}",
            range.earliest.format("%Y-%m-%d %H:%M"),
            range.latest.format("%Y-%m-%d %H:%M")
        );
    }

    if verbose {
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
    }
}
