use anyhow::Result;
use copitrace_types::Extraction;
use std::path::PathBuf;

use crate::args::{Cli, Commands};
use crate::config::Config;
use crate::handlers;

pub fn run(cli: Cli) -> Result<()> {
    let extraction = extract(&cli.root)?;

    match cli.command {
        Commands::Chat {
            output,
            format,
            search,
            verbose,
        } => handlers::chat::handle(extraction, output, format, search, verbose),

        Commands::Stats => handlers::stats::handle(extraction),

        Commands::Search {
            query,
            limit,
            case_sensitive,
            agent,
        } => handlers::search::handle(extraction, &query, limit, case_sensitive, agent),
    }
}

/// Explicit --root flags win outright; otherwise auto-discovered roots are
/// extended with any extra roots from the config file.
fn extract(cli_roots: &[PathBuf]) -> Result<Extraction> {
    if !cli_roots.is_empty() {
        return Ok(copitrace_providers::extract_from_roots(cli_roots));
    }

    let config = Config::load()?;
    let mut roots = copitrace_providers::resolve_storage_roots();
    for extra in config.discovery.extra_roots {
        if !roots.contains(&extra) {
            roots.push(extra);
        }
    }

    Ok(copitrace_providers::extract_from_roots(&roots))
}
