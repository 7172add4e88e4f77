use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "copitrace")]
#[command(about = "Extract and analyze GitHub Copilot chat history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// VS Code user-data root(s) to read instead of auto-discovery
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Extract chat history and summarize or export it")]
    Chat {
        /// Output file path; prints a summary when omitted
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        #[arg(long, short = 'f', default_value = "json")]
        format: ExportFormat,

        /// Include substring search results in the output
        #[arg(long, short = 's')]
        search: Option<String>,

        #[arg(long, short = 'v')]
        verbose: bool,
    },

    #[command(about = "Show statistics about available chat data")]
    Stats,

    #[command(about = "Search for content in chat history")]
    Search {
        query: String,

        /// Maximum results to show
        #[arg(long, short = 'l', default_value = "10")]
        limit: usize,

        #[arg(long, short = 'c')]
        case_sensitive: bool,

        /// Only match sessions produced by this agent
        #[arg(long)]
        agent: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}
