use copitrace_types::DiscoveryWarning;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

pub fn heading(text: &str) -> String {
    if use_color() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Truncate a string to a maximum number of characters.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect::<String>() + "...(truncated)"
    }
}

/// Discovery warnings go to stderr so piped stdout stays clean.
pub fn print_warnings(warnings: &[DiscoveryWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}: {}", warning.path.display(), warning.reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("héllo", 10), "héllo");
        assert_eq!(truncate("héllo wörld", 5), "héllo...(truncated)");
    }
}
