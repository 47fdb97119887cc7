//! Tab completion over command names and current-directory entries.

use crate::sandbox::Entry;

/// Best completion for `token`.
///
/// Matching is a case-insensitive prefix test. A directory entry always beats
/// a command name; within a group the shortest name wins, and equal lengths
/// keep the first candidate in the order given.
pub fn best_match<'a>(
    token: &str,
    entries: &'a [Entry],
    commands: &[&'a str],
) -> Option<&'a str> {
    if token.is_empty() {
        return None;
    }
    let needle = token.to_lowercase();
    let matches = |candidate: &str| candidate.to_lowercase().starts_with(&needle);

    let entry = entries
        .iter()
        .filter(|e| !e.is_hidden())
        .map(|e| e.name.as_str())
        .filter(|name| matches(*name))
        .min_by_key(|name| name.chars().count());
    if entry.is_some() {
        return entry;
    }

    commands
        .iter()
        .copied()
        .filter(|name| matches(*name))
        .min_by_key(|name| name.chars().count())
}

/// Complete the last whitespace-separated token of `input`.
///
/// Everything before the last token is kept verbatim. Returns `None` when the
/// input is empty, ends in whitespace, or nothing matches.
pub fn complete_line(input: &str, entries: &[Entry], commands: &[&str]) -> Option<String> {
    if input.is_empty() || input.ends_with(char::is_whitespace) {
        return None;
    }
    let split = input
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);
    let (head, token) = input.split_at(split);
    let found = best_match(token, entries, commands)?;
    Some(format!("{head}{found}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(name: &str) -> Entry {
        Entry {
            name: name.into(),
            is_dir: false,
        }
    }

    fn dir(name: &str) -> Entry {
        Entry {
            name: name.into(),
            is_dir: true,
        }
    }

    const COMMANDS: &[&str] = &["help", "ls", "cd", "cat", "contact", "coinflip", "clear"];

    #[test]
    fn test_entry_beats_command() {
        let entries = [file("config.go")];
        assert_eq!(best_match("co", &entries, COMMANDS), Some("config.go"));
    }

    #[test]
    fn test_shortest_entry_wins() {
        let entries = [dir("Projects"), file("Pro.md"), file("Proposal.txt")];
        assert_eq!(best_match("pro", &entries, COMMANDS), Some("Pro.md"));
    }

    #[test]
    fn test_shortest_command_wins() {
        assert_eq!(best_match("c", &[], COMMANDS), Some("cd"));
        assert_eq!(best_match("co", &[], COMMANDS), Some("contact"));
    }

    #[test]
    fn test_equal_length_keeps_listing_order() {
        let entries = [file("ab.txt"), file("ac.txt")];
        assert_eq!(best_match("a", &entries, COMMANDS), Some("ab.txt"));
    }

    #[test]
    fn test_case_insensitive() {
        let entries = [dir("Projects")];
        assert_eq!(best_match("PRO", &entries, COMMANDS), Some("Projects"));
        assert_eq!(best_match("HE", &[], COMMANDS), Some("help"));
    }

    #[test]
    fn test_hidden_entries_never_offered() {
        let entries = [file(".env"), file(".envrc")];
        assert_eq!(best_match(".e", &entries, COMMANDS), None);
    }

    #[test]
    fn test_complete_line_replaces_last_token() {
        let entries = [dir("Projects"), file("README.md")];
        assert_eq!(
            complete_line("cd Pro", &entries, COMMANDS),
            Some("cd Projects".to_string())
        );
        assert_eq!(
            complete_line("cat  rea", &entries, COMMANDS),
            Some("cat  README.md".to_string())
        );
        assert_eq!(complete_line("he", &entries, COMMANDS), Some("help".to_string()));
    }

    #[test]
    fn test_complete_line_no_match_or_nothing_to_complete() {
        let entries = [dir("Projects")];
        assert_eq!(complete_line("cd zz", &entries, COMMANDS), None);
        assert_eq!(complete_line("", &entries, COMMANDS), None);
        assert_eq!(complete_line("cd ", &entries, COMMANDS), None);
    }
}
