//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use imerge_core::Entry;
use imerge_git::Oid;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Print essential machine-readable output (always prints).
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Print a horizontal line (suppressed in quiet mode).
pub fn hr() {
    if !is_quiet() {
        println!("{}", "─".repeat(50).dimmed());
    }
}

/// Abbreviated commit id for display.
#[must_use]
pub fn short_id(oid: Oid) -> String {
    let full = oid.to_string();
    full[..8].yellow().to_string()
}

/// Ledger entry name padded to `width`, colored by role.
///
/// Padding is applied before coloring so escape codes don't count
/// towards the column width.
#[must_use]
pub fn entry_label(entry: Entry, width: usize) -> String {
    let name = format!("{:<width$}", entry.to_string());
    match entry {
        Entry::Ours => name.cyan().to_string(),
        Entry::Theirs => name.magenta().to_string(),
        Entry::Base => name.dimmed().to_string(),
        Entry::Checkpoint(_) => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_is_eight_chars() {
        colored::control::set_override(false);
        let oid = Oid::from_bytes(&[0xab; 20]).unwrap();
        assert_eq!(short_id(oid), "abababab");
    }

    #[test]
    fn test_entry_labels() {
        colored::control::set_override(false);
        assert_eq!(entry_label(Entry::Ours, 0), "ours");
        assert_eq!(entry_label(Entry::Base, 0), "ca");
        assert_eq!(entry_label(Entry::Checkpoint(4), 0), "m-4");
    }

    #[test]
    fn test_entry_labels_share_column_width() {
        colored::control::set_override(false);
        assert_eq!(entry_label(Entry::Base, 8), "ca      ");
        assert_eq!(entry_label(Entry::Checkpoint(12), 8), "m-12    ");
        assert_eq!(entry_label(Entry::Theirs, 4), "theirs");
    }

    #[test]
    fn test_quiet_mode_toggle() {
        set_quiet(true);
        assert!(is_quiet());
        set_quiet(false);
        assert!(!is_quiet());
    }
}
