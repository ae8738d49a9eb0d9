//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Functions here have no side effects beyond printing.

use crate::domain::ChangelogEntry;
use crate::warning::PipelineWarning;
use console::style;
use std::path::Path;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a pipeline warning to the user.
pub fn display_warning(warning: &PipelineWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line summary of an entry: `feature [S3] Add X (by octocat)`.
///
/// Only the first description line is shown.
pub fn format_entry_summary(entry: &ChangelogEntry) -> String {
    let first_line = entry.description.lines().next().unwrap_or_default();
    match &entry.contributor {
        Some(contributor) => format!(
            "{} [{}] {} (by {})",
            entry.kind, entry.category, first_line, contributor
        ),
        None => format!("{} [{}] {}", entry.kind, entry.category, first_line),
    }
}

/// Display the result of a changelog generation.
///
/// # Arguments
/// * `output` - The changelog file that was written
/// * `releases` - Number of released versions rendered
/// * `unreleased_entries` - Number of pending entries rendered at the top
pub fn display_changelog_summary(output: &Path, releases: usize, unreleased_entries: usize) {
    println!("\n{}", style("Changelog written:").bold());
    println!("  File:       {}", style(output.display()).cyan());
    println!("  Releases:   {}", releases);
    println!("  Unreleased: {} entries", unreleased_entries);
}

/// Display the result of bundling unreleased changes into a release
pub fn display_release_summary(version: &str, path: &Path, entries: &[ChangelogEntry]) {
    println!(
        "\n{} {} ({} entries)",
        style("Release").bold(),
        style(version).green(),
        entries.len()
    );
    for entry in entries.iter().take(10) {
        println!("  - {}", format_entry_summary(entry));
    }
    if entries.len() > 10 {
        println!("  ... and {} more entries", entries.len() - 10);
    }
    println!("  Written to {}", style(path.display()).cyan());
}

/// Display the result of cross-link generation
pub fn display_crosslink_summary(output: &Path, services: usize, uids: usize) {
    println!("\n{}", style("Cross-link data written:").bold());
    println!("  File:     {}", style(output.display()).cyan());
    println!("  Services: {}", services);
    println!("  Uids:     {}", uids);
}
