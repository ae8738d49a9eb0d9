//! Changelog rendering: pure grouping plus the Markdown writer

pub mod grouping;
pub mod markdown;

pub use grouping::{group_entries, GroupedChanges};
pub use markdown::MarkdownWriter;
