use crate::domain::{ChangelogEntry, EntryType, ReleaseChanges};
use std::collections::{BTreeMap, BTreeSet};

/// Entries of one category, bucketed by type
pub type TypedEntries<'a> = BTreeMap<EntryType, Vec<&'a ChangelogEntry>>;

/// One release's entries grouped for rendering.
///
/// Categories iterate in ordinal order, types in [`EntryType`] order and entries by
/// description. Built fresh for every release.
#[derive(Debug, Default)]
pub struct GroupedChanges<'a> {
    categories: BTreeMap<&'a str, TypedEntries<'a>>,
    contributors: BTreeSet<&'a str>,
}

impl<'a> GroupedChanges<'a> {
    pub fn from_release(release: &'a ReleaseChanges) -> Self {
        group_entries(&release.entries)
    }

    /// Categories with their typed entries, alphabetically
    pub fn categories(&self) -> impl Iterator<Item = (&'a str, &TypedEntries<'a>)> {
        self.categories.iter().map(|(name, typed)| (*name, typed))
    }

    /// Distinct contributor names, alphabetically
    pub fn contributors(&self) -> Vec<&'a str> {
        self.contributors.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Partition entries by category and type
pub fn group_entries(entries: &[ChangelogEntry]) -> GroupedChanges<'_> {
    let mut grouped = GroupedChanges::default();

    for entry in entries {
        grouped
            .categories
            .entry(entry.category.as_str())
            .or_default()
            .entry(entry.kind)
            .or_default()
            .push(entry);

        if let Some(contributor) = entry.contributor.as_deref() {
            grouped.contributors.insert(contributor);
        }
    }

    for typed in grouped.categories.values_mut() {
        for bucket in typed.values_mut() {
            bucket.sort_by(|a, b| a.description.cmp(&b.description));
        }
    }

    grouped
}
