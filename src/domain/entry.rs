use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of change an entry records.
///
/// Variant order is the order subsections are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryType {
    Feature,
    Bugfix,
    Deprecation,
    Removal,
}

impl EntryType {
    pub const ALL: [EntryType; 4] = [
        EntryType::Feature,
        EntryType::Bugfix,
        EntryType::Deprecation,
        EntryType::Removal,
    ];

    /// Value used in the JSON `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Feature => "feature",
            EntryType::Bugfix => "bugfix",
            EntryType::Deprecation => "deprecation",
            EntryType::Removal => "removal",
        }
    }

    /// Subsection heading in the rendered changelog
    pub fn heading(&self) -> &'static str {
        match self {
            EntryType::Feature => "Features",
            EntryType::Bugfix => "Bugfixes",
            EntryType::Deprecation => "Deprecations",
            EntryType::Removal => "Removals",
        }
    }
}

impl FromStr for EntryType {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "feature" => Ok(EntryType::Feature),
            "bugfix" => Ok(EntryType::Bugfix),
            "deprecation" => Ok(EntryType::Deprecation),
            "removal" => Ok(EntryType::Removal),
            other => Err(ChangelogError::unknown_type(other)),
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One changelog line item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub kind: EntryType,
    pub category: String,
    pub description: String,
    pub contributor: Option<String>,
}

impl ChangelogEntry {
    pub fn new(
        kind: EntryType,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        ChangelogEntry {
            kind,
            category: category.into(),
            description: description.into(),
            contributor: None,
        }
    }

    pub fn with_contributor(mut self, contributor: impl Into<String>) -> Self {
        self.contributor = normalize_contributor(Some(contributor.into()));
        self
    }
}

/// Entry exactly as it appears on disk, before validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
    pub description: String,
}

impl TryFrom<RawEntry> for ChangelogEntry {
    type Error = ChangelogError;

    fn try_from(raw: RawEntry) -> Result<Self> {
        Ok(ChangelogEntry {
            kind: raw.kind.parse()?,
            category: raw.category,
            description: raw.description,
            contributor: normalize_contributor(raw.contributor),
        })
    }
}

impl From<&ChangelogEntry> for RawEntry {
    fn from(entry: &ChangelogEntry) -> Self {
        RawEntry {
            kind: entry.kind.as_str().to_string(),
            category: entry.category.clone(),
            contributor: entry.contributor.clone(),
            description: entry.description.clone(),
        }
    }
}

fn normalize_contributor(contributor: Option<String>) -> Option<String> {
    contributor
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
