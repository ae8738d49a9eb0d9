use crate::domain::entry::{ChangelogEntry, RawEntry};
use crate::domain::version::{UnnumberedPrerelease, Version};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// All entries belonging to one release, or to the pending unreleased state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseChanges {
    /// `None` for unreleased changes
    pub version: Option<Version>,
    /// ISO-8601 date (`YYYY-MM-DD`)
    pub date: String,
    pub entries: Vec<ChangelogEntry>,
}

impl ReleaseChanges {
    pub fn unreleased(date: impl Into<String>, entries: Vec<ChangelogEntry>) -> Self {
        ReleaseChanges {
            version: None,
            date: date.into(),
            entries,
        }
    }

    pub fn released(
        version: Version,
        date: impl Into<String>,
        entries: Vec<ChangelogEntry>,
    ) -> Self {
        ReleaseChanges {
            version: Some(version),
            date: date.into(),
            entries,
        }
    }

    pub fn is_unreleased(&self) -> bool {
        self.version.is_none()
    }
}

/// Release document as stored in the changes directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRelease {
    pub version: String,
    pub date: String,
    pub entries: Vec<RawEntry>,
}

impl TryFrom<RawRelease> for ReleaseChanges {
    type Error = crate::error::ChangelogError;

    fn try_from(raw: RawRelease) -> Result<Self> {
        let version = Version::parse(&raw.version)?;
        let entries = raw
            .entries
            .into_iter()
            .map(ChangelogEntry::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(ReleaseChanges::released(version, raw.date, entries))
    }
}

impl From<&ReleaseChanges> for RawRelease {
    fn from(release: &ReleaseChanges) -> Self {
        RawRelease {
            version: release
                .version
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_default(),
            date: release.date.clone(),
            entries: release.entries.iter().map(RawEntry::from).collect(),
        }
    }
}

/// Put change-sets in changelog order.
///
/// The unreleased change-set goes first, released ones follow newest first. The sort is
/// stable, so releases with equal keys keep their input order.
pub fn sort_releases(
    unreleased: Option<ReleaseChanges>,
    mut released: Vec<ReleaseChanges>,
    unnumbered: UnnumberedPrerelease,
) -> Vec<ReleaseChanges> {
    released.retain(|r| !r.is_unreleased());
    released.sort_by(|a, b| match (&a.version, &b.version) {
        (Some(va), Some(vb)) => vb.cmp_recency(va, unnumbered),
        _ => std::cmp::Ordering::Equal,
    });

    let mut ordered = Vec::with_capacity(released.len() + 1);
    if let Some(pending) = unreleased {
        ordered.push(pending);
    }
    ordered.extend(released);
    ordered
}
