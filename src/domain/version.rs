use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const PREVIEW_PREFIX: &str = "preview-";

/// SDK release version: `MAJOR.MINOR.PATCH[-PRERELEASE]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: String,
}

impl Version {
    /// Create a release version with no prerelease tag
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: String::new(),
        }
    }

    pub fn with_prerelease(mut self, prerelease: impl Into<String>) -> Self {
        self.prerelease = prerelease.into();
        self
    }

    /// Parse a version string (e.g., "2.1.0" or "2.0.0-preview-10")
    ///
    /// Only the patch segment is scanned for the `-` that starts the prerelease tag,
    /// everything after that hyphen (dots included) is the tag.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.splitn(3, '.').collect();
        if parts.len() != 3 {
            return Err(ChangelogError::version(format!(
                "Invalid version format: '{}' - expected MAJOR.MINOR.PATCH",
                input
            )));
        }

        let (patch, prerelease) = match parts[2].split_once('-') {
            Some((_, "")) => {
                return Err(ChangelogError::version(format!(
                    "Empty prerelease in '{}'",
                    input
                )));
            }
            Some((patch, prerelease)) => (patch, prerelease),
            None => (parts[2], ""),
        };

        Ok(Version {
            major: parse_component(input, "major", parts[0])?,
            minor: parse_component(input, "minor", parts[1])?,
            patch: parse_component(input, "patch", patch)?,
            prerelease: prerelease.to_string(),
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    /// Trailing number of a `preview-N` prerelease tag
    pub fn preview_number(&self) -> Option<u32> {
        self.prerelease
            .strip_prefix(PREVIEW_PREFIX)
            .and_then(|n| n.parse::<u32>().ok())
    }

    /// Comparison key used to order releases by recency
    pub fn sort_key(&self, unnumbered: UnnumberedPrerelease) -> SortKey {
        let rank = if !self.is_prerelease() {
            PrereleaseRank::Release
        } else if let Some(n) = self.preview_number() {
            PrereleaseRank::Preview(n)
        } else {
            match unnumbered {
                UnnumberedPrerelease::Release => PrereleaseRank::Release,
                UnnumberedPrerelease::Oldest => PrereleaseRank::Unnumbered,
            }
        };

        SortKey {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            rank,
        }
    }

    /// Compare by recency; `Ordering::Greater` means `self` is newer
    pub fn cmp_recency(&self, other: &Version, unnumbered: UnnumberedPrerelease) -> Ordering {
        self.sort_key(unnumbered).cmp(&other.sort_key(unnumbered))
    }
}

/// A version component must be plain ASCII digits; `u32::from_str` would also take a sign
fn parse_component(input: &str, name: &str, segment: &str) -> Result<u32> {
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = segment.parse::<u32>() {
            return Ok(value);
        }
    }

    Err(ChangelogError::version(format!(
        "Invalid {} version in '{}': {}",
        name, input, segment
    )))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.is_prerelease() {
            write!(f, "-{}", self.prerelease)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Fourth, least significant component of the recency key.
///
/// Variant order is the ordering: within the same `major.minor.patch` a release is
/// newer than any preview, and a higher preview number is newer than a lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrereleaseRank {
    /// Prerelease tag without a `preview-N` number, ranked oldest
    Unnumbered,
    Preview(u32),
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub rank: PrereleaseRank,
}

/// Where a prerelease tag that is not `preview-N` sorts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnnumberedPrerelease {
    /// Same rank as the plain release of that version
    #[default]
    Release,
    /// Older than every preview of that version
    Oldest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("2.1.3").unwrap();
        assert_eq!(v.major, 2);
        assert_eq!(v.minor, 1);
        assert_eq!(v.patch, 3);
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_version_parse_prerelease() {
        let v = Version::parse("2.0.0-preview-10").unwrap();
        assert_eq!(v, Version::new(2, 0, 0).with_prerelease("preview-10"));
        assert_eq!(v.preview_number(), Some(10));
    }

    #[test]
    fn test_version_parse_prerelease_with_dots() {
        let v = Version::parse("1.0.0-rc.2").unwrap();
        assert_eq!(v.prerelease, "rc.2");
        assert_eq!(v.to_string(), "1.0.0-rc.2");
    }

    #[test]
    fn test_hyphen_outside_patch_is_not_a_delimiter() {
        assert!(Version::parse("1-x.2.3").is_err());
        assert!(Version::parse("1.2-x.3").is_err());
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("").is_err());
        assert!(Version::parse("a.b.c").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("1.2.-preview-1").is_err());
        assert!(Version::parse("1.2.3-").is_err());
        assert!(Version::parse("+1.2.3").is_err());
        assert!(Version::parse("1.+2.3").is_err());
        assert!(Version::parse("1.2.99999999999").is_err());
    }

    #[test]
    fn test_version_round_trip() {
        for input in ["2.1.0", "10.20.30", "2.0.0-preview-1", "1.11.2-rc1"] {
            assert_eq!(Version::parse(input).unwrap().to_string(), input);
        }
    }

    #[test]
    fn test_preview_number_absent_for_other_tags() {
        for input in ["1.0.0-beta", "1.0.0-preview-x", "1.0.0"] {
            let version = Version::parse(input).unwrap();
            assert_eq!(version.preview_number(), None);
        }
    }

    #[test]
    fn test_release_newer_than_preview() {
        let release = Version::parse("2.1.0").unwrap();
        let preview = Version::parse("2.1.0-preview-3").unwrap();
        assert_eq!(
            release.cmp_recency(&preview, UnnumberedPrerelease::Release),
            Ordering::Greater
        );
    }

    #[test]
    fn test_preview_numbers_compare_numerically() {
        let p2 = Version::parse("2.0.0-preview-2").unwrap();
        let p10 = Version::parse("2.0.0-preview-10").unwrap();
        assert_eq!(
            p10.cmp_recency(&p2, UnnumberedPrerelease::Release),
            Ordering::Greater
        );
    }

    #[test]
    fn test_triple_dominates_prerelease() {
        let old_release = Version::parse("2.0.9").unwrap();
        let new_preview = Version::parse("2.1.0-preview-1").unwrap();
        assert_eq!(
            new_preview.cmp_recency(&old_release, UnnumberedPrerelease::Release),
            Ordering::Greater
        );
    }

    #[test]
    fn test_unnumbered_prerelease_policy() {
        let beta = Version::parse("2.0.0-beta").unwrap();
        let release = Version::parse("2.0.0").unwrap();
        let preview = Version::parse("2.0.0-preview-1").unwrap();

        assert_eq!(
            beta.cmp_recency(&release, UnnumberedPrerelease::Release),
            Ordering::Equal
        );
        assert_eq!(
            beta.cmp_recency(&preview, UnnumberedPrerelease::Oldest),
            Ordering::Less
        );
    }

    #[test]
    fn test_sort_key_ordering_is_consistent() {
        let versions: Vec<Version> = ["1.0.0", "1.0.0-preview-1", "1.0.0-rc", "0.9.9", "1.0.1"]
            .iter()
            .map(|v| Version::parse(v).unwrap())
            .collect();

        for policy in [UnnumberedPrerelease::Release, UnnumberedPrerelease::Oldest] {
            for a in &versions {
                assert_eq!(a.cmp_recency(a, policy), Ordering::Equal);
                for b in &versions {
                    let forward = a.cmp_recency(b, policy);
                    assert_eq!(forward, b.cmp_recency(a, policy).reverse());
                    for c in &versions {
                        if a.cmp_recency(b, policy) == Ordering::Less
                            && b.cmp_recency(c, policy) == Ordering::Less
                        {
                            assert_eq!(a.cmp_recency(c, policy), Ordering::Less);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_version_from_str() {
        let v: Version = "3.4.5".parse().unwrap();
        assert_eq!(v, Version::new(3, 4, 5));
    }
}
