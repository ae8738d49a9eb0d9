use crate::domain::{ChangelogEntry, RawEntry, RawRelease, ReleaseChanges};
use crate::error::{ChangelogError, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// List the `*.json` files directly inside `dir`, sorted by file name.
///
/// A missing directory yields an empty list; sub-directories are skipped.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every unreleased entry fragment in `dir`.
///
/// # Returns
/// * `Ok(None)` - The directory is absent or holds no fragments
/// * `Ok(Some(changes))` - Unreleased change-set dated `date`
/// * `Err` - A fragment is malformed
pub fn load_unreleased(dir: &Path, date: &str) -> Result<Option<ReleaseChanges>> {
    let files = list_json_files(dir)?;
    if files.is_empty() {
        tracing::debug!(dir = %dir.display(), "no unreleased changes");
        return Ok(None);
    }

    let entries = files
        .iter()
        .map(|path| load_entry(path))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(dir = %dir.display(), count = entries.len(), "loaded unreleased entries");
    Ok(Some(ReleaseChanges::unreleased(date, entries)))
}

/// Load every released change-set document in `dir`, in file-name order
pub fn load_released(dir: &Path) -> Result<Vec<ReleaseChanges>> {
    let releases = list_json_files(dir)?
        .iter()
        .map(|path| load_release(path))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(dir = %dir.display(), count = releases.len(), "loaded released change-sets");
    Ok(releases)
}

/// Parse and validate a single entry fragment
pub fn load_entry(path: &Path) -> Result<ChangelogEntry> {
    let raw: RawEntry = read_json(path)?;
    ChangelogEntry::try_from(raw).map_err(|e| e.in_file(path))
}

/// Parse and validate a single release document
pub fn load_release(path: &Path) -> Result<ReleaseChanges> {
    let raw: RawRelease = read_json(path)?;
    ReleaseChanges::try_from(raw).map_err(|e| e.in_file(path))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| ChangelogError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntryType, Version};
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_unreleased_dir_is_none() {
        let dir = TempDir::new().unwrap();
        let next = dir.path().join("next-release");
        let result = load_unreleased(&next, "2024-01-01").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_unreleased_dir_is_none() {
        let dir = TempDir::new().unwrap();
        let result = load_unreleased(dir.path(), "2024-01-01").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_unreleased_entries() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "b.json",
            r#"{"type":"bugfix","category":"S3","description":"Fix Y","contributor":"alice"}"#,
        );
        write(
            dir.path(),
            "a.json",
            r#"{"type": "feature", "category": "S3", "description": "Add X"}"#,
        );
        write(dir.path(), "notes.txt", "ignored");

        let changes = load_unreleased(dir.path(), "2024-01-01").unwrap().unwrap();
        assert!(changes.is_unreleased());
        assert_eq!(changes.date, "2024-01-01");
        assert_eq!(changes.entries.len(), 2);
        assert_eq!(changes.entries[0].kind, EntryType::Feature);
        assert_eq!(changes.entries[1].contributor.as_deref(), Some("alice"));
    }

    #[test]
    fn test_malformed_fragment_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.json", r#"{"type": "feature","#);

        let err = load_unreleased(dir.path(), "2024-01-01").unwrap_err();
        assert!(matches!(err, ChangelogError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "odd.json",
            r#"{"type": "improvement", "category": "S3", "description": "Add X"}"#,
        );

        let err = load_unreleased(dir.path(), "2024-01-01").unwrap_err();
        match err {
            ChangelogError::InFile { path, source } => {
                assert!(path.ends_with("odd.json"));
                assert!(matches!(*source, ChangelogError::UnknownType(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_released_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "2.0.0.json",
            r#"{"version": "2.0.0", "date": "2024-01-01", "entries": []}"#,
        );
        write(
            &dir.path().join("next-release"),
            "a.json",
            r#"{"type": "feature", "category": "S3", "description": "Add X"}"#,
        );

        let releases = load_released(dir.path()).unwrap();
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].version, Some(Version::new(2, 0, 0)));
    }

    #[test]
    fn test_missing_released_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let releases = load_released(&dir.path().join(".changes")).unwrap();
        assert!(releases.is_empty());
    }

    #[test]
    fn test_release_missing_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "2.0.0.json",
            r#"{"version": "2.0.0", "entries": []}"#,
        );

        let err = load_released(dir.path()).unwrap_err();
        assert!(err.to_string().contains("date"));
    }
}
