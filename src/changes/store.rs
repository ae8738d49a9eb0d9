use crate::domain::{ChangelogEntry, RawEntry, RawRelease, ReleaseChanges, Version};
use crate::error::{ChangelogError, Result};
use crate::output::write_atomic;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Turn a category into a file-name friendly slug ("Amazon S3" -> "Amazon-S3")
pub fn category_slug(category: &str) -> String {
    category
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Fragment file name for an entry: `<type>-<category-slug>-<timestamp>.json`
pub fn fragment_file_name<Tz>(entry: &ChangelogEntry, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{}-{}-{}.json",
        entry.kind,
        category_slug(&entry.category),
        now.format("%Y%m%d%H%M%S%3f")
    )
}

/// Write one unreleased entry fragment into `dir`.
///
/// Category and description must not be blank. The directory is created when missing;
/// a numeric suffix keeps the file name unique.
pub fn write_fragment<Tz>(dir: &Path, entry: &ChangelogEntry, now: &DateTime<Tz>) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if entry.category.trim().is_empty() {
        return Err(ChangelogError::invalid_entry("category must not be empty"));
    }
    if entry.description.trim().is_empty() {
        return Err(ChangelogError::invalid_entry(
            "description must not be empty",
        ));
    }

    let file_name = fragment_file_name(entry, now);
    let mut path = dir.join(&file_name);
    let stem = file_name.trim_end_matches(".json").to_string();
    let mut suffix = 1;
    while path.exists() {
        path = dir.join(format!("{}-{}.json", stem, suffix));
        suffix += 1;
    }

    write_atomic(&path, &to_json(&RawEntry::from(entry))?)?;
    tracing::info!(path = %path.display(), kind = %entry.kind, "wrote change fragment");
    Ok(path)
}

/// Location of the release document for `version`
pub fn release_path(changes_dir: &Path, version: &Version) -> PathBuf {
    changes_dir.join(format!("{}.json", version))
}

/// Write a released change-set as `<changes_dir>/<version>.json`.
///
/// Refuses to overwrite an existing release document.
pub fn write_release(changes_dir: &Path, release: &ReleaseChanges) -> Result<PathBuf> {
    let version = release
        .version
        .as_ref()
        .ok_or_else(|| ChangelogError::release("cannot write a change-set without a version"))?;

    let path = release_path(changes_dir, version);
    if path.exists() {
        return Err(ChangelogError::release(format!(
            "release file already exists: {}",
            path.display()
        )));
    }

    write_atomic(&path, &to_json(&RawRelease::from(release))?)?;
    tracing::info!(path = %path.display(), %version, "wrote release document");
    Ok(path)
}

/// Delete consumed fragment files, carrying on past files that cannot be deleted.
///
/// Returns the fragments that are still on disk. A fragment that is already gone
/// counts as removed.
pub fn remove_fragments(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut remaining = Vec::new();
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed fragment"),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot remove fragment");
                remaining.push(path.clone());
            }
        }
    }
    remaining
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| ChangelogError::invalid_entry(format!("cannot serialize: {}", e)))?;
    json.push('\n');
    Ok(json)
}
