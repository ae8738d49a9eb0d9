//! Workflow orchestration
//!
//! Each subcommand is one sequential pass over the files named in [Config]. The
//! workflows here are independent of clap and of the terminal: callers pass in the
//! already-resolved configuration, the current date and an optional repository for
//! staging, and get back a result value plus any [PipelineWarning]s to show the user.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::changes::{list_json_files, load_entry, load_released, load_unreleased};
use crate::changes::{remove_fragments, write_fragment, write_release};
use crate::config::Config;
use crate::crosslink::{scan_services, CrosslinkTables};
use crate::domain::{sort_releases, ChangelogEntry, ReleaseChanges, Version};
use crate::error::{ChangelogError, Result};
use crate::git::Repository;
use crate::output::write_atomic;
use crate::render::MarkdownWriter;
use crate::warning::PipelineWarning;

/// Date format used in change-set documents and changelog headers
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Result of a changelog generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResult {
    /// File the changelog was written to
    pub output: PathBuf,

    /// Number of released versions in the document
    pub releases: usize,

    /// Number of unreleased entries at the top of the document
    pub unreleased_entries: usize,

    /// Whether the output was added to the index
    pub staged: bool,

    pub warnings: Vec<PipelineWarning>,
}

/// Result of bundling the unreleased fragments into a release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseResult {
    pub version: Version,

    /// The new `<version>.json` document
    pub path: PathBuf,

    /// Entries moved into the release, in fragment file-name order
    pub entries: Vec<ChangelogEntry>,

    /// Fragment files that were deleted
    pub removed: Vec<PathBuf>,

    pub staged: bool,

    pub warnings: Vec<PipelineWarning>,
}

/// Result of cross-link generation
#[derive(Debug, Clone, PartialEq)]
pub struct CrosslinkResult {
    pub output: PathBuf,
    pub tables: CrosslinkTables,
    pub warnings: Vec<PipelineWarning>,
}

/// Parse a `YYYY-MM-DD` date given on the command line
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|e| ChangelogError::release(format!("invalid date '{}': {}", input, e)))
}

/// Regenerate the changelog from the unreleased fragments and all released change-sets.
///
/// # Arguments
/// * `config` - Resolved configuration; `paths.changelog` is the output file
/// * `repo` - Repository to stage the output in, `None` when staging is disabled
/// * `today` - Date shown for the unreleased change-set
///
/// # Returns
/// * `Ok(GenerateResult)` - The whole document was written
/// * `Err` - A change-set could not be loaded or the output could not be written
pub fn run_generate(
    config: &Config,
    repo: Option<&dyn Repository>,
    today: NaiveDate,
) -> Result<GenerateResult> {
    let paths = &config.paths;
    let mut warnings = Vec::new();

    if !paths.changes_dir.is_dir() {
        warnings.push(PipelineWarning::MissingChangesDirectory {
            path: paths.changes_dir.clone(),
        });
    }

    let date = today.format(DATE_FORMAT).to_string();
    let unreleased = load_unreleased(&paths.next_release_dir, &date)?;
    let unreleased_entries = unreleased.as_ref().map_or(0, |u| u.entries.len());
    if unreleased.is_none() {
        warnings.push(PipelineWarning::NoUnreleasedChanges {
            path: paths.next_release_dir.clone(),
        });
    }

    let released = load_released(&paths.changes_dir)?;
    let release_count = released.len();
    let ordered = sort_releases(unreleased, released, config.changelog.unnumbered_prerelease);

    let document =
        MarkdownWriter::new(&config.changelog.unreleased_placeholder).render_document(&ordered);
    write_atomic(&paths.changelog, &document)?;
    tracing::info!(
        path = %paths.changelog.display(),
        releases = release_count,
        unreleased = unreleased_entries,
        "wrote changelog"
    );

    let staged = stage(repo, &[paths.changelog.clone()], &[], &mut warnings);

    Ok(GenerateResult {
        output: paths.changelog.clone(),
        releases: release_count,
        unreleased_entries,
        staged,
        warnings,
    })
}

/// Record one unreleased change as a fragment in the unreleased directory
pub fn run_new_change<Tz>(
    config: &Config,
    entry: &ChangelogEntry,
    now: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    write_fragment(&config.paths.next_release_dir, entry, now)
}

/// Move every unreleased fragment into a new `<version>.json` release document.
///
/// Fails without touching any file when the version is invalid, there is nothing to
/// release, or the release document already exists. Fragments that cannot be deleted
/// once the release is written are reported as warnings and left unstaged.
pub fn run_release(
    config: &Config,
    version: &str,
    date: NaiveDate,
    repo: Option<&dyn Repository>,
) -> Result<ReleaseResult> {
    let version = Version::parse(version)?;
    let paths = &config.paths;

    let fragments = list_json_files(&paths.next_release_dir)?;
    if fragments.is_empty() {
        return Err(ChangelogError::release(format!(
            "no unreleased changes in {}",
            paths.next_release_dir.display()
        )));
    }

    let entries = fragments
        .iter()
        .map(|path| load_entry(path))
        .collect::<Result<Vec<_>>>()?;

    let release = ReleaseChanges::released(
        version.clone(),
        date.format(DATE_FORMAT).to_string(),
        entries,
    );
    let path = write_release(&paths.changes_dir, &release)?;
    let remaining = remove_fragments(&fragments);
    tracing::info!(%version, entries = release.entries.len(), "bundled release");

    let (leftover, removed) = split_leftovers(fragments, &remaining);
    let mut warnings = leftover;
    let staged = stage(repo, &[path.clone()], &removed, &mut warnings);

    Ok(ReleaseResult {
        version,
        path,
        entries: release.entries,
        removed,
        staged,
        warnings,
    })
}

/// Write the documentation redirect page with the uid and client-name tables
pub fn run_crosslinks(config: &Config) -> Result<CrosslinkResult> {
    let settings = &config.crosslinks;

    let template = &settings.template;
    let template_text = fs::read_to_string(template).map_err(|e| {
        ChangelogError::template(format!("cannot read {}: {}", template.display(), e))
    })?;

    let models = scan_services(&settings.services_root)?;
    let (tables, warnings) = CrosslinkTables::from_models(&models);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let html = tables.render(&template_text)?;
    write_atomic(&settings.output, &html)?;
    tracing::info!(
        path = %settings.output.display(),
        services = tables.module_to_client.len(),
        "wrote cross-link page"
    );

    Ok(CrosslinkResult {
        output: settings.output.clone(),
        tables,
        warnings,
    })
}

/// Separate deleted fragments from those still on disk, which become warnings
fn split_leftovers(
    fragments: Vec<PathBuf>,
    remaining: &[PathBuf],
) -> (Vec<PipelineWarning>, Vec<PathBuf>) {
    let (left, removed): (Vec<_>, Vec<_>) = fragments
        .into_iter()
        .partition(|path| remaining.contains(path));
    let warnings = left
        .into_iter()
        .map(|path| PipelineWarning::FragmentNotRemoved { path })
        .collect();

    (warnings, removed)
}

/// Stage written and deleted files; failures become warnings.
///
/// Returns true only when every path was staged.
fn stage(
    repo: Option<&dyn Repository>,
    added: &[PathBuf],
    removed: &[PathBuf],
    warnings: &mut Vec<PipelineWarning>,
) -> bool {
    let Some(repo) = repo else {
        tracing::debug!("staging disabled");
        for path in added {
            let path = path.clone();
            warnings.push(PipelineWarning::StagingSkipped { path });
        }
        return false;
    };

    let mut all_staged = true;
    let mut skip = |path: &Path, err: ChangelogError| {
        tracing::warn!(path = %path.display(), error = %err, "staging failed");
        warnings.push(PipelineWarning::StagingSkipped {
            path: path.to_path_buf(),
        });
        all_staged = false;
    };

    for path in added {
        if let Err(err) = repo.stage_path(path) {
            skip(path, err);
        }
    }
    for path in removed {
        if let Err(err) = repo.stage_removal(path) {
            skip(path, err);
        }
    }

    all_staged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("2023-02-29").is_err());
        assert!(parse_date("29/02/2024").is_err());
    }

    #[test]
    fn test_stage_without_repository_warns() {
        let mut warnings = Vec::new();
        let added = [PathBuf::from("CHANGELOG.md")];
        let staged = stage(None, &added, &[], &mut warnings);

        assert!(!staged);
        assert_eq!(
            warnings,
            vec![PipelineWarning::StagingSkipped {
                path: PathBuf::from("CHANGELOG.md")
            }]
        );
    }

    #[test]
    fn test_stage_records_additions_and_removals() {
        let repo = MockRepository::new();
        let mut warnings = Vec::new();
        let staged = stage(
            Some(&repo),
            &[PathBuf::from(".changes/2.1.0.json")],
            &[PathBuf::from(".changes/next-release/a.json")],
            &mut warnings,
        );

        assert!(staged);
        assert!(warnings.is_empty());
        assert_eq!(
            repo.staged_paths(),
            vec![PathBuf::from(".changes/2.1.0.json")]
        );
        assert_eq!(
            repo.removed_paths(),
            vec![PathBuf::from(".changes/next-release/a.json")]
        );
    }

    #[test]
    fn test_stage_failure_is_a_warning() {
        let repo = MockRepository::failing();
        let mut warnings = Vec::new();
        let added = [PathBuf::from("CHANGELOG.md")];
        let staged = stage(Some(&repo), &added, &[], &mut warnings);

        assert!(!staged);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_fragments_left_behind_are_warnings() {
        let fragments = vec![
            PathBuf::from("next-release/a.json"),
            PathBuf::from("next-release/b.json"),
        ];
        let remaining = [PathBuf::from("next-release/b.json")];

        let (warnings, removed) = split_leftovers(fragments, &remaining);

        assert_eq!(removed, vec![PathBuf::from("next-release/a.json")]);
        assert_eq!(
            warnings,
            vec![PipelineWarning::FragmentNotRemoved {
                path: PathBuf::from("next-release/b.json")
            }]
        );
    }
}
