use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while running a pipeline.
/// These are reported to the user; the run still completes.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineWarning {
    /// The released change-set directory does not exist
    MissingChangesDirectory { path: PathBuf },
    /// No unreleased fragments were found
    NoUnreleasedChanges { path: PathBuf },
    /// A service model has no documentation uid
    ModelWithoutUid { path: PathBuf },
    /// Two service models claim the same module with different client names
    DuplicateModule { module: String, path: PathBuf },
    /// A written file was not added to the git index
    StagingSkipped { path: PathBuf },
    /// A fragment bundled into a release could not be deleted and is still pending
    FragmentNotRemoved { path: PathBuf },
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineWarning::MissingChangesDirectory { path } => {
                write!(
                    f,
                    "Changes directory '{}' not found, no released versions included",
                    path.display()
                )
            }
            PipelineWarning::NoUnreleasedChanges { path } => {
                write!(f, "No unreleased changes in '{}'", path.display())
            }
            PipelineWarning::ModelWithoutUid { path } => {
                write!(
                    f,
                    "Service model '{}' has no uid and is left out of the uid mapping",
                    path.display()
                )
            }
            PipelineWarning::DuplicateModule { module, path } => {
                write!(
                    f,
                    "Module '{}' defined again by '{}', keeping the later client name",
                    module,
                    path.display()
                )
            }
            PipelineWarning::StagingSkipped { path } => {
                write!(f, "'{}' was not staged for commit", path.display())
            }
            PipelineWarning::FragmentNotRemoved { path } => {
                write!(
                    f,
                    "Fragment '{}' was released but could not be deleted, remove it by hand",
                    path.display()
                )
            }
        }
    }
}
