use crate::error::{ChangelogError, Result};
use crate::git::Repository;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock repository that records staging calls instead of touching an index
#[derive(Default)]
pub struct MockRepository {
    staged: Mutex<Vec<PathBuf>>,
    removed: Mutex<Vec<PathBuf>>,
    fail_staging: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose staging calls always fail
    pub fn failing() -> Self {
        MockRepository {
            fail_staging: true,
            ..Self::default()
        }
    }

    /// Paths passed to `stage_path`, in call order
    pub fn staged_paths(&self) -> Vec<PathBuf> {
        self.staged.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Paths passed to `stage_removal`, in call order
    pub fn removed_paths(&self) -> Vec<PathBuf> {
        self.removed.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, list: &Mutex<Vec<PathBuf>>, path: &Path) -> Result<()> {
        if self.fail_staging {
            return Err(ChangelogError::staging(format!(
                "mock staging failure: {}",
                path.display()
            )));
        }
        list.lock()
            .map_err(|_| ChangelogError::staging("mock repository lock poisoned"))?
            .push(path.to_path_buf());
        Ok(())
    }
}

impl Repository for MockRepository {
    fn stage_path(&self, path: &Path) -> Result<()> {
        self.record(&self.staged, path)
    }

    fn stage_removal(&self, path: &Path) -> Result<()> {
        self.record(&self.removed, path)
    }
}
