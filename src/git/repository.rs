use crate::error::{ChangelogError, Result};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Path of `path` relative to the working tree root.
    ///
    /// Only the parent directory is canonicalized, so this also works for files that
    /// have just been deleted.
    fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let workdir = match self.repo.workdir() {
            Some(workdir) => workdir.canonicalize()?,
            None => return Err(ChangelogError::staging("repository has no working tree")),
        };

        let file_name = path.file_name().ok_or_else(|| {
            ChangelogError::staging(format!("not a file path: {}", path.display()))
        })?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let absolute = parent.canonicalize()?.join(file_name);

        absolute
            .strip_prefix(&workdir)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ChangelogError::staging(format!(
                    "{} is outside the repository at {}",
                    path.display(),
                    workdir.display()
                ))
            })
    }
}

impl super::Repository for Git2Repository {
    fn stage_path(&self, path: &Path) -> Result<()> {
        let relative = self.relative_path(path)?;
        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;

        tracing::debug!(path = %relative.display(), "staged");
        Ok(())
    }

    fn stage_removal(&self, path: &Path) -> Result<()> {
        let relative = self.relative_path(path)?;
        let mut index = self.repo.index()?;
        if index.get_path(&relative, 0).is_some() {
            index.remove_path(&relative)?;
            index.write()?;
            tracing::debug!(path = %relative.display(), "staged removal");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        (dir, Git2Repository::from_git2(repo))
    }

    #[test]
    fn test_stage_new_file() {
        let (dir, repo) = init_repo();
        let file = dir.path().join("CHANGELOG.md");
        fs::write(&file, "# 1.0.0 2024-01-01\n").unwrap();

        repo.stage_path(&file).unwrap();

        let index = repo.repo.index().unwrap();
        assert!(index.get_path(Path::new("CHANGELOG.md"), 0).is_some());
    }

    #[test]
    fn test_stage_nested_file_and_removal() {
        let (dir, repo) = init_repo();
        let nested = dir.path().join(".changes/next-release");
        fs::create_dir_all(&nested).unwrap();
        let file = nested.join("feature-S3-1.json");
        fs::write(&file, "{}").unwrap();

        repo.stage_path(&file).unwrap();
        fs::remove_file(&file).unwrap();
        repo.stage_removal(&file).unwrap();

        let index = repo.repo.index().unwrap();
        assert!(index
            .get_path(Path::new(".changes/next-release/feature-S3-1.json"), 0)
            .is_none());
    }

    #[test]
    fn test_stage_outside_repository_fails() {
        let (_dir, repo) = init_repo();
        let other = TempDir::new().unwrap();
        let file = other.path().join("x.md");
        fs::write(&file, "x").unwrap();

        let err = repo.stage_path(&file).unwrap_err();
        assert!(matches!(err, ChangelogError::Staging(_)));
        assert!(err.to_string().contains("is outside the repository"));
    }

    #[test]
    fn test_stage_in_bare_repository_fails() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repository::from_git2(Git2Repo::init_bare(dir.path()).unwrap());

        let file = dir.path().join("CHANGELOG.md");

        let err = repo.stage_path(&file).unwrap_err();
        assert!(matches!(err, ChangelogError::Staging(_)));
        assert!(err.to_string().starts_with("Staging failed"));
    }
}
