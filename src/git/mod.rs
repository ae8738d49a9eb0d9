//! Version-control staging abstraction
//!
//! Generated files are registered with the git index after they are written. The
//! [Repository] trait keeps that side effect behind a seam so workflows can run
//! against a real repository ([repository::Git2Repository]) or a recording
//! [mock::MockRepository] in tests.
//!
//! ```rust
//! # use sdk_changelog::git::Repository;
//! # use std::path::Path;
//! # fn example<R: Repository>(repo: &R) -> sdk_changelog::Result<()> {
//! repo.stage_path(Path::new("CHANGELOG.md"))?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::Path;

/// Index operations the changelog workflows need
///
/// Paths may be absolute or relative to the current directory; implementations
/// resolve them against the working tree.
pub trait Repository {
    /// Add the current contents of an existing file to the index
    ///
    /// # Returns
    /// * `Ok(())` - The file is staged
    /// * `Err` - The file is outside the working tree or the index cannot be written
    fn stage_path(&self, path: &Path) -> Result<()>;

    /// Record the deletion of a file that no longer exists in the working tree
    fn stage_removal(&self, path: &Path) -> Result<()>;
}
