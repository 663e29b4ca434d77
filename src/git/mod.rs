//! Git operations abstraction layer
//!
//! The [Repository] trait covers the handful of git queries the version
//! incrementer needs. Implementations:
//!
//! - [repository::Git2Repository]: a real repository through the `git2` crate
//! - [mock::MockRepository]: fixed tags and branch for tests
//!
//! ```rust
//! # use release_scripts::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> release_scripts::Result<()> {
//! let branch = repo.current_branch()?;
//! let tags = repo.list_tags()?;
//! println!("{} tags visible from {}", tags.len(), branch);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// All methods return [crate::error::Result<T>]; implementations map
/// `git2::Error` and friends onto [crate::error::ReleaseError].
pub trait Repository {
    /// Get all tag names in the repository
    ///
    /// Order is unspecified; callers sort by version precedence.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Short name of the checked-out branch
    ///
    /// Returns `"HEAD"` when HEAD is detached, matching
    /// `git rev-parse --abbrev-ref HEAD`.
    fn current_branch(&self) -> Result<String>;

    /// Fetch all tags from a remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    fn fetch_tags(&self, remote: &str) -> Result<()>;
}
