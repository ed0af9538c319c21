//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the Git operations the
//! release workflow needs: enumerating tags, finding the tags that point at a
//! commit, creating annotated tags and pushing them.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations.
//!
//! ```rust
//! # use git_bump::git::Repository;
//! # use git_bump::TagResolver;
//! # fn example<R: Repository>(repo: &R) -> git_bump::Result<()> {
//! let tags = repo.list_tags()?;
//! let latest = TagResolver::new().latest(&tags);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Common git operation trait
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::GitBumpError] variants. Creating a tag that already exists
/// must fail with [crate::error::GitBumpError::TagExists].
pub trait Repository: Send {
    /// Get all tag names in the repository
    ///
    /// Order is unspecified; callers rank tags themselves.
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Get the names of the tags whose target is the given commit
    ///
    /// Both lightweight and annotated tags are considered.
    ///
    /// # Arguments
    /// * `sha` - Full hex commit id
    fn tags_at(&self, sha: &str) -> Result<Vec<String>>;

    /// Get the full hex id of the commit HEAD points at
    fn head_sha(&self) -> Result<String>;

    /// Create an annotated tag on HEAD
    ///
    /// # Arguments
    /// * `name` - Name for the new tag
    /// * `message` - Tag message
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err(TagExists)` - If a tag with that name exists already
    fn create_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push tags to remote
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    /// * `tag_names` - Tags to push
    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()>;

    /// Get the url of a remote, or `None` if there is no such remote
    fn remote_url(&self, remote: &str) -> Result<Option<String>>;
}
