//! Remote hosting API access
//!
//! The [RemoteTagSource] trait is what the tag resolver consumes when it has
//! to look at tags on a hosted repository rather than a local clone.
//! [github::GitHubTagSource] implements it over the GitHub REST API.

pub mod github;

pub use github::{owner_and_repo, GitHubTagSource};

use crate::domain::RemoteTag;
use crate::error::Result;

/// Lists the tags of a hosted repository together with their commits
///
/// Implementations must report rejected credentials as
/// [crate::error::GitBumpError::AccessDenied] so callers can tell it apart
/// from an empty tag list.
pub trait RemoteTagSource {
    fn remote_tags(&self) -> Result<Vec<RemoteTag>>;
}
