//! Domain logic - pure versioning rules independent of git operations

pub mod prerelease;
pub mod tag;
pub mod version;

pub use prerelease::PreRelease;
pub use tag::{RemoteTag, TagPattern};
pub use version::{Version, VersionBump};
