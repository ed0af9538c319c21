//! Release tag resolution for git repositories.
//!
//! Parses tags as semantic versions with a `+build.N` counter, picks the
//! latest one, and computes the next version for a bump kind.

pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod release;
pub mod remote;
pub mod resolver;
pub mod ui;

pub use domain::{PreRelease, RemoteTag, TagPattern, Version, VersionBump};
pub use error::{GitBumpError, Result};
pub use release::{ReleaseOptions, ReleaseOutcome, Releaser};
pub use resolver::TagResolver;
