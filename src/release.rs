//! Release workflow
//!
//! Ties the resolver to a repository: find the latest release tag, compute
//! the next version for a bump kind, and optionally tag and push it.

use crate::boundary::BoundaryWarning;
use crate::domain::{TagPattern, Version, VersionBump};
use crate::error::Result;
use crate::git::Repository;
use crate::resolver::TagResolver;
use tracing::{info, warn};

/// What `release` should do besides computing the version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    /// Create the tag locally
    pub tag: bool,
    /// Push the created tag to this remote
    pub push: Option<String>,
    /// Annotation message for the tag
    pub message: String,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        ReleaseOptions {
            tag: false,
            push: None,
            message: "no message".to_string(),
        }
    }
}

/// Result of a release computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// The latest tag before this release, if any
    pub previous_tag: Option<String>,
    /// The new version
    pub version: Version,
    /// The new tag name (the version formatted through the tag pattern)
    pub tag: String,
    /// Whether the tag was created
    pub tagged: bool,
    /// Whether the tag was pushed
    pub pushed: bool,
    /// Non-fatal conditions met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Computes and publishes release tags for one repository
pub struct Releaser<R: Repository> {
    repo: R,
    resolver: TagResolver,
}

impl<R: Repository> Releaser<R> {
    pub fn new(repo: R, resolver: TagResolver) -> Self {
        Releaser { repo, resolver }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn pattern(&self) -> &TagPattern {
        self.resolver.pattern()
    }

    /// The highest version tag in the repository
    pub fn latest_tag(&self) -> Result<Option<String>> {
        let tags = self.repo.list_tags()?;
        Ok(self.resolver.latest(&tags))
    }

    /// The highest version tag pointing at HEAD
    pub fn current_tag(&self) -> Result<Option<String>> {
        let head = self.repo.head_sha()?;
        let tags = self.repo.tags_at(&head)?;
        Ok(self.resolver.latest(&tags))
    }

    /// The version the next release gets for the given bump kind
    ///
    /// A repository without release tags starts at `0.0.0`; no bump is
    /// applied in that case.
    pub fn next_version(&self, bump: VersionBump) -> Result<Version> {
        Ok(self.plan(bump)?.1)
    }

    fn plan(&self, bump: VersionBump) -> Result<(Option<String>, Version)> {
        let latest = self.latest_tag()?;
        let version = match &latest {
            Some(tag) => self.resolver.pattern().parse_version(tag)?.bump(bump)?,
            None => Version::initial(),
        };
        Ok((latest, version))
    }

    /// Compute the next version and, as requested, tag and push it
    ///
    /// A push is only attempted for a tag created in this call.
    pub fn release(&self, bump: VersionBump, options: &ReleaseOptions) -> Result<ReleaseOutcome> {
        let (previous_tag, version) = self.plan(bump)?;
        let tag = self.resolver.pattern().format(&version);

        let mut warnings = Vec::new();
        if previous_tag.is_none() {
            warn!(version = %version, "no release tags found, starting from the initial version");
            warnings.push(BoundaryWarning::NoReleaseTags {
                initial: version.to_string(),
            });
        }

        let mut outcome = ReleaseOutcome {
            previous_tag,
            version,
            tag,
            tagged: false,
            pushed: false,
            warnings,
        };

        if !options.tag {
            return Ok(outcome);
        }

        self.repo.create_tag(&outcome.tag, &options.message)?;
        outcome.tagged = true;
        info!(tag = %outcome.tag, bump = %bump, "tagged release");

        if let Some(remote) = &options.push {
            self.repo.push_tags(remote, &[outcome.tag.as_str()])?;
            outcome.pushed = true;
        }

        Ok(outcome)
    }
}
