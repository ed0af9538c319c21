//! Latest-tag resolution
//!
//! Picks the single highest release tag out of an unordered set of tag
//! names. Tags that do not parse as versions are not release tags and are
//! skipped rather than reported.

use crate::domain::{RemoteTag, TagPattern, Version};
use crate::error::Result;
use crate::remote::RemoteTagSource;
use std::cmp::Ordering;
use tracing::debug;

/// A tag that parsed as a version, kept only while ranking
#[derive(Debug, Clone)]
struct TagEntry<'a> {
    version: Version,
    raw: &'a str,
}

impl TagEntry<'_> {
    /// Version order first; the raw name only separates tags carrying equal versions
    fn rank(&self, other: &Self) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.raw.cmp(other.raw))
    }
}

/// Selects the latest version tag
#[derive(Debug, Clone, Default)]
pub struct TagResolver {
    pattern: TagPattern,
}

impl TagResolver {
    /// Resolver for tags that are bare versions (`1.2.3`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver for tags named after a pattern such as `v{version}`
    pub fn with_pattern(pattern: TagPattern) -> Self {
        TagResolver { pattern }
    }

    pub fn pattern(&self) -> &TagPattern {
        &self.pattern
    }

    fn entry<'a>(&self, raw: &'a str) -> Option<TagEntry<'a>> {
        match self.pattern.parse_version(raw) {
            Ok(version) => Some(TagEntry { version, raw }),
            Err(e) => {
                debug!(tag = raw, error = %e, "skipping non-release tag");
                None
            }
        }
    }

    fn highest<'a>(&self, tags: impl Iterator<Item = &'a str>) -> Option<TagEntry<'a>> {
        tags.filter_map(|raw| self.entry(raw))
            .max_by(|a, b| a.rank(b))
    }

    /// The raw name of the highest version tag, or `None` when no tag parses
    ///
    /// # Example
    /// ```
    /// use git_bump::TagResolver;
    ///
    /// let resolver = TagResolver::new();
    /// let tags = ["0.0.1-a5", "0.0.1-a6", "0.0.1", "0.0.2"];
    /// assert_eq!(resolver.latest(&tags), Some("0.0.2".to_string()));
    /// ```
    pub fn latest<S: AsRef<str>>(&self, tags: &[S]) -> Option<String> {
        self.highest(tags.iter().map(|tag| tag.as_ref()))
            .map(|entry| entry.raw.to_string())
    }

    /// Like [`TagResolver::latest`] but returns the parsed version
    pub fn latest_version<S: AsRef<str>>(&self, tags: &[S]) -> Option<Version> {
        self.highest(tags.iter().map(|tag| tag.as_ref()))
            .map(|entry| entry.version)
    }

    /// The highest version tag among those pointing at `target_sha`
    pub fn latest_matching_commit(
        &self,
        candidates: &[RemoteTag],
        target_sha: &str,
    ) -> Option<String> {
        self.highest(
            candidates
                .iter()
                .filter(|tag| tag.commit_sha == target_sha)
                .map(|tag| tag.name.as_str()),
        )
        .map(|entry| entry.raw.to_string())
    }

    /// Fetch tags from a remote source and pick the highest one at `target_sha`
    ///
    /// Source failures, including rejected credentials, are returned as-is so
    /// callers can tell "no matching tag" from "could not query".
    pub fn latest_remote<R: RemoteTagSource + ?Sized>(
        &self,
        source: &R,
        target_sha: &str,
    ) -> Result<Option<String>> {
        let candidates = source.remote_tags()?;
        debug!(count = candidates.len(), sha = target_sha, "fetched remote tags");
        Ok(self.latest_matching_commit(&candidates, target_sha))
    }
}
