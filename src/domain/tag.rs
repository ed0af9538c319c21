use crate::domain::version::Version;
use crate::error::{GitBumpError, Result};

const PLACEHOLDER: &str = "{version}";

/// A tag as reported by a remote hosting API: its name and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTag {
    pub name: String,
    pub commit_sha: String,
}

impl RemoteTag {
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        RemoteTag {
            name: name.into(),
            commit_sha: commit_sha.into(),
        }
    }
}

/// Tag naming pattern (e.g., "{version}", "v{version}", "release-{version}")
///
/// The default pattern is the bare version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagPattern {
    prefix: String,
    suffix: String,
}

impl TagPattern {
    /// Create a tag pattern; it must contain `{version}` exactly once
    pub fn new(pattern: &str) -> Result<Self> {
        let (prefix, suffix) = pattern.split_once(PLACEHOLDER).ok_or_else(|| {
            GitBumpError::config(format!(
                "Tag pattern '{}' must contain {{version}} placeholder",
                pattern
            ))
        })?;

        if suffix.contains(PLACEHOLDER) {
            return Err(GitBumpError::config(format!(
                "Tag pattern '{}' contains {{version}} more than once",
                pattern
            )));
        }

        Ok(TagPattern {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        format!("{}{}{}", self.prefix, version, self.suffix)
    }

    /// The version part of a tag, if the tag follows this pattern
    /// Example: pattern="v{version}", tag="v1.2.3" -> Some("1.2.3")
    pub fn version_part<'a>(&self, tag: &'a str) -> Option<&'a str> {
        tag.strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
            .filter(|part| !part.is_empty())
    }

    /// Parse the version carried by a tag following this pattern
    pub fn parse_version(&self, tag: &str) -> Result<Version> {
        let part = self.version_part(tag).ok_or_else(|| {
            GitBumpError::version(format!("'{}' does not match tag pattern '{}'", tag, self))
        })?;
        Version::parse(part)
    }
}

impl std::fmt::Display for TagPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.prefix, PLACEHOLDER, self.suffix)
    }
}
