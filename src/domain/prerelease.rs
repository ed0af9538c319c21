//! Pre-release labels of the form `<channel><counter>`
//!
//! A label such as `a5` is an alphabetic channel (`a`) followed by a numeric
//! counter (`5`). Ordering is by channel, then by counter.

use crate::error::{GitBumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Channel used when a release gets its first pre-release label
pub const DEFAULT_CHANNEL: &str = "a";

/// Pre-release label with a channel and an iteration counter
///
/// # Examples
/// - "a5" -> PreRelease { channel: "a", counter: 5 }
/// - "rc12" -> PreRelease { channel: "rc", counter: 12 }
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreRelease {
    /// Alphabetic channel, e.g. `a`
    pub channel: String,
    /// Numeric counter within the channel
    pub counter: u64,
}

impl PreRelease {
    /// Create a new pre-release label
    pub fn new(channel: impl Into<String>, counter: u64) -> Self {
        PreRelease {
            channel: channel.into(),
            counter,
        }
    }

    /// The label given to a version that had none: `a1`
    pub fn initial() -> Self {
        PreRelease::new(DEFAULT_CHANNEL, 1)
    }

    /// Parse a pre-release label
    ///
    /// Accepts one or more ASCII letters followed by one or more digits.
    ///
    /// # Returns
    /// * `Ok(PreRelease)` - Parsed label
    /// * `Err(InvalidPrereleaseFormat)` - Anything else, including dotted labels like `rc.1`
    ///   and counters with leading zeros like `a05`
    pub fn parse(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (channel, digits) = s.split_at(split);

        if channel.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(GitBumpError::prerelease(format!(
                "'{}' - expected <letters><digits>, e.g. a5",
                s
            )));
        }

        if digits.len() > 1 && digits.starts_with('0') {
            return Err(GitBumpError::prerelease(format!(
                "'{}' - counter has leading zeros",
                s
            )));
        }

        let counter = digits.parse::<u64>().map_err(|_| {
            GitBumpError::prerelease(format!("Counter out of range in '{}'", s))
        })?;

        Ok(PreRelease::new(channel, counter))
    }

    /// Increment the counter, keeping the channel
    ///
    /// Fails with `InvalidPrereleaseFormat` when the counter is already `u64::MAX`.
    pub fn increment(&self) -> Result<Self> {
        let counter = self.counter.checked_add(1).ok_or_else(|| {
            GitBumpError::prerelease(format!("Counter of '{}' overflows", self))
        })?;

        Ok(PreRelease {
            channel: self.channel.clone(),
            counter,
        })
    }
}

impl FromStr for PreRelease {
    type Err = GitBumpError;

    fn from_str(s: &str) -> Result<Self> {
        PreRelease::parse(s)
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.channel, self.counter)
    }
}
