use crate::domain::prerelease::PreRelease;
use crate::error::{GitBumpError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Project-specific build counter, tracked outside the semver grammar
fn build_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\+build\.(\d+)").expect("build pattern is a valid regex"))
}

/// Semantic version with an optional `<letters><digits>` pre-release label
/// and a `+build.N` counter.
///
/// Values are immutable: fields are read through accessors and every
/// `increase_*` returns a new `Version`.
///
/// Ordering is major, minor, patch, then a release above any pre-release of
/// the same triple, then pre-release channel and counter, then build counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Option<PreRelease>,
    build: u64,
}

fn parse_build(digits: &str, raw: &str) -> Result<u64> {
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(GitBumpError::version(format!(
            "'{}': build counter has leading zeros",
            raw
        )));
    }
    digits
        .parse::<u64>()
        .map_err(|_| GitBumpError::version(format!("'{}': build counter out of range", raw)))
}

/// `value + 1`, or `InvalidVersionFormat` naming the field that overflows
fn increment(value: u64, field: &str, version: &Version) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| GitBumpError::version(format!("{} of '{}' overflows", field, version)))
}

impl Version {
    /// Create a release version without pre-release or build counter
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build: 0,
        }
    }

    /// The version used when a repository has no release tags yet
    pub fn initial() -> Self {
        Version::new(0, 0, 0)
    }

    /// Same version with the given pre-release label
    pub fn with_prerelease(self, prerelease: PreRelease) -> Self {
        Version {
            prerelease: Some(prerelease),
            ..self
        }
    }

    /// Same version with the given build counter
    pub fn with_build(self, build: u64) -> Self {
        Version { build, ..self }
    }

    /// Parse `MAJOR.MINOR.PATCH[-PRERELEASE][+build.N]`
    ///
    /// The base grammar is plain semver. A `+build.N` suffix anywhere in the
    /// metadata sets the build counter; other metadata is accepted and
    /// dropped.
    ///
    /// # Returns
    /// * `Err(InvalidVersionFormat)` - numeric triple missing or malformed, or a
    ///   build counter with leading zeros or out of `u64` range
    /// * `Err(InvalidPrereleaseFormat)` - pre-release is not `<letters><digits>`
    pub fn parse(raw: &str) -> Result<Self> {
        let base = semver::Version::parse(raw)
            .map_err(|e| GitBumpError::version(format!("'{}': {}", raw, e)))?;

        let prerelease = if base.pre.is_empty() {
            None
        } else {
            Some(PreRelease::parse(base.pre.as_str())?)
        };

        let build = match build_pattern().captures(raw) {
            Some(caps) => parse_build(&caps[1], raw)?,
            None => 0,
        };

        Ok(Version {
            major: base.major,
            minor: base.minor,
            patch: base.patch,
            prerelease,
            build,
        })
    }

    /// Canonical string form, same as `to_string()`
    pub fn format(&self) -> String {
        self.to_string()
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> Option<&PreRelease> {
        self.prerelease.as_ref()
    }

    /// The `+build.N` counter; 0 when absent
    pub fn build(&self) -> u64 {
        self.build
    }

    /// major + 1; everything finer is reset
    ///
    /// Every `increase_*` fails instead of wrapping when the incremented
    /// field is already `u64::MAX`.
    pub fn increase_major(&self) -> Result<Self> {
        Ok(Version::new(increment(self.major, "major", self)?, 0, 0))
    }

    /// minor + 1; patch reset, pre-release and build cleared
    pub fn increase_minor(&self) -> Result<Self> {
        Ok(Version::new(
            self.major,
            increment(self.minor, "minor", self)?,
            0,
        ))
    }

    /// patch + 1; pre-release and build cleared
    pub fn increase_patch(&self) -> Result<Self> {
        Ok(Version::new(
            self.major,
            self.minor,
            increment(self.patch, "patch", self)?,
        ))
    }

    /// Bump the pre-release counter, or start at `a1` when there is none.
    ///
    /// The numeric triple is never touched. Build is cleared.
    pub fn increase_prerelease(&self) -> Result<Self> {
        let prerelease = match &self.prerelease {
            Some(pr) => pr.increment()?,
            None => PreRelease::initial(),
        };

        Ok(Version::new(self.major, self.minor, self.patch).with_prerelease(prerelease))
    }

    /// build + 1; nothing else changes
    pub fn increase_build(&self) -> Result<Self> {
        Ok(Version {
            build: increment(self.build, "build", self)?,
            ..self.clone()
        })
    }

    /// Apply the given bump kind
    pub fn bump(&self, bump: VersionBump) -> Result<Self> {
        match bump {
            VersionBump::Major => self.increase_major(),
            VersionBump::Minor => self.increase_minor(),
            VersionBump::Patch => self.increase_patch(),
            VersionBump::Prerelease => self.increase_prerelease(),
            VersionBump::Build => self.increase_build(),
        }
    }

    /// Whether this version carries a pre-release label
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = GitBumpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pr) = &self.prerelease {
            write!(f, "-{}", pr)?;
        }
        if self.build > 0 {
            write!(f, "+build.{}", self.build)?;
        }
        Ok(())
    }
}

/// Version bump kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
    Prerelease,
    Build,
}

impl VersionBump {
    /// All bump kinds, coarsest first
    pub const ALL: [VersionBump; 5] = [
        VersionBump::Major,
        VersionBump::Minor,
        VersionBump::Patch,
        VersionBump::Prerelease,
        VersionBump::Build,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
            VersionBump::Prerelease => "prerelease",
            VersionBump::Build => "build",
        }
    }
}

impl FromStr for VersionBump {
    type Err = GitBumpError;

    fn from_str(s: &str) -> Result<Self> {
        VersionBump::ALL
            .into_iter()
            .find(|bump| bump.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GitBumpError::config(format!("Unknown bump kind: '{}'", s)))
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse_release() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
        assert_eq!(v.build(), 0);
        assert!(!v.is_prerelease());
    }

    #[test]
    fn test_version_parse_prerelease_and_build() {
        let v = Version::parse("0.0.1-a6+build.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (0, 0, 1));
        assert_eq!(v.prerelease, Some(PreRelease::new("a", 6)));
        assert_eq!(v.build, 3);
    }

    #[test]
    fn test_version_parse_foreign_metadata_is_dropped() {
        let v = Version::parse("1.0.0+sha.5114f85").unwrap();
        assert_eq!(v.build, 0);
        assert_eq!(v.to_string(), "1.0.0");
    }

    #[test]
    fn test_version_parse_invalid_triple() {
        for raw in ["1.2", "v1.2.3", "1.2.x", "", "not-a-version", "1.2.3.4"] {
            let err = Version::parse(raw).unwrap_err();
            assert!(
                matches!(err, GitBumpError::InvalidVersionFormat(_)),
                "'{}' gave {:?}",
                raw,
                err
            );
        }
    }

    #[test]
    fn test_version_parse_invalid_prerelease() {
        let err = Version::parse("1.0.0-rc.1").unwrap_err();
        assert!(matches!(err, GitBumpError::InvalidPrereleaseFormat(_)));
    }

    #[test]
    fn test_version_display_omits_zero_build() {
        assert_eq!(Version::parse("0.0.1-a5").unwrap().to_string(), "0.0.1-a5");
        assert_eq!(Version::new(2, 0, 0).with_build(0).format(), "2.0.0");
    }

    #[test]
    fn test_version_round_trip() {
        let versions = [
            Version::initial(),
            Version::new(3, 14, 15),
            Version::new(0, 0, 1).with_prerelease(PreRelease::new("a", 5)),
            Version::new(1, 2, 3)
                .with_prerelease(PreRelease::new("rc", 2))
                .with_build(7),
            Version::new(4, 0, 0).with_build(1),
        ];

        for v in versions {
            assert_eq!(Version::parse(&v.format()).unwrap(), v);
        }
    }

    #[test]
    fn test_increase_major_resets_everything_finer() {
        let v = Version::parse("1.2.3-a4+build.5").unwrap();
        assert_eq!(v.increase_major().unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_increase_minor_keeps_major() {
        let v = Version::parse("1.2.3-a4+build.5").unwrap();
        assert_eq!(v.increase_minor().unwrap(), Version::new(1, 3, 0));
    }

    #[test]
    fn test_increase_patch_clears_labels() {
        let v = Version::parse("1.2.3-a4+build.5").unwrap();
        assert_eq!(v.increase_patch().unwrap(), Version::new(1, 2, 4));
    }

    #[test]
    fn test_increase_prerelease_without_label_starts_at_a1() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.increase_prerelease().unwrap().to_string(), "1.2.3-a1");
    }

    #[test]
    fn test_increase_prerelease_keeps_triple_and_clears_build() {
        let v = Version::parse("1.2.3-b4+build.9").unwrap();
        let next = v.increase_prerelease().unwrap();
        assert_eq!((next.major, next.minor, next.patch), (1, 2, 3));
        assert_eq!(next.to_string(), "1.2.3-b5");
    }

    #[test]
    fn test_increase_build_only_touches_build() {
        let v = Version::parse("1.2.3-a4+build.5").unwrap();
        let next = v.increase_build().unwrap();
        assert_eq!(next.to_string(), "1.2.3-a4+build.6");
        assert_eq!(next.prerelease, v.prerelease);
    }

    #[test]
    fn test_increase_build_on_fresh_version() {
        assert_eq!(Version::new(1, 0, 0).increase_build().unwrap().to_string(),
            "1.0.0+build.1");
    }

    #[test]
    fn test_increase_does_not_mutate_original() {
        let v = Version::parse("0.0.1-a5").unwrap();
        let _ = v.increase_major().unwrap();
        let _ = v.increase_prerelease().unwrap();
        assert_eq!(v.to_string(), "0.0.1-a5");
    }

    #[test]
    fn test_bump_dispatch() {
        let v = Version::parse("0.0.1-a5").unwrap();
        assert_eq!(v.bump(VersionBump::Major).unwrap().to_string(), "1.0.0");
        assert_eq!(v.bump(VersionBump::Minor).unwrap().to_string(), "0.1.0");
        assert_eq!(v.bump(VersionBump::Patch).unwrap().to_string(), "0.0.2");
        assert_eq!(v.bump(VersionBump::Prerelease).unwrap().to_string(), "0.0.1-a6");
        assert_eq!(v.bump(VersionBump::Build).unwrap().to_string(), "0.0.1-a5+build.1");
    }

    #[test]
    fn test_increase_at_u64_max_fails() {
        let top = Version::parse("18446744073709551615.0.0").unwrap();
        let err = top.increase_major().unwrap_err();
        assert!(matches!(err, GitBumpError::InvalidVersionFormat(_)));
        assert_eq!(top.increase_minor().unwrap().to_string(), "18446744073709551615.1.0");

        let full = Version::new(1, 2, u64::MAX).with_build(u64::MAX);
        assert!(full.increase_patch().is_err());
        assert!(full.increase_build().is_err());
        assert!(full.bump(VersionBump::Build).is_err());
    }

    #[test]
    fn test_increase_prerelease_counter_at_u64_max_fails() {
        let v = Version::new(0, 0, 1).with_prerelease(PreRelease::new("a", u64::MAX));
        let err = v.increase_prerelease().unwrap_err();
        assert!(matches!(err, GitBumpError::InvalidPrereleaseFormat(_)));
    }

    #[test]
    fn test_version_parse_build_out_of_range() {
        let err = Version::parse("1.0.0+build.99999999999999999999").unwrap_err();
        assert!(matches!(err, GitBumpError::InvalidVersionFormat(_)));
        assert_eq!(
            Version::parse("1.0.0+build.18446744073709551615").unwrap().build(),
            u64::MAX
        );
    }

    #[test]
    fn test_version_parse_build_leading_zeros() {
        assert!(Version::parse("1.0.0+build.07").is_err());
        assert_eq!(Version::parse("1.0.0+build.0").unwrap(), Version::new(1, 0, 0));
    }

    #[test]
    fn test_version_parse_prerelease_leading_zeros() {
        let err = Version::parse("0.0.1-a05").unwrap_err();
        assert!(matches!(err, GitBumpError::InvalidPrereleaseFormat(_)));
    }

    #[test]
    fn test_ordering_release_above_prerelease() {
        let release = Version::parse("1.0.0").unwrap();
        let pre = Version::parse("1.0.0-a9").unwrap();
        assert!(release > pre);
        assert!(Version::parse("1.0.1-a1").unwrap() > release);
    }

    #[test]
    fn test_ordering_build_breaks_ties() {
        let plain = Version::parse("0.0.1-a6").unwrap();
        let built = Version::parse("0.0.1-a6+build.1").unwrap();
        assert!(built > plain);
        assert!(Version::parse("0.0.1-a7").unwrap() > built);
    }

    #[test]
    fn test_version_bump_from_str() {
        assert_eq!("major".parse::<VersionBump>().unwrap(), VersionBump::Major);
        assert_eq!(
            "Prerelease".parse::<VersionBump>().unwrap(),
            VersionBump::Prerelease
        );
        assert!("huge".parse::<VersionBump>().is_err());
    }

    #[test]
    fn test_version_bump_display() {
        for bump in VersionBump::ALL {
            assert_eq!(bump.to_string().parse::<VersionBump>().unwrap(), bump);
        }
    }
}
