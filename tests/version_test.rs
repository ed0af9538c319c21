// tests/version_test.rs
use git_bump::{GitBumpError, TagResolver, Version, VersionBump};

fn v(raw: &str) -> Version {
    Version::parse(raw).unwrap()
}

// ============================================================================
// Literal scenarios
// ============================================================================

#[test]
fn test_prerelease_bump_scenario() {
    assert_eq!(v("0.0.1-a5").increase_prerelease().unwrap().to_string(), "0.0.1-a6");
}

#[test]
fn test_build_bump_scenario() {
    assert_eq!(v("0.0.1-a6").increase_build().unwrap().to_string(), "0.0.1-a6+build.1");
    assert_eq!(
        v("0.0.1-a6+build.1").increase_build().unwrap().to_string(),
        "0.0.1-a6+build.2"
    );
}

#[test]
fn test_prerelease_bump_on_release_starts_channel() {
    assert_eq!(v("1.4.2").increase_prerelease().unwrap().to_string(), "1.4.2-a1");
}

#[test]
fn test_prerelease_bump_clears_build() {
    assert_eq!(
        v("0.0.1-a6+build.3").increase_prerelease().unwrap().to_string(),
        "0.0.1-a7"
    );
}

#[test]
fn test_release_bumps_reset_lower_fields() {
    let base = v("1.2.3-b4+build.5");
    assert_eq!(base.increase_major().unwrap().to_string(), "2.0.0");
    assert_eq!(base.increase_minor().unwrap().to_string(), "1.3.0");
    assert_eq!(base.increase_patch().unwrap().to_string(), "1.2.4");
}

#[test]
fn test_bump_dispatch_matches_named_operations() {
    let base = v("0.3.9-a2");
    assert_eq!(base.bump(VersionBump::Major).unwrap(), base.increase_major().unwrap());
    assert_eq!(base.bump(VersionBump::Minor).unwrap(), base.increase_minor().unwrap());
    assert_eq!(base.bump(VersionBump::Patch).unwrap(), base.increase_patch().unwrap());
    assert_eq!(base.bump(VersionBump::Prerelease).unwrap(), base.increase_prerelease().unwrap());
    assert_eq!(base.bump(VersionBump::Build).unwrap(), base.increase_build().unwrap());
}

#[test]
fn test_version_bump_parses_names() {
    for bump in VersionBump::ALL {
        assert_eq!(bump.to_string().parse::<VersionBump>().unwrap(), bump);
    }
    assert_eq!("PATCH".parse::<VersionBump>().unwrap(), VersionBump::Patch);
    assert!("hotfix".parse::<VersionBump>().is_err());
}

// ============================================================================
// Parse failures
// ============================================================================

#[test]
fn test_invalid_triple_is_version_error() {
    for raw in ["", "1", "1.2", "1.2.x", "v1.2.3", "one.two.three"] {
        assert!(
            matches!(Version::parse(raw), Err(GitBumpError::InvalidVersionFormat(_))),
            "{} should be rejected",
            raw
        );
    }
}

#[test]
fn test_invalid_prerelease_is_prerelease_error() {
    for raw in ["1.0.0-rc", "1.0.0-5", "1.0.0-rc.1", "1.0.0-a1b"] {
        assert!(
            matches!(
                Version::parse(raw),
                Err(GitBumpError::InvalidPrereleaseFormat(_))
            ),
            "{} should be rejected",
            raw
        );
    }
}

#[test]
fn test_foreign_build_metadata_is_ignored() {
    assert_eq!(v("1.0.0+sha.abc"), Version::new(1, 0, 0));
}

#[test]
fn test_bump_past_u64_max_is_an_error() {
    let top = v("18446744073709551615.0.0");
    assert!(matches!(
        top.increase_major(),
        Err(GitBumpError::InvalidVersionFormat(_))
    ));
    assert!(top.bump(VersionBump::Major).is_err());
    assert!(v("0.0.1-a18446744073709551615")
        .increase_prerelease()
        .is_err());
}

#[test]
fn test_oversized_build_counter_is_rejected() {
    assert!(matches!(
        Version::parse("1.0.0+build.99999999999999999999"),
        Err(GitBumpError::InvalidVersionFormat(_))
    ));

    let tags = ["1.0.0+build.99999999999999999999", "1.0.0+build.2"];
    assert_eq!(TagResolver::new().latest(&tags), Some("1.0.0+build.2".to_string()));
}

#[test]
fn test_leading_zero_counters_are_not_release_tags() {
    let tags = ["0.0.1-a05", "0.0.1-a4", "0.0.1-a4+build.01"];
    assert_eq!(TagResolver::new().latest(&tags), Some("0.0.1-a4".to_string()));
}

// ============================================================================
// Properties
// ============================================================================

fn samples() -> Vec<Version> {
    [
        "0.0.0",
        "0.0.1-a5",
        "0.0.1-a6+build.1",
        "1.2.3",
        "1.2.3+build.9",
        "10.20.30-beta12",
        "3.0.0-rc0+build.2",
    ]
    .iter()
    .map(|raw| v(raw))
    .collect()
}

#[test]
fn test_format_round_trips() {
    for version in samples() {
        assert_eq!(Version::parse(&version.format()).unwrap(), version);
    }
}

#[test]
fn test_release_bumps_are_monotonic() {
    for version in samples() {
        assert!(version.increase_major().unwrap() > version);
        assert!(version.increase_minor().unwrap() > version);
        assert!(version.increase_patch().unwrap() > version);
        assert!(version.increase_build().unwrap() > version);

        let major = version.increase_major().unwrap();
        assert_eq!((major.minor(), major.patch()), (0, 0));
        assert_eq!(version.increase_minor().unwrap().patch(), 0);
    }
}

#[test]
fn test_prerelease_and_build_bumps_keep_triple() {
    for version in samples() {
        let pre = version.increase_prerelease().unwrap();
        assert_eq!(
            (pre.major(), pre.minor(), pre.patch()),
            (version.major(), version.minor(), version.patch())
        );
        assert_eq!(pre.build(), 0);

        let build = version.increase_build().unwrap();
        assert_eq!(build.build(), version.build() + 1);
        assert_eq!(build.prerelease(), version.prerelease());
        assert_eq!(
            (build.major(), build.minor(), build.patch()),
            (version.major(), version.minor(), version.patch())
        );
    }
}

#[test]
fn test_resolver_follows_version_order() {
    let mut versions = samples();
    versions.sort();
    let tags: Vec<String> = versions.iter().map(Version::to_string).collect();
    let highest = versions.last().map(Version::to_string);
    assert_eq!(TagResolver::new().latest(&tags), highest);
}
