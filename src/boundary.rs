use std::fmt;

/// Non-fatal conditions met while resolving or publishing tags.
/// These should be reported to the user, not treated as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// The repository has no version tags yet; the initial version is used
    NoReleaseTags { initial: String },
    /// No version tag points at the given commit
    NoTagAtCommit { commit: String },
    /// The token environment variable is unset, the API is queried anonymously
    MissingToken { env: String },
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoReleaseTags { initial } => {
                write!(f, "No release tags found, starting at {}", initial)
            }
            BoundaryWarning::NoTagAtCommit { commit } => {
                write!(f, "No release tag points at commit {}", short_hash(commit))
            }
            BoundaryWarning::MissingToken { env } => {
                write!(f, "{} is not set, querying the API without credentials", env)
            }
        }
    }
}
