use thiserror::Error;

/// Unified error type for git-bump operations
#[derive(Error, Debug)]
pub enum GitBumpError {
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    #[error("Invalid prerelease format: {0}")]
    InvalidPrereleaseFormat(String),

    #[error("Bad credentials accessing {url}")]
    AccessDenied { url: String },

    #[error("Tag already exists: {0}")]
    TagExists(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-bump
pub type Result<T> = std::result::Result<T, GitBumpError>;

impl GitBumpError {
    /// Create a version format error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitBumpError::InvalidVersionFormat(msg.into())
    }

    /// Create a prerelease format error with context
    pub fn prerelease(msg: impl Into<String>) -> Self {
        GitBumpError::InvalidPrereleaseFormat(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitBumpError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitBumpError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitBumpError::Config(msg.into())
    }

    /// Create an access denied error for the given API url
    pub fn access_denied(url: impl Into<String>) -> Self {
        GitBumpError::AccessDenied { url: url.into() }
    }

    /// Whether the remote side rejected our credentials
    pub fn is_access_denied(&self) -> bool {
        matches!(self, GitBumpError::AccessDenied { .. })
    }
}
