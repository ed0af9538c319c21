use crate::domain::TagPattern;
use crate::error::Result;
use crate::remote::github::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "gitbump.toml";

/// Represents the complete configuration for git-bump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub github: GitHubConfig,
}

fn default_tag_pattern() -> String {
    "{version}".to_string()
}

fn default_tag_message() -> String {
    "no message".to_string()
}

fn default_remote_name() -> String {
    "origin".to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

/// How release tags are named and annotated.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TagConfig {
    /// Tag naming pattern; must contain `{version}`
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,

    /// Annotation message for created tags
    #[serde(default = "default_tag_message")]
    pub message: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        TagConfig {
            pattern: default_tag_pattern(),
            message: default_tag_message(),
        }
    }
}

impl TagConfig {
    /// The configured pattern, validated
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(&self.pattern)
    }
}

/// Which remote tags are pushed to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_name")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            name: default_remote_name(),
        }
    }
}

/// GitHub API access for remote tag lookups.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: default_api_url(),
            token_env: default_token_env(),
        }
    }
}

impl GitHubConfig {
    /// The token from the configured environment variable, if set and non-empty
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text)?;
    config.tag.tag_pattern()?;
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(format!(".{}", CONFIG_FILE_NAME)))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitbump.toml` in current directory
/// 3. `.gitbump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read, parsed, or has an invalid tag pattern
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => [Some(PathBuf::from(CONFIG_FILE_NAME)), user_config_path()]
            .into_iter()
            .flatten()
            .find(|candidate| candidate.exists()),
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            parse_config(&fs::read_to_string(&path)?)
        }
        None => Ok(Config::default()),
    }
}
