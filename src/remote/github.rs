use crate::domain::RemoteTag;
use crate::error::{GitBumpError, Result};
use crate::remote::RemoteTagSource;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, error};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
const BAD_CREDENTIALS: &str = "Bad credentials";

#[derive(Debug, Deserialize)]
struct GitHubTag {
    name: String,
    commit: GitHubCommit,
}

#[derive(Debug, Deserialize)]
struct GitHubCommit {
    sha: String,
}

impl From<GitHubTag> for RemoteTag {
    fn from(tag: GitHubTag) -> Self {
        RemoteTag::new(tag.name, tag.commit.sha)
    }
}

/// Tags of a GitHub repository, read through `GET /repos/{owner}/{repo}/tags`
pub struct GitHubTagSource {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
}

impl GitHubTagSource {
    /// Build a source for `owner/repo`
    ///
    /// # Arguments
    /// * `api_url` - API root, normally [DEFAULT_API_URL]
    /// * `token` - Sent as `Authorization: token <token>` when present
    pub fn new(
        api_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: Option<&str>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("git-bump"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("token {}", token))
                .map_err(|_| GitBumpError::config("GitHub token contains invalid characters"))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(GitHubTagSource {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    /// The tags endpoint, without paging parameters
    pub fn tags_url(&self) -> String {
        format!("{}/repos/{}/{}/tags", self.api_url, self.owner, self.repo)
    }

    fn fetch_page(&self, url: &str, page: usize) -> Result<Vec<RemoteTag>> {
        let response = self
            .client
            .get(url)
            .query(&[("per_page", PER_PAGE), ("page", page)])
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            error!(url, "invalid credentials");
            return Err(GitBumpError::access_denied(url));
        }

        let text = response.text()?;
        let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            if status.is_success() {
                GitBumpError::remote(format!("Unexpected response from {}: {}", url, e))
            } else {
                GitBumpError::remote(format!("{} returned {}", url, status))
            }
        })?;

        if body.get("message").and_then(serde_json::Value::as_str) == Some(BAD_CREDENTIALS) {
            error!(url, "invalid credentials");
            return Err(GitBumpError::access_denied(url));
        }

        if !status.is_success() {
            return Err(GitBumpError::remote(format!(
                "{} returned {}",
                url, status
            )));
        }

        let tags: Vec<GitHubTag> = serde_json::from_value(body)
            .map_err(|e| GitBumpError::remote(format!("Unexpected response from {}: {}", url, e)))?;

        Ok(tags.into_iter().map(RemoteTag::from).collect())
    }
}

impl RemoteTagSource for GitHubTagSource {
    fn remote_tags(&self) -> Result<Vec<RemoteTag>> {
        let url = self.tags_url();
        let mut tags = Vec::new();

        for page in 1.. {
            let batch = self.fetch_page(&url, page)?;
            let done = batch.len() < PER_PAGE;
            tags.extend(batch);
            if done {
                break;
            }
        }

        debug!(url = %url, count = tags.len(), "listed remote tags");
        Ok(tags)
    }
}

fn remote_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[a-z+]+://)?(?:[^@/]+@)?(?:www\.)?[^/:]+[/:]([^/]+)/([^/]+?)(?:\.git)?/?$")
            .expect("remote url pattern is a valid regex")
    })
}

/// Extract `(owner, repo)` from a hosted repository url
///
/// Understands `https://github.com/owner/repo(.git)` and
/// `git@github.com:owner/repo.git`.
pub fn owner_and_repo(url: &str) -> Option<(String, String)> {
    let caps = remote_url_pattern().captures(url.trim())?;
    Some((caps[1].to_string(), caps[2].to_string()))
}
