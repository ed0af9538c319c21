use crate::error::{GitBumpError, Result};
use git2::{Cred, CredentialType, ErrorCode, Oid, Repository as Git2Repo, Signature};
use std::path::Path;
use tracing::{debug, info};

const FALLBACK_NAME: &str = "git-bump";
const FALLBACK_EMAIL: &str = "git-bump@localhost";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Working directory of the repository, if it is not bare
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Tagger identity from git config, or a fixed fallback when none is configured
    fn signature(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(signature) => Ok(signature),
            Err(e) => {
                debug!(error = %e, "no configured identity, using fallback tagger");
                Ok(Signature::now(FALLBACK_NAME, FALLBACK_EMAIL)?)
            }
        }
    }

    fn tag_exists(&self, name: &str) -> bool {
        self.repo
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok()
    }
}

/// Key files under ~/.ssh first, then the SSH agent, then git's defaults
fn credentials(
    username_from_url: Option<&str>,
    allowed_types: CredentialType,
) -> std::result::Result<Cred, git2::Error> {
    let username = username_from_url.unwrap_or("git");

    if allowed_types.contains(CredentialType::SSH_KEY) {
        if let Some(home) = dirs::home_dir() {
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let path = home.join(".ssh").join(key);
                if path.exists() {
                    if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                        return Ok(cred);
                    }
                }
            }
        }

        if let Ok(cred) = Cred::ssh_key_from_agent(username) {
            return Ok(cred);
        }
    }

    Cred::default()
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn tags_at(&self, sha: &str) -> Result<Vec<String>> {
        let target = Oid::from_str(sha)
            .map_err(|e| GitBumpError::tag(format!("Invalid commit id '{}': {}", sha, e)))?;

        let mut matching = Vec::new();
        for name in self.list_tags()? {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // Tags on trees or blobs never match a commit
            if let Ok(commit) = reference.peel_to_commit() {
                if commit.id() == target {
                    matching.push(name);
                }
            }
        }

        Ok(matching)
    }

    fn head_sha(&self) -> Result<String> {
        let head = self.repo.head()?.peel_to_commit()?;
        Ok(head.id().to_string())
    }

    fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.tag_exists(name) {
            return Err(GitBumpError::TagExists(name.to_string()));
        }

        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = self.signature()?;

        self.repo
            .tag(name, head.as_object(), &tagger, message, false)
            .map_err(|e| match e.code() {
                ErrorCode::Exists => GitBumpError::TagExists(name.to_string()),
                _ => GitBumpError::tag(format!("Cannot create tag '{}': {}", name, e)),
            })?;

        info!(tag = name, commit = %head.id(), "created tag");
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| GitBumpError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            credentials(username_from_url, allowed_types)
        });
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspecs: Vec<String> = tag_names
            .iter()
            .map(|tag| format!("refs/tags/{}:refs/tags/{}", tag, tag))
            .collect();

        remote_handle
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    GitBumpError::remote(format!("Network error during push: {}", e))
                }
                _ => GitBumpError::remote(format!("Push to '{}' failed: {}", remote, e)),
            })?;

        info!(remote, tags = ?tag_names, "pushed tags");
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        match self.repo.find_remote(remote) {
            Ok(handle) => Ok(handle.url().map(|url| url.to_string())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
