use crate::error::{GitBumpError, Result};
use crate::git::Repository;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MockState {
    tags: BTreeMap<String, String>,
    pushed: Vec<(String, String)>,
}

/// Mock repository for testing without actual git operations
///
/// Tags map to commit ids; created tags land on the configured HEAD and
/// pushes are only recorded.
#[derive(Debug)]
pub struct MockRepository {
    head: String,
    remotes: HashMap<String, String>,
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new mock repository whose HEAD is the given commit id
    pub fn new(head: impl Into<String>) -> Self {
        MockRepository {
            head: head.into(),
            remotes: HashMap::new(),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, sha: impl Into<String>) {
        self.state_mut().tags.insert(name.into(), sha.into());
    }

    /// Add a tag pointing to HEAD
    pub fn add_head_tag(&mut self, name: impl Into<String>) {
        let head = self.head.clone();
        self.add_tag(name, head);
    }

    /// Register a remote url
    pub fn add_remote(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.remotes.insert(name.into(), url.into());
    }

    /// Every (remote, tag) pair pushed so far
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.state().pushed.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("0000000000000000000000000000000000000000")
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.state().tags.keys().cloned().collect())
    }

    fn tags_at(&self, sha: &str) -> Result<Vec<String>> {
        Ok(self
            .state()
            .tags
            .iter()
            .filter(|(_, target)| target.as_str() == sha)
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn head_sha(&self) -> Result<String> {
        Ok(self.head.clone())
    }

    fn create_tag(&self, name: &str, _message: &str) -> Result<()> {
        let mut state = self.state();
        if state.tags.contains_key(name) {
            return Err(GitBumpError::TagExists(name.to_string()));
        }
        state.tags.insert(name.to_string(), self.head.clone());
        Ok(())
    }

    fn push_tags(&self, remote: &str, tag_names: &[&str]) -> Result<()> {
        if !self.remotes.contains_key(remote) {
            return Err(GitBumpError::remote(format!(
                "Cannot find remote '{}'",
                remote
            )));
        }

        let mut state = self.state();
        for tag in tag_names {
            if !state.tags.contains_key(*tag) {
                return Err(GitBumpError::tag(format!("No such tag: {}", tag)));
            }
            state.pushed.push((remote.to_string(), tag.to_string()));
        }
        Ok(())
    }

    fn remote_url(&self, remote: &str) -> Result<Option<String>> {
        Ok(self.remotes.get(remote).cloned())
    }
}
