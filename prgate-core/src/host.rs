//! Review hosting service contract
//!
//! [`ReviewHost`] is the set of calls the gate makes against the hosting
//! service. The GitHub implementation lives in `prgate-github`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Lifecycle state of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Open,
    Closed,
    Merged,
}

impl RequestState {
    /// Derive the state from the service's closed and merged flags
    pub fn from_flags(closed: bool, merged: bool) -> Self {
        match (closed, merged) {
            (true, true) => RequestState::Merged,
            (true, false) => RequestState::Closed,
            (false, _) => RequestState::Open,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestState::Open => "open",
            RequestState::Closed => "closed",
            RequestState::Merged => "merged",
        }
    }
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only projection of a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSummary {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// PR description (empty when unset)
    pub body: String,
    /// Web URL of the PR
    pub url: String,
    /// Head branch name
    pub source_branch: String,
    /// Base branch name
    pub target_branch: String,
    pub state: RequestState,
}

/// Per-file diff statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: String,
    pub added: u64,
    pub removed: u64,
}

impl ChangeRecord {
    pub fn new(path: impl Into<String>, added: u64, removed: u64) -> Self {
        Self {
            path: path.into(),
            added,
            removed,
        }
    }

    /// Changed lines in this file
    pub fn lines(&self) -> u64 {
        self.added + self.removed
    }
}

/// A repository collaborator as reported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub login: String,
    /// Profile display name, if set
    pub name: Option<String>,
    /// Public email, if set
    pub email: Option<String>,
    pub profile_url: Option<String>,
}

/// Operations the gate needs from a review hosting service
#[async_trait]
pub trait ReviewHost: Send + Sync {
    /// Fetch a pull request by number
    async fn get_request(&self, number: u64) -> Result<RequestSummary>;

    /// List pull requests in any state whose base branch is `target_branch`,
    /// in the order the service returns them
    async fn list_requests_targeting(&self, target_branch: &str) -> Result<Vec<RequestSummary>>;

    /// List per-file changes of a pull request
    async fn list_changes(&self, number: u64) -> Result<Vec<ChangeRecord>>;

    /// List repository collaborators
    async fn list_collaborators(&self) -> Result<Vec<Collaborator>>;

    /// Permission level of a collaborator (admin, write, read, ...)
    async fn collaborator_permission(&self, login: &str) -> Result<String>;

    /// Replace a pull request's description
    async fn update_description(&self, number: u64, body: &str) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory [`ReviewHost`] that records calls

    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::*;
    use crate::Error;

    #[derive(Default)]
    pub struct FakeHost {
        pub requests: Vec<RequestSummary>,
        pub changes: HashMap<u64, Vec<ChangeRecord>>,
        pub collaborators: Vec<Collaborator>,
        pub permissions: HashMap<String, String>,
        pub failing_permissions: HashSet<String>,
        pub fail_listing: bool,
        pub change_fetches: Mutex<Vec<u64>>,
        pub writes: Mutex<Vec<(u64, String)>>,
    }

    pub fn request(
        number: u64,
        title: &str,
        source: &str,
        target: &str,
        state: RequestState,
    ) -> RequestSummary {
        RequestSummary {
            number,
            title: title.to_string(),
            body: String::new(),
            url: format!("https://github.com/acme/app/pull/{number}"),
            source_branch: source.to_string(),
            target_branch: target.to_string(),
            state,
        }
    }

    impl FakeHost {
        pub fn with_requests(requests: Vec<RequestSummary>) -> Self {
            Self {
                requests,
                ..Default::default()
            }
        }

        pub fn writes(&self) -> Vec<(u64, String)> {
            self.writes.lock().unwrap().clone()
        }

        pub fn change_fetches(&self) -> Vec<u64> {
            self.change_fetches.lock().unwrap().clone()
        }

        /// Apply recorded writes to the stored requests, as the service would
        pub fn commit_writes(&mut self) {
            let writes = self.writes();
            for (number, body) in writes {
                if let Some(pr) = self.requests.iter_mut().find(|r| r.number == number) {
                    pr.body = body;
                }
            }
        }
    }

    #[async_trait]
    impl ReviewHost for FakeHost {
        async fn get_request(&self, number: u64) -> Result<RequestSummary> {
            self.requests
                .iter()
                .find(|r| r.number == number)
                .cloned()
                .ok_or_else(|| Error::NotFound(format!("pull request #{number}")))
        }

        async fn list_requests_targeting(&self, target_branch: &str) -> Result<Vec<RequestSummary>> {
            if self.fail_listing {
                return Err(Error::Transient("listing failed".to_string()));
            }
            Ok(self
                .requests
                .iter()
                .filter(|r| r.target_branch == target_branch)
                .cloned()
                .collect())
        }

        async fn list_changes(&self, number: u64) -> Result<Vec<ChangeRecord>> {
            self.change_fetches.lock().unwrap().push(number);
            Ok(self.changes.get(&number).cloned().unwrap_or_default())
        }

        async fn list_collaborators(&self) -> Result<Vec<Collaborator>> {
            if self.fail_listing {
                return Err(Error::Transient("listing failed".to_string()));
            }
            Ok(self.collaborators.clone())
        }

        async fn collaborator_permission(&self, login: &str) -> Result<String> {
            if self.failing_permissions.contains(login) {
                return Err(Error::Transient(format!("permission lookup for {login}")));
            }
            Ok(self
                .permissions
                .get(login)
                .cloned()
                .unwrap_or_else(|| "read".to_string()))
        }

        async fn update_description(&self, number: u64, body: &str) -> Result<()> {
            self.writes.lock().unwrap().push((number, body.to_string()));
            Ok(())
        }
    }
}
