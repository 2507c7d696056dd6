//! In-memory [`ReviewHost`] for action tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use prgate_core::{
    ChangeRecord, Collaborator, Error, RequestState, RequestSummary, Result, ReviewHost,
};

#[derive(Default)]
pub struct StubHost {
    pub requests: Vec<RequestSummary>,
    pub changes: HashMap<u64, Vec<ChangeRecord>>,
    pub fail_collaborators: bool,
    writes: Mutex<Vec<(u64, String)>>,
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

impl StubHost {
    pub fn with_requests(requests: Vec<RequestSummary>) -> Self {
        Self {
            requests,
            ..Default::default()
        }
    }

    pub fn writes(&self) -> Vec<(u64, String)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewHost for StubHost {
    async fn get_request(&self, number: u64) -> Result<RequestSummary> {
        self.requests
            .iter()
            .find(|r| r.number == number)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("pull request #{number}")))
    }

    async fn list_requests_targeting(&self, target_branch: &str) -> Result<Vec<RequestSummary>> {
        Ok(self
            .requests
            .iter()
            .filter(|r| r.target_branch == target_branch)
            .cloned()
            .collect())
    }

    async fn list_changes(&self, number: u64) -> Result<Vec<ChangeRecord>> {
        Ok(self.changes.get(&number).cloned().unwrap_or_default())
    }

    async fn list_collaborators(&self) -> Result<Vec<Collaborator>> {
        if self.fail_collaborators {
            return Err(Error::Transient("connection reset".to_string()));
        }
        Ok(vec![Collaborator {
            login: "octocat".to_string(),
            name: None,
            email: None,
            profile_url: None,
        }])
    }

    async fn collaborator_permission(&self, _login: &str) -> Result<String> {
        Ok("admin".to_string())
    }

    async fn update_description(&self, number: u64, body: &str) -> Result<()> {
        self.writes.lock().unwrap().push((number, body.to_string()));
        Ok(())
    }
}
