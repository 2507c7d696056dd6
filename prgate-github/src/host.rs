//! [`ReviewHost`] implementation backed by the GitHub REST API

use async_trait::async_trait;
use prgate_core::{ChangeRecord, Collaborator, RequestSummary, ReviewHost};

use crate::GitHubClient;

#[async_trait]
impl ReviewHost for GitHubClient {
    async fn get_request(&self, number: u64) -> prgate_core::Result<RequestSummary> {
        Ok(self.get_pr(number).await?)
    }

    async fn list_requests_targeting(
        &self,
        target_branch: &str,
    ) -> prgate_core::Result<Vec<RequestSummary>> {
        Ok(self.list_prs_targeting(target_branch).await?)
    }

    async fn list_changes(&self, number: u64) -> prgate_core::Result<Vec<ChangeRecord>> {
        Ok(self.list_pr_files(number).await?)
    }

    async fn list_collaborators(&self) -> prgate_core::Result<Vec<Collaborator>> {
        Ok(GitHubClient::list_collaborators(self).await?)
    }

    async fn collaborator_permission(&self, login: &str) -> prgate_core::Result<String> {
        Ok(GitHubClient::collaborator_permission(self, login).await?)
    }

    async fn update_description(&self, number: u64, body: &str) -> prgate_core::Result<()> {
        Ok(self.update_pr_body(number, body).await?)
    }
}
