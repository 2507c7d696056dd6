//! Pull request reads and description updates

use crate::{Error, GitHubClient, Result};
use octocrab::models::pulls::PullRequest as OctocrabPR;
use octocrab::models::IssueState;
use octocrab::params;
use prgate_core::{ChangeRecord, RequestState, RequestSummary};
use tracing::{debug, info};

/// Page size for list calls (GitHub maximum)
const PER_PAGE: u8 = 100;

/// Convert an octocrab pull request into the gate's projection
pub(crate) fn summarize(pr: OctocrabPR) -> RequestSummary {
    let closed = matches!(pr.state, Some(IssueState::Closed));
    let merged = pr.merged_at.is_some();

    RequestSummary {
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        body: pr.body.unwrap_or_default(),
        url: pr.html_url.map(|u| u.to_string()).unwrap_or_default(),
        source_branch: pr.head.ref_field,
        target_branch: pr.base.ref_field,
        state: RequestState::from_flags(closed, merged),
    }
}

impl GitHubClient {
    /// Get a pull request by number
    pub async fn get_pr(&self, number: u64) -> Result<RequestSummary> {
        debug!(number, "Fetching pull request");

        let client = self.client();
        let (owner, repo) = (self.owner(), self.repo());

        let pr = self
            .call("get pull request", move || async move {
                client
                    .pulls(owner, repo)
                    .get(number)
                    .await
                    .map_err(|e| match Error::from_octocrab("get pull request", e) {
                        Error::Api { status: 404, .. } => Error::PrNotFound(number),
                        other => other,
                    })
            })
            .await?;

        Ok(summarize(pr))
    }

    /// List pull requests in any state based on `base`, following all pages
    pub async fn list_prs_targeting(&self, base: &str) -> Result<Vec<RequestSummary>> {
        debug!(base, "Listing pull requests by base branch");

        let client = self.client();
        let (owner, repo) = (self.owner(), self.repo());

        let prs = self
            .call("list pull requests", move || async move {
                let first = client
                    .pulls(owner, repo)
                    .list()
                    .state(params::State::All)
                    .base(base)
                    .per_page(PER_PAGE)
                    .send()
                    .await
                    .map_err(|e| Error::from_octocrab("list pull requests", e))?;

                client
                    .all_pages(first)
                    .await
                    .map_err(|e| Error::from_octocrab("list pull requests", e))
            })
            .await?;

        let result: Vec<RequestSummary> = prs.into_iter().map(summarize).collect();
        info!(base, count = result.len(), "Fetched pull requests");

        Ok(result)
    }

    /// List per-file line changes of a pull request, following all pages
    pub async fn list_pr_files(&self, number: u64) -> Result<Vec<ChangeRecord>> {
        debug!(number, "Listing pull request files");

        let client = self.client();
        let (owner, repo) = (self.owner(), self.repo());

        let entries = self
            .call("list pull request files", move || async move {
                let first = client
                    .pulls(owner, repo)
                    .list_files(number)
                    .await
                    .map_err(|e| match Error::from_octocrab("list pull request files", e) {
                        Error::Api { status: 404, .. } => Error::PrNotFound(number),
                        other => other,
                    })?;

                client
                    .all_pages(first)
                    .await
                    .map_err(|e| Error::from_octocrab("list pull request files", e))
            })
            .await?;

        let files: Vec<ChangeRecord> = entries
            .into_iter()
            .map(|entry| ChangeRecord::new(entry.filename, entry.additions, entry.deletions))
            .collect();

        debug!(number, count = files.len(), "Fetched pull request files");
        Ok(files)
    }

    /// Replace a pull request's description
    pub async fn update_pr_body(&self, number: u64, body: &str) -> Result<()> {
        debug!(number, len = body.len(), "Updating pull request body");

        let client = self.client();
        let (owner, repo) = (self.owner(), self.repo());

        self.call("update pull request", move || async move {
            client
                .pulls(owner, repo)
                .update(number)
                .body(body)
                .send()
                .await
                .map_err(|e| match Error::from_octocrab("update pull request", e) {
                    Error::Api { status: 404, .. } => Error::PrNotFound(number),
                    other => other,
                })
        })
        .await?;

        info!(number, "Updated pull request body");
        Ok(())
    }
}
