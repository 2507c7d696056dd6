//! GitHub API client using octocrab

use crate::retry::with_retry;
use crate::{Error, Result};
use octocrab::Octocrab;
use prgate_core::RetryPolicy;
use std::future::Future;
use tracing::{debug, info};

/// GitHub API client for repository operations
pub struct GitHubClient {
    client: Octocrab,
    owner: String,
    repo: String,
    retry: RetryPolicy,
}

impl GitHubClient {
    /// Create a new GitHub client for the specified repository
    ///
    /// `api_url` overrides the API root for GitHub Enterprise
    /// (e.g. `https://github.example.com/api/v3`).
    pub fn new(
        token: &str,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_url: Option<&str>,
    ) -> Result<Self> {
        let owner = owner.into();
        let repo = repo.into();

        let token = token.trim();
        if token.is_empty() {
            return Err(Error::Auth("GitHub token is empty".to_string()));
        }

        let mut builder = Octocrab::builder().personal_token(token.to_string());
        if let Some(url) = api_url {
            builder = builder
                .base_uri(url)
                .map_err(|e| Error::Parse(format!("Invalid API URL {}: {}", url, e)))?;
        }

        let client = builder
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(owner = %owner, repo = %repo, "Created GitHub client");

        Ok(Self {
            client,
            owner,
            repo,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a GitHub client from a `--repo` value (see [`parse_repo_spec`])
    pub fn from_repo(token: &str, spec: &str, api_url: Option<&str>) -> Result<Self> {
        let (owner, repo) = parse_repo_spec(spec)?;
        Self::new(token, owner, repo, api_url)
    }

    /// Set the retry policy for API calls
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Repository as `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }

    /// Run an API call under the client's retry policy
    pub(crate) async fn call<T, F, Fut>(&self, operation: &str, call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        with_retry(&self.retry, operation, call).await
    }

    /// Test the connection by fetching repository info
    pub async fn test_connection(&self) -> Result<()> {
        debug!(
            owner = %self.owner,
            repo = %self.repo,
            "Testing GitHub connection"
        );

        let client = &self.client;
        let (owner, repo) = (self.owner.as_str(), self.repo.as_str());
        let full_name = &self.full_name();

        self.call("get repository", move || async move {
            client
                .repos(owner, repo)
                .get()
                .await
                .map_err(|e| match Error::from_octocrab("get repository", e) {
                    Error::Api { status: 404, .. } => Error::RepoNotFound(full_name.clone()),
                    other => other,
                })
        })
        .await?;

        info!("GitHub connection successful");
        Ok(())
    }

    /// Login of the user the token belongs to
    pub async fn current_user(&self) -> Result<String> {
        let client = &self.client;
        let user = self
            .call("get current user", move || async move {
                client
                    .current()
                    .user()
                    .await
                    .map_err(|e| Error::from_octocrab("get current user", e))
            })
            .await?;

        Ok(user.login)
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Split a `--repo` value into owner and repo
///
/// Accepts `owner/repo` (optionally ending in `.git`) or an http(s) URL
/// whose path is exactly `/owner/repo`.
pub fn parse_repo_spec(spec: &str) -> Result<(String, String)> {
    let spec = spec.trim();
    let invalid = || {
        Error::Parse(format!(
            "Invalid repository format: {}. Expected owner/repo",
            spec
        ))
    };

    let path = if spec.starts_with("https://") || spec.starts_with("http://") {
        let url = url::Url::parse(spec).map_err(|_| invalid())?;
        url.path().trim_matches('/').to_string()
    } else {
        spec.to_string()
    };

    let path = path.strip_suffix(".git").unwrap_or(&path);
    match path.split_once('/') {
        Some((owner, repo)) if is_name(owner) && is_name(repo) => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(invalid()),
    }
}

/// GitHub owner and repository names: ASCII alphanumerics, `-`, `_`, `.`
fn is_name(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
