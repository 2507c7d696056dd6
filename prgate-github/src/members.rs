//! Repository collaborators and their permissions

use crate::{Error, GitHubClient, Result};
use prgate_core::Collaborator;
use serde::Deserialize;
use tracing::{debug, warn};

/// Subset of `GET /users/{login}`
#[derive(Debug, Deserialize)]
struct UserProfile {
    name: Option<String>,
    email: Option<String>,
}

/// Subset of `GET /repos/{owner}/{repo}/collaborators/{login}/permission`
#[derive(Debug, Deserialize)]
struct PermissionLevel {
    permission: String,
}

impl GitHubClient {
    /// List collaborators with their profile name and public email
    ///
    /// A profile that cannot be fetched leaves name and email empty.
    pub async fn list_collaborators(&self) -> Result<Vec<Collaborator>> {
        debug!(repo = %self.full_name(), "Listing collaborators");

        let client = self.client();
        let (owner, repo) = (self.owner(), self.repo());

        let entries = self
            .call("list collaborators", move || async move {
                let first = client
                    .repos(owner, repo)
                    .list_collaborators()
                    .per_page(100)
                    .send()
                    .await
                    .map_err(|e| Error::from_octocrab("list collaborators", e))?;

                client
                    .all_pages(first)
                    .await
                    .map_err(|e| Error::from_octocrab("list collaborators", e))
            })
            .await?;

        let mut collaborators = Vec::with_capacity(entries.len());
        for entry in entries {
            let login = entry.author.login;
            let profile = match self.user_profile(&login).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(login = %login, error = %e, "Failed to fetch user profile");
                    None
                }
            };
            let (name, email) = profile.map_or((None, None), |p| (p.name, p.email));

            collaborators.push(Collaborator {
                profile_url: Some(entry.author.html_url.to_string()),
                login,
                name,
                email,
            });
        }

        Ok(collaborators)
    }

    /// Permission level of a collaborator (admin, maintain, write, triage, read)
    pub async fn collaborator_permission(&self, login: &str) -> Result<String> {
        let client = self.client();
        let route = format!(
            "/repos/{}/{}/collaborators/{}/permission",
            self.owner(),
            self.repo(),
            login
        );
        let route = route.as_str();

        let level: PermissionLevel = self
            .call("get collaborator permission", move || async move {
                client
                    .get(route, None::<&()>)
                    .await
                    .map_err(|e| Error::from_octocrab("get collaborator permission", e))
            })
            .await?;

        Ok(level.permission)
    }

    async fn user_profile(&self, login: &str) -> Result<UserProfile> {
        let client = self.client();
        let route = format!("/users/{}", login);
        let route = route.as_str();

        self.call("get user profile", move || async move {
            client
                .get(route, None::<&()>)
                .await
                .map_err(|e| Error::from_octocrab("get user profile", e))
        })
        .await
    }
}
