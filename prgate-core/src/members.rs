//! Repository member listing

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::host::ReviewHost;
use crate::Result;

/// Placeholder shown when a member has no public email
pub const EMAIL_PLACEHOLDER: &str = "N/A";

/// A collaborator with their repository role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub login: String,
    /// Profile name, or the login when no name is set
    pub display_name: String,
    pub email: Option<String>,
    /// Permission level; `None` when the lookup failed
    pub role: Option<String>,
    pub profile_url: Option<String>,
}

impl Member {
    pub fn email_or_placeholder(&self) -> &str {
        self.email.as_deref().unwrap_or(EMAIL_PLACEHOLDER)
    }

    pub fn role_or_unknown(&self) -> &str {
        self.role.as_deref().unwrap_or("unknown")
    }
}

/// List collaborators with their permission level
///
/// A failed permission lookup for one member is logged and that member is
/// reported without a role; it does not abort the listing.
pub async fn list_members(host: &dyn ReviewHost) -> Result<Vec<Member>> {
    let collaborators = host.list_collaborators().await?;
    debug!(count = collaborators.len(), "Fetched collaborators");

    let mut members = Vec::with_capacity(collaborators.len());
    for collaborator in collaborators {
        let role = match host.collaborator_permission(&collaborator.login).await {
            Ok(permission) => Some(permission),
            Err(e) => {
                warn!(login = %collaborator.login, error = %e, "Failed to fetch collaborator permission");
                None
            }
        };

        let display_name = collaborator
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| collaborator.login.clone());

        members.push(Member {
            login: collaborator.login,
            display_name,
            email: collaborator.email.filter(|e| !e.trim().is_empty()),
            role,
            profile_url: collaborator.profile_url,
        });
    }

    Ok(members)
}
