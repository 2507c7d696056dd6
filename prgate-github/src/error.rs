//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Repository not found or not accessible
    #[error("Repository {0} not found or not accessible")]
    RepoNotFound(String),

    /// Pull request not found
    #[error("Pull request #{0} not found")]
    PrNotFound(u64),

    /// Rate limit exceeded
    #[error("GitHub rate limit exceeded: {0}")]
    RateLimited(String),

    /// Transport failure before GitHub answered
    #[error("Network error during {operation}: {message}")]
    Network { operation: String, message: String },

    /// GitHub answered with an error status
    #[error("{operation} failed with status {status}: {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
    },

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether retrying the same call may succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Network { .. } | Error::RateLimited(_) => true,
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Classify an octocrab error for `operation`
    pub fn from_octocrab(operation: &str, error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => classify_status(
                operation,
                source.status_code.as_u16(),
                &source.message,
                source.documentation_url.as_deref(),
            ),
            octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. } => Error::Network {
                operation: operation.to_string(),
                message: error.to_string(),
            },
            other => Error::Other(format!("{} failed: {}", operation, other)),
        }
    }
}

/// Map an HTTP error status from GitHub to an [`Error`]
pub(crate) fn classify_status(
    operation: &str,
    status: u16,
    message: &str,
    documentation_url: Option<&str>,
) -> Error {
    let rate_limited = matches!(status, 403 | 429)
        && (message.to_lowercase().contains("rate limit")
            || documentation_url.is_some_and(|url| url.contains("rate-limit")));

    if rate_limited {
        return Error::RateLimited(format!("{}: {}", operation, message));
    }

    match status {
        401 | 403 => Error::Auth(format!(
            "{} failed: GitHub returned {} {}",
            operation, status, message
        )),
        _ => Error::Api {
            operation: operation.to_string(),
            status,
            message: message.to_string(),
        },
    }
}

impl From<Error> for prgate_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Auth(msg) => prgate_core::Error::Auth(msg),
            Error::RepoNotFound(_) | Error::PrNotFound(_) => {
                prgate_core::Error::NotFound(err.to_string())
            }
            Error::Api { status: 404, .. } => prgate_core::Error::NotFound(err.to_string()),
            other => prgate_core::Error::Transient(other.to_string()),
        }
    }
}
