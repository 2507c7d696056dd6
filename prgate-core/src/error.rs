//! Error types for prgate

use thiserror::Error;

/// Result type alias for prgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for prgate operations
#[derive(Error, Debug)]
pub enum Error {
    /// Repository or pull request does not exist (or is not visible to the token)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Epic update requested on a pull request whose branch is not an epic branch
    #[error("Pull request #{number} is not an epic (branch '{branch}' does not contain 'epic/')")]
    NotEpic { number: u64, branch: String },

    /// Network or API failure that may succeed on retry
    #[error("Transient error: {0}")]
    Transient(String),

    /// Credentials rejected by the hosting service
    #[error("Authentication error: {0}")]
    Auth(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
