//! prgate GitHub - GitHub integration for prgate
//!
//! This crate provides GitHub API access for reading pull requests and
//! their diffs, listing collaborators, and updating pull request
//! descriptions. [`GitHubClient`] implements [`prgate_core::ReviewHost`].

mod client;
mod error;
mod host;
mod members;
mod pr;
mod retry;

pub use client::{parse_repo_spec, GitHubClient};
pub use error::{Error, Result};
