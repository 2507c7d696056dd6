//! prgate Core - size policy and epic aggregation for pull requests
//!
//! This crate classifies pull requests by branch name, checks their size
//! against the category's line limit, and renders epic summaries. It talks
//! to the hosting service only through the [`ReviewHost`] trait.

pub mod config;
pub mod epic;
pub mod error;
pub mod host;
pub mod members;
pub mod policy;
pub mod size;

pub use config::{Config, RetryPolicy};
pub use epic::{aggregate_epic, EpicUpdate};
pub use error::{Error, Result};
pub use host::{ChangeRecord, Collaborator, RequestState, RequestSummary, ReviewHost};
pub use members::{list_members, Member};
pub use policy::{is_epic_branch, PolicyCategory, PolicyRule, PolicyTable};
pub use size::{evaluate_size, SizeReport};
