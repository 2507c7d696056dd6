//! CLI action implementations
//!
//! Each action prints its own report and diagnostics and returns an
//! [`Outcome`]; one failing action does not stop the others.

pub mod epic;
pub mod members;
pub mod size;

#[cfg(test)]
mod test_support;

use prgate_core::{PolicyTable, ReviewHost};

const RULE_WIDTH: usize = 60;

/// Result of running one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Action completed
    Success,
    /// Size check ran and the request is over its limit
    PolicyViolation,
    /// Action could not complete
    Failed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Actions requested on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub list_members: bool,
    /// Pull request to size-check
    pub check_size: Option<u64>,
    /// Epic pull request to update
    pub update_epic: Option<u64>,
}

impl Actions {
    pub fn is_empty(&self) -> bool {
        !self.list_members && self.check_size.is_none() && self.update_epic.is_none()
    }
}

/// Run the requested actions in order: members, size check, epic update
pub async fn run_all(
    host: &dyn ReviewHost,
    policy: &PolicyTable,
    actions: &Actions,
) -> Vec<Outcome> {
    let mut outcomes = Vec::new();

    if actions.list_members {
        outcomes.push(members::execute(host).await);
    }

    if let Some(number) = actions.check_size {
        outcomes.push(size::execute(host, policy, number).await);
    }

    if let Some(number) = actions.update_epic {
        outcomes.push(epic::execute(host, number).await);
    }

    outcomes
}

/// Process exit status: 0 when every action succeeded, otherwise 1
pub fn exit_status(outcomes: &[Outcome]) -> u8 {
    if outcomes.iter().all(Outcome::is_success) {
        0
    } else {
        1
    }
}

/// Print a section header
fn banner(title: &str) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("{}", title);
    println!("{}", "=".repeat(RULE_WIDTH));
}

/// Print a section footer
fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!();
}
