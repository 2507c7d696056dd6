//! Branch-naming size policy
//!
//! A [`PolicyTable`] is an ordered list of rules. Each rule maps a set of
//! branch-name substrings to a [`PolicyCategory`]; the first rule with a
//! matching pattern wins, and branches matching nothing fall back to a
//! configured category.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Branch substring that marks an epic branch
pub const EPIC_MARKER: &str = "epic/";

/// A named classification with its maximum changed-line count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCategory {
    /// Category name (feature, refactor, bugfix, epic)
    pub name: String,
    /// Maximum permitted changed lines; `None` means unlimited
    #[serde(default)]
    pub line_limit: Option<u64>,
}

impl PolicyCategory {
    pub fn limited(name: impl Into<String>, limit: u64) -> Self {
        Self {
            name: name.into(),
            line_limit: Some(limit),
        }
    }

    pub fn unlimited(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_limit: None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        self.line_limit.is_none()
    }
}

impl std::fmt::Display for PolicyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// One ordered entry of the policy table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    #[serde(flatten)]
    pub category: PolicyCategory,
    /// Lower-case substrings; any of them matching selects this rule
    pub patterns: Vec<String>,
}

impl PolicyRule {
    pub fn new(category: PolicyCategory, patterns: &[&str]) -> Self {
        Self {
            category,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn matches(&self, branch_lower: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| branch_lower.contains(&p.to_lowercase()))
    }
}

/// Ordered branch classification table
///
/// Tables are validated on construction, so every table has at least one
/// rule and a fallback that names one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyTableDef", into = "PolicyTableDef")]
pub struct PolicyTable {
    rules: Vec<PolicyRule>,
    /// Index into `rules` used when no pattern matches
    fallback: usize,
}

/// On-disk form of a [`PolicyTable`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PolicyTableDef {
    rules: Vec<PolicyRule>,
    #[serde(default = "default_fallback")]
    fallback: String,
}

fn default_fallback() -> String {
    "feature".to_string()
}

impl TryFrom<PolicyTableDef> for PolicyTable {
    type Error = Error;

    fn try_from(def: PolicyTableDef) -> Result<Self> {
        PolicyTable::new(def.rules, &def.fallback)
    }
}

impl From<PolicyTable> for PolicyTableDef {
    fn from(table: PolicyTable) -> Self {
        let fallback = table.fallback().name.clone();
        PolicyTableDef {
            rules: table.rules,
            fallback,
        }
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            rules: vec![
                PolicyRule::new(PolicyCategory::unlimited("epic"), &[EPIC_MARKER]),
                PolicyRule::new(PolicyCategory::limited("feature", 300), &["feature/"]),
                PolicyRule::new(PolicyCategory::limited("refactor", 400), &["refactor/"]),
                PolicyRule::new(PolicyCategory::limited("bugfix", 150), &["bugfix/", "fix/"]),
            ],
            fallback: 1,
        }
    }
}

impl PolicyTable {
    /// Build a table from rules in priority order and the fallback rule's name
    pub fn new(rules: Vec<PolicyRule>, fallback: &str) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::Config("policy must define at least one rule".to_string()));
        }

        for rule in &rules {
            if rule.patterns.iter().all(|p| p.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "policy rule '{}' has no patterns",
                    rule.category.name
                )));
            }
        }

        let fallback = rules
            .iter()
            .position(|rule| rule.category.name == fallback)
            .ok_or_else(|| {
                Error::Config(format!("policy fallback '{}' does not name a rule", fallback))
            })?;

        Ok(Self { rules, fallback })
    }

    /// Rules in priority order
    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    /// Category used when no rule matches
    pub fn fallback(&self) -> &PolicyCategory {
        &self.rules[self.fallback].category
    }

    /// Classify a branch name; the first matching rule wins
    pub fn classify(&self, branch: &str) -> &PolicyCategory {
        let branch_lower = branch.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&branch_lower))
            .map_or_else(|| self.fallback(), |rule| &rule.category)
    }
}

/// Whether a branch name marks an epic (case-insensitive substring)
pub fn is_epic_branch(branch: &str) -> bool {
    branch.to_lowercase().contains(EPIC_MARKER)
}
