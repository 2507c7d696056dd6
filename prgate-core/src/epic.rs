//! Epic pull request summaries
//!
//! An epic is a pull request from an `epic/` branch that other pull requests
//! target. Aggregation lists every request based on the epic branch and
//! writes a Markdown summary into the epic's description, keeping any
//! human-written description below the generated part.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::host::{RequestState, RequestSummary, ReviewHost};
use crate::policy::is_epic_branch;
use crate::{Error, Result};

/// Heading that marks a description as generated
pub const RELATED_HEADING: &str = "### Related Pull Requests";

/// Heading under which the human-written description is kept
pub const ORIGINAL_HEADING: &str = "### Original description";

/// Result of aggregating an epic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpicUpdate {
    pub epic: RequestSummary,
    /// Requests targeting the epic branch, in service order
    pub related: Vec<RequestSummary>,
    /// The rendered description
    pub description: String,
    /// Whether the description was written (false when unchanged)
    pub written: bool,
}

impl EpicUpdate {
    pub fn merged_count(&self) -> usize {
        self.related
            .iter()
            .filter(|pr| pr.state == RequestState::Merged)
            .count()
    }
}

/// Collect the epic's related pull requests and rewrite its description
pub async fn aggregate_epic(host: &dyn ReviewHost, number: u64) -> Result<EpicUpdate> {
    let epic = host.get_request(number).await?;

    if !is_epic_branch(&epic.source_branch) {
        return Err(Error::NotEpic {
            number,
            branch: epic.source_branch,
        });
    }

    debug!(number, branch = %epic.source_branch, "Listing requests targeting epic branch");

    let related: Vec<RequestSummary> = host
        .list_requests_targeting(&epic.source_branch)
        .await?
        .into_iter()
        .filter(|pr| pr.number != epic.number)
        .collect();

    let original = preserved_description(&epic.body);
    let description = render_description(&epic, &related, original.as_deref());

    let written = description != epic.body;
    if written {
        host.update_description(number, &description).await?;
        info!(number, related = related.len(), "Updated epic description");
    } else {
        info!(number, "Epic description already up to date");
    }

    Ok(EpicUpdate {
        epic,
        related,
        description,
        written,
    })
}

/// Human-written text to keep from an existing description
///
/// A description without the generated heading is kept verbatim. Once the
/// description has been generated, only the text under the original
/// description heading is carried forward, minus the separators that
/// [`render_description`] wraps around it.
pub fn preserved_description(body: &str) -> Option<String> {
    let text = if body.contains(RELATED_HEADING) {
        let start = body.find(ORIGINAL_HEADING)? + ORIGINAL_HEADING.len();
        let text = &body[start..];
        let text = text.strip_prefix("\n\n").unwrap_or(text);
        text.strip_suffix('\n').unwrap_or(text)
    } else {
        body
    };

    (!text.trim().is_empty()).then(|| text.to_string())
}

/// One bullet line for a related request
pub fn render_entry(pr: &RequestSummary) -> String {
    format!(
        "- [{state}] [#{number} - {title}]({url}) - `{state}`",
        state = pr.state,
        number = pr.number,
        title = pr.title,
        url = pr.url,
    )
}

/// Render the generated related-requests section
pub fn render_related_section(related: &[RequestSummary]) -> String {
    let mut section = String::new();
    section.push_str(RELATED_HEADING);
    section.push_str("\n\n");

    if related.is_empty() {
        section.push_str("_No related pull requests yet._\n");
        return section;
    }

    let merged = related
        .iter()
        .filter(|pr| pr.state == RequestState::Merged)
        .count();
    section.push_str(&format!(
        "Progress: {} of {} merged\n\n",
        merged,
        related.len()
    ));

    for pr in related {
        section.push_str(&render_entry(pr));
        section.push('\n');
    }

    section
}

/// Render the full epic description
pub fn render_description(
    epic: &RequestSummary,
    related: &[RequestSummary],
    original: Option<&str>,
) -> String {
    let mut out = format!("## Epic: {}\n\n", epic.title);
    out.push_str(&render_related_section(related));

    if let Some(original) = original {
        out.push('\n');
        out.push_str(ORIGINAL_HEADING);
        out.push_str("\n\n");
        out.push_str(original);
        out.push('\n');
    }

    out
}
