//! Epic update action

use prgate_core::{aggregate_epic, Error, ReviewHost};

use super::{banner, rule, Outcome};

/// Rewrite an epic's description and print what changed
///
/// Running on a non-epic pull request prints a notice and succeeds, so
/// shared pipeline steps can invoke it on every pull request.
pub async fn execute(host: &dyn ReviewHost, number: u64) -> Outcome {
    banner("EPIC PULL REQUEST UPDATE");

    let outcome = match aggregate_epic(host, number).await {
        Ok(update) => {
            println!();
            println!("Epic: #{} {}", update.epic.number, update.epic.title);
            println!("Branch: {}", update.epic.source_branch);
            println!(
                "Related pull requests: {} ({} merged)",
                update.related.len(),
                update.merged_count()
            );
            for pr in &update.related {
                println!("   [{}] #{} {}", pr.state, pr.number, pr.title);
            }
            println!();
            if update.written {
                println!("Epic description updated");
            } else {
                println!("Epic description already up to date");
            }
            Outcome::Success
        }
        Err(e @ Error::NotEpic { .. }) => {
            println!("Skipping: {}", e);
            Outcome::Success
        }
        Err(e) => {
            println!("Failed to update epic #{}: {}", number, e);
            Outcome::Failed
        }
    };

    rule();
    outcome
}
