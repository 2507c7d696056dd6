//! Member listing action

use prgate_core::{list_members, Member, ReviewHost};

use super::{banner, rule, Outcome};

/// Print repository collaborators and their roles
pub async fn execute(host: &dyn ReviewHost) -> Outcome {
    banner("REPOSITORY MEMBERS");

    let members = match list_members(host).await {
        Ok(members) => members,
        Err(e) => {
            println!("Failed to list members: {}", e);
            rule();
            return Outcome::Failed;
        }
    };

    if members.is_empty() {
        println!("No members found");
        rule();
        return Outcome::Success;
    }

    for member in &members {
        for line in member_lines(member) {
            println!("{}", line);
        }
    }

    println!();
    println!("{}", "=".repeat(super::RULE_WIDTH));
    println!("Total members: {}", members.len());
    rule();

    Outcome::Success
}

fn member_lines(member: &Member) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("{} (@{})", member.display_name, member.login),
        format!("   Email: {}", member.email_or_placeholder()),
        format!("   Role: {}", member.role_or_unknown()),
    ];
    if let Some(url) = &member.profile_url {
        lines.push(format!("   Profile: {}", url));
    }
    lines
}
