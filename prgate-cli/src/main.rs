//! prgate CLI - pull request size gate and epic summaries
//!
//! Checks a pull request's changed-line count against the limit for its
//! branch category, maintains epic pull request descriptions, and lists
//! repository members.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use prgate_core::Config;
use prgate_github::GitHubClient;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::Actions;

/// prgate: enforce pull request size policy in CI
#[derive(Parser, Debug)]
#[command(name = "prgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Repository as owner/repo or https://<host>/owner/repo
    #[arg(long)]
    repo: String,

    /// Pull request number (required for --check-size and --update-epic)
    #[arg(long)]
    pr_number: Option<u64>,

    /// Check the pull request size against its branch category limit
    #[arg(long)]
    check_size: bool,

    /// Rewrite the epic pull request description with its related pull requests
    #[arg(long)]
    update_epic: bool,

    /// List repository collaborators and their roles
    #[arg(long)]
    list_members: bool,

    /// Path to config file (defaults to ~/.config/prgate/config.toml)
    #[arg(long, env = "PRGATE_CONFIG")]
    config: Option<PathBuf>,

    /// GitHub API base URL (GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// Total attempts per API call, including the first (1 disables retry)
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Requested actions, or a usage error when a pull request number is missing
    fn actions(&self) -> Result<Actions, String> {
        if (self.check_size || self.update_epic) && self.pr_number.is_none() {
            return Err("--pr-number is required with --check-size or --update-epic".to_string());
        }

        Ok(Actions {
            list_members: self.list_members,
            check_size: self.pr_number.filter(|_| self.check_size),
            update_epic: self.pr_number.filter(|_| self.update_epic),
        })
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let actions = match cli.actions() {
        Ok(actions) => actions,
        Err(message) => {
            eprintln!("error: {}", message);
            return Ok(ExitCode::FAILURE);
        }
    };

    if actions.is_empty() {
        println!("Nothing to do. Use --check-size, --update-epic or --list-members");
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load_with_overrides(cli.config.as_deref(), cli.max_attempts)?;
    tracing::info!(
        rules = config.policy.rules().len(),
        max_attempts = config.retry.max_attempts,
        "Configuration loaded"
    );

    println!("Repository: {}", cli.repo);

    let client = GitHubClient::from_repo(&cli.token, &cli.repo, cli.api_url.as_deref())?
        .with_retry_policy(config.retry.clone());

    client.test_connection().await?;
    match client.current_user().await {
        Ok(login) => println!("Connected to GitHub (user: {})", login),
        Err(e) => tracing::warn!(error = %e, "Could not determine authenticated user"),
    }

    let outcomes = commands::run_all(&client, &config.policy, &actions).await;
    Ok(ExitCode::from(commands::exit_status(&outcomes)))
}
