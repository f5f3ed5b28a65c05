//! gitjira - links GitLab commits to JIRA issues.

use std::process;

use anyhow::Context;
use clap::Parser;

use gitjira::cli::{Args, Command};
use gitjira::{config, logging, AppError, Commit, CommitLinker, JiraClient};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init(args.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {:#}", e);
        process::exit(1);
    }

    if let Err(e) = run(args).await {
        match e.downcast_ref::<AppError>() {
            Some(app_err) => eprintln!("{}", app_err.user_message()),
            None => eprintln!("{:#}", e),
        }
        tracing::error!(error = %e, "Command failed");
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    if let Some(dir) = &args.log_dir {
        eprintln!("Logging to {}.*", logging::log_file_prefix(dir).display());
    }

    match &args.command {
        Command::Extract { message } => {
            for key in gitjira::api::extract_issue_keys(message) {
                println!("{}", key);
            }
        }
        Command::ServerInfo => {
            let client = connect(&args)?;
            let response = client.server_info().await.map_err(AppError::from)?;
            println!("HTTP {}", response.code());
            if let Some(err) = response.error(client.base_url()) {
                return Err(AppError::from(err).into());
            }
            if let Some(info) = response.body() {
                println!("{}", serde_json::to_string_pretty(info)?);
            }
        }
        Command::Link {
            commit,
            message,
            url,
            author,
        } => {
            let client = connect(&args)?;
            let commit = Commit {
                id: commit.clone(),
                message: message.clone(),
                url: url.clone(),
                author: author.clone(),
            };

            let report = CommitLinker::new(&client).link(&commit).await;
            if report.is_empty() {
                println!("No issue referenced");
            }
            for (key, outcome) in &report.results {
                println!("{}: {}", key, outcome);
            }
        }
    }

    Ok(())
}

fn connect(args: &Args) -> anyhow::Result<JiraClient> {
    let config = config::load(args.config.as_deref())
        .map_err(AppError::from)
        .context("loading configuration")?;
    let client = JiraClient::new(&config).map_err(AppError::from)?;
    Ok(client)
}
