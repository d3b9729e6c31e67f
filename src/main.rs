// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! taskbot - Telegram task list bot
//!
//! Entry point for the taskbot binary.

use std::sync::Arc;

use clap::Parser;

use taskbot::bot::{telegram, Router, TelegramGateway};
use taskbot::cli::{Cli, Commands};
use taskbot::commands::inspect;
use taskbot::config::Settings;
use taskbot::error::Result;
use taskbot::tasks::TaskStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Pick up BOT_TOKEN and friends from a local .env file
    dotenvy::dotenv().ok();

    // Initialize tracing. An explicit `RUST_LOG` wins; otherwise `-v` turns
    // on the bot's own diagnostics and `-vv` also shows teloxide's.
    let env_filter = if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let directives: &[&str] = match cli.verbose {
            0 => &["taskbot=info"],
            1 => &["taskbot=debug"],
            _ => &["taskbot=trace", "teloxide=debug"],
        };
        let mut filter =
            tracing_subscriber::EnvFilter::default().add_directive(tracing::Level::WARN.into());
        for directive in directives {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
        filter
    };

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Load settings
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(data_dir) = cli.data_dir.clone() {
        settings.storage.data_dir = Some(data_dir);
    }
    settings.validate()?;

    let store = Arc::new(TaskStore::new(settings.data_dir()));

    match cli.command {
        None | Some(Commands::Run) => run_bot(settings, store).await?,
        Some(Commands::Tasks(args)) => inspect::execute_tasks(&args, &store)?,
        Some(Commands::Users) => inspect::execute_users(&store)?,
    }

    Ok(())
}

/// Connect to Telegram and serve until interrupted
async fn run_bot(settings: Settings, store: Arc<TaskStore>) -> Result<()> {
    let token = settings.require_bot_token()?;

    tracing::debug!(data_dir = %store.data_dir().display(), "using task data directory");

    let gateway = TelegramGateway::new(token);
    let router = Arc::new(Router::new(gateway, store, settings.router_config()));

    telegram::run(router, settings.purge_interval()).await;
    Ok(())
}
