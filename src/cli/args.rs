// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for taskbot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// taskbot - a Telegram task list bot
#[derive(Parser, Debug)]
#[command(name = "taskbot")]
#[command(version, about = "A Telegram bot for managing short task lists")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding per-user task records
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the bot (default when no command given)
    Run,

    /// Print the stored tasks of one user
    Tasks(TasksArgs),

    /// List users that have stored tasks
    Users,
}

/// Arguments for the tasks subcommand
#[derive(clap::Args, Debug, PartialEq, Eq)]
pub struct TasksArgs {
    /// Telegram user id
    pub user_id: u64,
}
