// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! taskbot - a Telegram bot for short per-user task lists.
//!
//! Users add, view, complete, and remove tasks through a reply keyboard and
//! inline buttons. Each user's list is a small JSON file.
//!
//! Architecture highlights:
//! - `tasks`: task model, text validation, and file-per-user storage
//! - `bot`: chat events, the command router, conversation state, and the
//!   Telegram gateway
//! - `config`, `cli`, `commands`: settings, argument parsing, and offline
//!   record inspection

pub mod bot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod tasks;

pub use error::{Result, TaskbotError};
