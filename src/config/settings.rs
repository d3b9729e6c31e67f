// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for taskbot
//!
//! Handles loading and saving settings from ~/.taskbot/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::bot::RouterConfig;
use crate::tasks::DEFAULT_MAX_TASK_LEN;

mod io;
mod validation;

/// Main settings structure, stored in ~/.taskbot/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Telegram connection settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Where task records are kept
    #[serde(default)]
    pub storage: StorageConfig,

    /// Task limits and prompt timing
    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Environment variable name for the bot token
    #[serde(default = "default_bot_token_env")]
    pub bot_token_env: String,
}

/// Task record storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory for per-user records (defaults to ~/.taskbot/user_data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Task behaviour configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Maximum task length in characters
    #[serde(default = "default_max_text_len")]
    pub max_text_len: usize,

    /// Seconds an "Add Task" prompt waits for the task text
    #[serde(default = "default_pending_input_timeout_secs")]
    pub pending_input_timeout_secs: u64,

    /// Seconds between sweeps of expired prompts
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Settings {
    /// Router configuration derived from these settings
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            max_text_len: self.tasks.max_text_len,
            pending_input_timeout: Duration::from_secs(self.tasks.pending_input_timeout_secs),
        }
    }

    /// Interval between sweeps of expired prompts
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.tasks.purge_interval_secs)
    }
}

fn default_bot_token_env() -> String {
    "BOT_TOKEN".to_string()
}

fn default_max_text_len() -> usize {
    DEFAULT_MAX_TASK_LEN
}

fn default_pending_input_timeout_secs() -> u64 {
    300
}

fn default_purge_interval_secs() -> u64 {
    60
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            bot_token_env: default_bot_token_env(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            max_text_len: default_max_text_len(),
            pending_input_timeout_secs: default_pending_input_timeout_secs(),
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}
