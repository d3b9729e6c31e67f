// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{Result, TaskbotError};

use super::Settings;

/// Upper bound for the configurable task length (Telegram's message limit)
const MAX_TEXT_LEN_LIMIT: usize = 4096;

impl Settings {
    /// Get the bot token, checking the env var first.
    ///
    /// Blank values count as unset.
    pub fn get_bot_token(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.telegram.bot_token_env)
            .ok()
            .or_else(|| self.telegram.bot_token.clone())
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }

    /// Get the bot token or fail with a configuration error.
    pub fn require_bot_token(&self) -> Result<String> {
        self.get_bot_token().ok_or_else(|| {
            TaskbotError::Config(format!(
                "{} is not set (environment, .env, or telegram.bot_token in settings)",
                self.telegram.bot_token_env
            ))
        })
    }

    /// Check that the numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.tasks.max_text_len == 0 || self.tasks.max_text_len > MAX_TEXT_LEN_LIMIT {
            return Err(TaskbotError::Config(format!(
                "tasks.max_text_len must be between 1 and {}, got {}",
                MAX_TEXT_LEN_LIMIT, self.tasks.max_text_len
            )));
        }
        if self.tasks.pending_input_timeout_secs == 0 {
            return Err(TaskbotError::Config(
                "tasks.pending_input_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.tasks.purge_interval_secs == 0 {
            return Err(TaskbotError::Config(
                "tasks.purge_interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
