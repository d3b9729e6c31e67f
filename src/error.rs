// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for taskbot
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for taskbot operations
#[derive(Error, Debug)]
pub enum TaskbotError {
    /// Configuration errors (including a missing bot token)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Task record errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Messaging transport errors
    #[error("Gateway error: {0}")]
    Gateway(String),
}

/// Result type alias for taskbot operations
pub type Result<T> = std::result::Result<T, TaskbotError>;

impl From<teloxide::RequestError> for TaskbotError {
    fn from(err: teloxide::RequestError) -> Self {
        TaskbotError::Gateway(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taskbot_error_config() {
        let err = TaskbotError::Config("BOT_TOKEN is not set".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    fn test_taskbot_error_storage() {
        let err = TaskbotError::Storage("record is locked".to_string());
        assert!(err.to_string().contains("Storage error"));
    }

    #[test]
    fn test_taskbot_error_gateway() {
        let err = TaskbotError::Gateway("network down".to_string());
        assert!(err.to_string().contains("Gateway error"));
        assert!(err.to_string().contains("network down"));
    }

    #[test]
    fn test_taskbot_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TaskbotError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_taskbot_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: TaskbotError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_taskbot_error_debug() {
        let err = TaskbotError::Storage("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Storage"));
    }

    #[test]
    fn test_result_error() {
        fn test_fn() -> Result<i32> {
            Err(TaskbotError::Storage("test".to_string()))
        }

        assert!(test_fn().is_err());
    }
}
