// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;
use std::time::Duration;

use taskbot::config::Settings;
use taskbot::error::TaskbotError;

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert_eq!(settings.telegram.bot_token_env, "BOT_TOKEN");
    assert!(settings.telegram.bot_token.is_none());
    assert!(settings.storage.data_dir.is_none());
    assert_eq!(settings.tasks.max_text_len, 100);
}

#[test]
fn test_default_router_config() {
    let config = Settings::default().router_config();
    assert_eq!(config.max_text_len, 100);
    assert_eq!(config.pending_input_timeout, Duration::from_secs(300));
    assert_eq!(Settings::default().purge_interval(), Duration::from_secs(60));
}

#[test]
fn test_data_dir_override() {
    let mut settings = Settings::default();
    settings.storage.data_dir = Some(PathBuf::from("/srv/taskbot/data"));
    assert_eq!(settings.data_dir(), PathBuf::from("/srv/taskbot/data"));
}

#[test]
fn test_default_data_dir_is_under_home() {
    let settings = Settings::default();
    assert!(settings.data_dir().ends_with("user_data"));
    assert!(settings.data_dir().starts_with(Settings::taskbot_home()));
}

#[test]
fn test_bot_token_priority() {
    // Use a custom env var name to avoid test pollution
    let mut settings = Settings::default();
    settings.telegram.bot_token_env = "TASKBOT_TEST_BOT_TOKEN_12345".to_string();
    settings.telegram.bot_token = Some("config-token".to_string());

    // Without env var, should use config token
    std::env::remove_var("TASKBOT_TEST_BOT_TOKEN_12345");
    assert_eq!(settings.get_bot_token(), Some("config-token".to_string()));

    // With env var set, should prefer env var
    std::env::set_var("TASKBOT_TEST_BOT_TOKEN_12345", "env-token");
    assert_eq!(settings.get_bot_token(), Some("env-token".to_string()));

    // Clean up
    std::env::remove_var("TASKBOT_TEST_BOT_TOKEN_12345");
}

#[test]
fn test_missing_bot_token_is_config_error() {
    let mut settings = Settings::default();
    settings.telegram.bot_token_env = "TASKBOT_TEST_MISSING_TOKEN_54321".to_string();
    std::env::remove_var("TASKBOT_TEST_MISSING_TOKEN_54321");

    match settings.require_bot_token() {
        Err(TaskbotError::Config(msg)) => {
            assert!(msg.contains("TASKBOT_TEST_MISSING_TOKEN_54321"));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_settings_file_round_trip() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.tasks.max_text_len = 64;
    settings.telegram.bot_token_env = "MY_BOT_TOKEN".to_string();
    std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

    let loaded = Settings::load_from(&path).unwrap();
    assert_eq!(loaded.tasks.max_text_len, 64);
    assert_eq!(loaded.telegram.bot_token_env, "MY_BOT_TOKEN");
    assert!(loaded.validate().is_ok());
}
