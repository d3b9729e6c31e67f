// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Transport-neutral bot events
//!
//! The router consumes `InboundEvent`s and produces messages with an optional
//! `ReplyMarkup`. Adapters translate to and from the chat platform's types.

use crate::tasks::UserId;

/// Identifier of the chat a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ChatId {
    /// The private chat with a user shares the user's id.
    ///
    /// Telegram user ids fit in 52 bits. An id past `i64::MAX` is logged and
    /// saturates, so delivery to it fails instead of reaching another chat.
    pub fn private(user: UserId) -> Self {
        match i64::try_from(user.0) {
            Ok(id) => Self(id),
            Err(_) => {
                tracing::warn!(user = %user, "user id does not fit a chat id");
                Self(i64::MAX)
            }
        }
    }
}

/// Entries of the persistent main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    AddTask,
    ViewTasks,
    CompleteTask,
    RemoveTask,
}

impl MenuOption {
    /// Keyboard layout, row by row
    pub const LAYOUT: [[MenuOption; 2]; 2] = [
        [MenuOption::AddTask, MenuOption::ViewTasks],
        [MenuOption::CompleteTask, MenuOption::RemoveTask],
    ];

    /// Button label, also the text the platform sends back when pressed
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::AddTask => "Add Task",
            MenuOption::ViewTasks => "View Tasks",
            MenuOption::CompleteTask => "Complete Task",
            MenuOption::RemoveTask => "Remove Task",
        }
    }

    /// Match a message text against the menu labels (exact match)
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "Add Task" => Some(MenuOption::AddTask),
            "View Tasks" => Some(MenuOption::ViewTasks),
            "Complete Task" => Some(MenuOption::CompleteTask),
            "Remove Task" => Some(MenuOption::RemoveTask),
            _ => None,
        }
    }
}

/// A button in an inline grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub payload: String,
}

/// Keyboard attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// The persistent reply keyboard built from `MenuOption::LAYOUT`
    MainMenu,
    /// Inline buttons, one inner vector per row
    Inline(Vec<Vec<InlineButton>>),
}

/// An event delivered by the messaging gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// `/start`
    Start {
        chat: ChatId,
        user: UserId,
        first_name: String,
    },
    /// `/cancel`
    Cancel { chat: ChatId, user: UserId },
    /// Any other text message, including unrecognised commands
    Text {
        chat: ChatId,
        user: UserId,
        text: String,
    },
    /// An inline button press
    Callback {
        id: String,
        chat: ChatId,
        user: UserId,
        payload: Option<String>,
    },
}

impl InboundEvent {
    /// Classify a text message into a command or plain text event
    pub fn from_text(chat: ChatId, user: UserId, first_name: &str, text: &str) -> Self {
        match command_name(text) {
            Some("start") => InboundEvent::Start {
                chat,
                user,
                first_name: first_name.to_string(),
            },
            Some("cancel") => InboundEvent::Cancel { chat, user },
            _ => InboundEvent::Text {
                chat,
                user,
                text: text.to_string(),
            },
        }
    }
}

/// Whether text is a bot command (starts with `/`)
pub fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

/// Extract the command name from `/name`, `/name@bot`, or `/name payload`
fn command_name(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('/')?;
    let word = rest.split_whitespace().next().unwrap_or("");
    let name = word.split('@').next().unwrap_or("");
    Some(name)
}
