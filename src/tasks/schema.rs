// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Task schema definitions
//!
//! A task is a short line of text with a two-state status. Tasks have no
//! identifier of their own: a task is addressed by its position in the
//! owning user's collection, and positions are only meaningful for the
//! snapshot they were read from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum task length, in characters
pub const DEFAULT_MAX_TASK_LEN: usize = 100;

/// The chat platform's identifier for a person
///
/// Used as the storage key for task records and to authorize button presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not yet done
    #[default]
    Pending,
    /// Marked complete by the user
    Done,
}

impl TaskStatus {
    /// Get the display label
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task text (trimmed, non-empty)
    pub text: String,
    /// Current status
    pub status: TaskStatus,
}

impl Task {
    /// Create a new pending task
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            status: TaskStatus::Pending,
        }
    }

    /// Mark the task as done
    pub fn complete(&mut self) {
        self.status = TaskStatus::Done;
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Render as `<position>. <text> (<status>)` using a 1-based position
    pub fn display_line(&self, index: usize) -> String {
        format!("{}. {} ({})", index + 1, self.text, self.status)
    }
}

/// The on-disk record for one user: `{ "tasks": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Why a task text was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskTextError {
    #[error("Task cannot be empty.")]
    Empty,

    #[error("Task is too long (max {max} characters).")]
    TooLong { max: usize },
}

/// Trim and validate raw task text.
///
/// Length is counted in characters, not bytes.
pub fn validate_task_text(raw: &str, max_len: usize) -> Result<String, TaskTextError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TaskTextError::Empty);
    }
    if text.chars().count() > max_len {
        return Err(TaskTextError::TooLong { max: max_len });
    }
    Ok(text.to_string())
}

/// Render a collection the way "View Tasks" shows it
pub fn format_task_list(tasks: &[Task]) -> String {
    let mut list = String::from("Your Tasks:\n");
    for (index, task) in tasks.iter().enumerate() {
        list.push_str(&task.display_line(index));
        list.push('\n');
    }
    list
}
