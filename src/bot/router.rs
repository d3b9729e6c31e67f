// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Command router
//!
//! Turns inbound chat events into task mutations and replies. Each event is
//! handled to completion: the user's tasks are read fresh from the store,
//! mutated under the store's per-user lock, and the reply is sent through
//! the gateway. Store and delivery failures are logged; the router always
//! attempts to answer the user.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use crate::tasks::{
    format_task_list, validate_task_text, Task, TaskStore, UserId, DEFAULT_MAX_TASK_LEN,
};

use super::callback::{CallbackAction, CallbackPayload};
use super::conversation::{ConversationStore, PendingInput};
use super::events::{is_command, ChatId, InboundEvent, InlineButton, MenuOption, ReplyMarkup};
use super::gateway::Gateway;

/// Default time the bot waits for task text after "Add Task"
pub const DEFAULT_PENDING_INPUT_TIMEOUT: Duration = Duration::from_secs(300);

const MSG_NO_TASKS: &str = "No tasks found.";
const MSG_NOTHING_TO_COMPLETE: &str = "No tasks to complete.";
const MSG_NOTHING_TO_REMOVE: &str = "No tasks to remove.";
const MSG_SELECT_COMPLETE: &str = "Select a task to mark as completed:";
const MSG_SELECT_REMOVE: &str = "Select a task to remove:";
const MSG_ENTRY_CANCELLED: &str = "Task entry cancelled.";
const MSG_NOTHING_TO_CANCEL: &str = "Nothing to cancel.";

const ACK_INVALID_ACTION: &str = "Invalid action.";
const ACK_NOT_OWNER: &str = "You can only manage your own tasks!";
const ACK_INVALID_SELECTION: &str = "Invalid task selection.";
const ACK_UNKNOWN_ACTION: &str = "Unknown action.";

/// Router tuning
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Maximum task length in characters
    pub max_text_len: usize,
    /// How long a pending "Add Task" prompt stays open
    pub pending_input_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_text_len: DEFAULT_MAX_TASK_LEN,
            pending_input_timeout: DEFAULT_PENDING_INPUT_TIMEOUT,
        }
    }
}

/// Result of a successful button press
enum ButtonOutcome {
    Completed(String),
    Removed(String),
}

/// Why a button press changed nothing
enum ButtonRejection {
    OutOfRange,
    UnknownAction,
}

/// Routes chat events to task operations
pub struct Router<G> {
    gateway: G,
    store: Arc<TaskStore>,
    conversations: ConversationStore,
    max_text_len: usize,
}

impl<G: Gateway> Router<G> {
    pub fn new(gateway: G, store: Arc<TaskStore>, config: RouterConfig) -> Self {
        Self {
            gateway,
            store,
            conversations: ConversationStore::new(config.pending_input_timeout),
            max_text_len: config.max_text_len,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Handle one inbound event to completion
    pub async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::Start {
                chat,
                user,
                first_name,
            } => self.handle_start(chat, user, &first_name).await,
            InboundEvent::Cancel { chat, user } => self.handle_cancel(chat, user).await,
            InboundEvent::Text { chat, user, text } => self.handle_text(chat, user, &text).await,
            InboundEvent::Callback {
                id,
                chat,
                user,
                payload,
            } => {
                self.handle_callback(&id, chat, user, payload.as_deref())
                    .await
            }
        }
    }

    async fn handle_start(&self, chat: ChatId, user: UserId, first_name: &str) {
        self.conversations.cancel(chat, user).await;
        tracing::debug!(chat = %chat, user = %user, "start command");

        let welcome = format!(
            "Welcome, {}! Manage your tasks with ease.\nChoose an option below:",
            first_name
        );
        self.reply(chat, &welcome, Some(ReplyMarkup::MainMenu)).await;
    }

    async fn handle_cancel(&self, chat: ChatId, user: UserId) {
        let text = if self.conversations.cancel(chat, user).await {
            MSG_ENTRY_CANCELLED
        } else {
            MSG_NOTHING_TO_CANCEL
        };
        self.reply(chat, text, Some(ReplyMarkup::MainMenu)).await;
    }

    async fn handle_text(&self, chat: ChatId, user: UserId, text: &str) {
        if is_command(text) {
            tracing::debug!(chat = %chat, user = %user, command = %text, "ignoring command");
            return;
        }

        if let Some(PendingInput::TaskText) = self.conversations.take_pending(chat, user).await {
            self.add_task(chat, user, text).await;
            return;
        }

        match MenuOption::from_text(text) {
            Some(MenuOption::AddTask) => self.prompt_task_text(chat, user).await,
            Some(MenuOption::ViewTasks) => self.view_tasks(chat, user).await,
            Some(MenuOption::CompleteTask) => {
                self.offer_tasks(chat, user, CallbackAction::Complete).await
            }
            Some(MenuOption::RemoveTask) => {
                self.offer_tasks(chat, user, CallbackAction::Remove).await
            }
            None => {
                tracing::debug!(chat = %chat, user = %user, "ignoring free text");
            }
        }
    }

    async fn prompt_task_text(&self, chat: ChatId, user: UserId) {
        let prompt = format!(
            "Enter the task description (max {} characters):",
            self.max_text_len
        );
        self.reply(chat, &prompt, None).await;
        self.conversations.begin_task_entry(chat, user).await;
    }

    async fn add_task(&self, chat: ChatId, user: UserId, raw: &str) {
        let text = match validate_task_text(raw, self.max_text_len) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(user = %user, reason = %e, "rejected task text");
                self.reply(chat, &e.to_string(), Some(ReplyMarkup::MainMenu))
                    .await;
                return;
            }
        };

        let appended = self.store.update(user, |tasks| {
            tasks.push(Task::new(text.clone()));
            Ok::<_, Infallible>(())
        });
        match appended {
            Ok(()) => {}
            Err(never) => match never {},
        }
        tracing::info!(user = %user, "task added");

        let confirmation = format!("Task \"{}\" added.", text);
        self.reply(chat, &confirmation, Some(ReplyMarkup::MainMenu))
            .await;
    }

    async fn view_tasks(&self, chat: ChatId, user: UserId) {
        let tasks = self.store.load(user);
        let text = if tasks.is_empty() {
            MSG_NO_TASKS.to_string()
        } else {
            format_task_list(&tasks)
        };
        self.reply(chat, &text, Some(ReplyMarkup::MainMenu)).await;
    }

    async fn offer_tasks(&self, chat: ChatId, user: UserId, action: CallbackAction) {
        let tasks = self.store.load(user);
        let (empty_text, prompt) = match action {
            CallbackAction::Remove => (MSG_NOTHING_TO_REMOVE, MSG_SELECT_REMOVE),
            _ => (MSG_NOTHING_TO_COMPLETE, MSG_SELECT_COMPLETE),
        };

        if tasks.is_empty() {
            self.reply(chat, empty_text, Some(ReplyMarkup::MainMenu))
                .await;
            return;
        }

        let keyboard = task_keyboard(&tasks, &action, user);
        self.reply(chat, prompt, Some(keyboard)).await;
    }

    async fn handle_callback(
        &self,
        callback_id: &str,
        chat: ChatId,
        user: UserId,
        payload: Option<&str>,
    ) {
        let Some(payload) = payload.and_then(CallbackPayload::decode) else {
            tracing::debug!(user = %user, payload = ?payload, "undecodable callback payload");
            self.acknowledge(callback_id, Some(ACK_INVALID_ACTION))
                .await;
            return;
        };

        if payload.owner != user {
            tracing::warn!(
                user = %user,
                owner = %payload.owner,
                "button pressed by someone other than its owner"
            );
            self.acknowledge(callback_id, Some(ACK_NOT_OWNER)).await;
            return;
        }

        let result = self.store.update(user, |tasks| {
            let Some(index) = payload.position(tasks.len()) else {
                return Err(ButtonRejection::OutOfRange);
            };
            match payload.action {
                CallbackAction::Complete => {
                    tasks[index].complete();
                    Ok(ButtonOutcome::Completed(tasks[index].text.clone()))
                }
                CallbackAction::Remove => Ok(ButtonOutcome::Removed(tasks.remove(index).text)),
                CallbackAction::Unknown(_) => Err(ButtonRejection::UnknownAction),
            }
        });

        match result {
            Ok(ButtonOutcome::Completed(text)) => {
                tracing::info!(user = %user, index = %payload.index, "task completed");
                let message = format!("Task \"{}\" marked as done.", text);
                self.reply(chat, &message, Some(ReplyMarkup::MainMenu)).await;
                self.acknowledge(callback_id, None).await;
            }
            Ok(ButtonOutcome::Removed(text)) => {
                tracing::info!(user = %user, index = %payload.index, "task removed");
                let message = format!("Task \"{}\" removed.", text);
                self.reply(chat, &message, Some(ReplyMarkup::MainMenu)).await;
                self.acknowledge(callback_id, None).await;
            }
            Err(ButtonRejection::OutOfRange) => {
                tracing::debug!(user = %user, index = %payload.index, "stale task index");
                self.acknowledge(callback_id, Some(ACK_INVALID_SELECTION))
                    .await;
            }
            Err(ButtonRejection::UnknownAction) => {
                self.acknowledge(callback_id, Some(ACK_UNKNOWN_ACTION))
                    .await;
            }
        }
    }

    async fn reply(&self, chat: ChatId, text: &str, markup: Option<ReplyMarkup>) {
        if let Err(e) = self.gateway.send_message(chat, text, markup).await {
            tracing::warn!(chat = %chat, error = %e, "failed to send message");
        }
    }

    async fn acknowledge(&self, callback_id: &str, text: Option<&str>) {
        if let Err(e) = self.gateway.answer_callback(callback_id, text).await {
            tracing::warn!(callback_id, error = %e, "failed to answer callback");
        }
    }
}

/// One inline button per task, labelled like the task list
fn task_keyboard(tasks: &[Task], action: &CallbackAction, owner: UserId) -> ReplyMarkup {
    let rows = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            vec![InlineButton {
                label: task.display_line(index),
                payload: CallbackPayload::new(action.clone(), index, owner).encode(),
            }]
        })
        .collect();
    ReplyMarkup::Inline(rows)
}
