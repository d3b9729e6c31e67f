// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Per-user conversation state
//!
//! After "Add Task" the bot waits for the user's next message in that chat
//! and takes it as the task text. The wait is recorded here, keyed by
//! (chat, user), and expires after a timeout so abandoned prompts do not
//! linger.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::tasks::UserId;

use super::events::ChatId;

/// What the bot is waiting for from a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingInput {
    /// The next message is the text of a new task
    TaskText,
}

#[derive(Debug, Clone, Copy)]
struct PendingEntry {
    input: PendingInput,
    since: Instant,
}

/// Pending-input state for all users
pub struct ConversationStore {
    entries: RwLock<HashMap<(ChatId, UserId), PendingEntry>>,
    ttl: Duration,
}

impl ConversationStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_live(&self, entry: &PendingEntry, now: Instant) -> bool {
        now.duration_since(entry.since) < self.ttl
    }

    /// Start waiting for task text, replacing any earlier wait
    pub async fn begin_task_entry(&self, chat: ChatId, user: UserId) {
        let mut entries = self.entries.write().await;
        entries.insert(
            (chat, user),
            PendingEntry {
                input: PendingInput::TaskText,
                since: Instant::now(),
            },
        );
    }

    /// Consume the pending input for (chat, user), if any and not expired
    pub async fn take_pending(&self, chat: ChatId, user: UserId) -> Option<PendingInput> {
        let entry = self.entries.write().await.remove(&(chat, user))?;
        if self.is_live(&entry, Instant::now()) {
            Some(entry.input)
        } else {
            tracing::debug!(chat = %chat, user = %user, "pending input expired");
            None
        }
    }

    /// Drop the pending input. Returns true if a live one was cancelled.
    pub async fn cancel(&self, chat: ChatId, user: UserId) -> bool {
        self.take_pending(chat, user).await.is_some()
    }

    /// Remove every expired entry, returning how many were dropped
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.since) < self.ttl);
        before - entries.len()
    }

    /// Number of entries currently held, expired or not
    pub async fn pending_count(&self) -> usize {
        self.entries.read().await.len()
    }
}
