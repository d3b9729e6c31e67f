// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock gateway for testing
//!
//! Records every outbound request so tests can drive the router without a
//! network connection.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, TaskbotError};

use super::events::{ChatId, ReplyMarkup};
use super::gateway::Gateway;

/// An outbound request captured by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Message {
        chat: ChatId,
        text: String,
        markup: Option<ReplyMarkup>,
    },
    CallbackAnswer {
        callback_id: String,
        text: Option<String>,
    },
}

/// A gateway that records instead of sending
#[derive(Clone, Default)]
pub struct MockGateway {
    recorded: Arc<Mutex<Vec<Outbound>>>,
    fail: Arc<AtomicBool>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every request fails after being recorded
    pub fn failing() -> Self {
        let gateway = Self::new();
        gateway.fail.store(true, Ordering::SeqCst);
        gateway
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Outbound>> {
        match self.recorded.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Mock gateway lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn record(&self, outbound: Outbound) -> Result<()> {
        self.lock().push(outbound);
        if self.fail.load(Ordering::SeqCst) {
            return Err(TaskbotError::Gateway("mock delivery failure".to_string()));
        }
        Ok(())
    }

    /// Everything sent so far
    pub fn recorded(&self) -> Vec<Outbound> {
        self.lock().clone()
    }

    /// Texts of sent messages, in order
    pub fn message_texts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|o| match o {
                Outbound::Message { text, .. } => Some(text.clone()),
                Outbound::CallbackAnswer { .. } => None,
            })
            .collect()
    }

    /// The most recently sent message
    pub fn last_message(&self) -> Option<(ChatId, String, Option<ReplyMarkup>)> {
        self.lock().iter().rev().find_map(|o| match o {
            Outbound::Message { chat, text, markup } => Some((*chat, text.clone(), markup.clone())),
            Outbound::CallbackAnswer { .. } => None,
        })
    }

    /// The most recent callback answer as (callback id, toast text)
    pub fn last_callback_answer(&self) -> Option<(String, Option<String>)> {
        self.lock().iter().rev().find_map(|o| match o {
            Outbound::CallbackAnswer { callback_id, text } => {
                Some((callback_id.clone(), text.clone()))
            }
            Outbound::Message { .. } => None,
        })
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<()> {
        self.record(Outbound::Message {
            chat,
            text: text.to_string(),
            markup,
        })
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.record(Outbound::CallbackAnswer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
        })
    }
}
