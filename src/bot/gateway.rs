// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Gateway trait
//!
//! Defines the outbound side of the messaging transport.

use async_trait::async_trait;

use crate::error::Result;

use super::events::{ChatId, ReplyMarkup};

/// Outbound requests the router issues to the chat platform
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Send a text message, optionally with a keyboard attached
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<()>;

    /// Acknowledge a button press, optionally showing a short toast
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()>;
}
