// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telegram transport
//!
//! Converts teloxide updates into `InboundEvent`s, renders `ReplyMarkup` as
//! Telegram keyboards, and runs the long-polling dispatcher.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{
        InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
        ReplyMarkup as TgReplyMarkup, Update,
    },
};

use crate::error::Result;
use crate::tasks::UserId;

use super::events::{ChatId, InboundEvent, MenuOption, ReplyMarkup};
use super::gateway::Gateway;
use super::router::Router;

/// Router wired to the Telegram gateway
pub type TelegramRouter = Router<TelegramGateway>;

/// `Gateway` backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

#[async_trait]
impl Gateway for TelegramGateway {
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<()> {
        let request = self
            .bot
            .send_message(teloxide::types::ChatId(chat.0), text.to_string());
        match markup {
            Some(markup) => request.reply_markup(render_markup(markup)).await?,
            None => request.await?,
        };
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        let mut request = self.bot.answer_callback_query(callback_id.to_string());
        if let Some(text) = text {
            request = request.text(text.to_string());
        }
        request.await?;
        Ok(())
    }
}

/// Render a markup as the Telegram keyboard type
pub fn render_markup(markup: ReplyMarkup) -> TgReplyMarkup {
    match markup {
        ReplyMarkup::MainMenu => {
            let rows = MenuOption::LAYOUT.iter().map(|row| {
                row.iter()
                    .map(|option| KeyboardButton::new(option.label()))
                    .collect::<Vec<_>>()
            });
            TgReplyMarkup::Keyboard(KeyboardMarkup::new(rows).resize_keyboard())
        }
        ReplyMarkup::Inline(rows) => {
            let rows = rows.into_iter().map(|row| {
                row.into_iter()
                    .map(|button| InlineKeyboardButton::callback(button.label, button.payload))
                    .collect::<Vec<_>>()
            });
            TgReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows))
        }
    }
}

/// Convert a text message; messages without text or sender are skipped
fn inbound_from_message(msg: &Message) -> Option<InboundEvent> {
    let from = msg.from.as_ref()?;
    let text = msg.text()?;
    Some(InboundEvent::from_text(
        ChatId(msg.chat.id.0),
        UserId(from.id.0),
        &from.first_name,
        text,
    ))
}

fn inbound_from_callback(query: &CallbackQuery) -> InboundEvent {
    let user = UserId(query.from.id.0);
    let chat = query
        .message
        .as_ref()
        .map(|m| ChatId(m.chat().id.0))
        .unwrap_or_else(|| ChatId::private(user));

    InboundEvent::Callback {
        id: query.id.to_string(),
        chat,
        user,
        payload: query.data.clone(),
    }
}

async fn message_handler(msg: Message, router: Arc<TelegramRouter>) -> ResponseResult<()> {
    match inbound_from_message(&msg) {
        Some(event) => router.handle(event).await,
        None => tracing::debug!(
            chat = msg.chat.id.0,
            "skipping message without text or sender"
        ),
    }
    Ok(())
}

async fn callback_handler(
    query: CallbackQuery,
    router: Arc<TelegramRouter>,
) -> ResponseResult<()> {
    router.handle(inbound_from_callback(&query)).await;
    Ok(())
}

/// Run the bot with long polling until ctrl-c
pub async fn run(router: Arc<TelegramRouter>, purge_interval: Duration) {
    let purger = router.clone();
    let purge_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(purge_interval);
        loop {
            ticker.tick().await;
            let purged = purger.conversations().purge_expired().await;
            if purged > 0 {
                tracing::debug!(purged, "dropped expired task prompts");
            }
        }
    });

    let bot = router.gateway().bot().clone();
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    tracing::info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        .default_handler(|upd| async move {
            tracing::debug!("Unhandled update: {:?}", upd);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    purge_task.abort();
    tracing::info!("Dispatcher stopped");
}
