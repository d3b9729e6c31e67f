// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat bot front end
//!
//! The router maps chat events onto the task store and answers through a
//! `Gateway`. The Telegram adapter is one gateway; `MockGateway` records
//! outbound traffic for tests.
//!
//! ## Event flow
//!
//! 1. The adapter turns an update into an `InboundEvent`
//! 2. The router checks conversation state (is a task text expected?)
//! 3. Tasks are loaded, mutated and saved under the user's lock
//! 4. Replies and callback answers go back through the gateway

pub mod callback;
pub mod conversation;
pub mod events;
pub mod gateway;
pub mod mock_gateway;
pub mod router;
pub mod telegram;

pub use callback::{CallbackAction, CallbackPayload};
pub use conversation::{ConversationStore, PendingInput};
pub use events::{ChatId, InboundEvent, InlineButton, MenuOption, ReplyMarkup};
pub use gateway::Gateway;
pub use mock_gateway::{MockGateway, Outbound};
pub use router::{Router, RouterConfig};
pub use telegram::{TelegramGateway, TelegramRouter};
