// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Offline subcommands
//!
//! Commands that read the task records directly, without connecting to
//! Telegram.

pub mod inspect;
