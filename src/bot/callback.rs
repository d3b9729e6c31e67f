// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Inline button payloads
//!
//! A payload is `<action>_<index>_<owner>`, e.g. `complete_0_123456`. The
//! index is the task's position when the button was rendered and the owner
//! is the user the keyboard was rendered for.

use std::num::IntErrorKind;

use crate::tasks::UserId;

const DELIMITER: char = '_';

/// What a button does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    Complete,
    Remove,
    /// Any other action name; answered with "Unknown action."
    Unknown(String),
}

impl CallbackAction {
    pub fn as_str(&self) -> &str {
        match self {
            CallbackAction::Complete => "complete",
            CallbackAction::Remove => "remove",
            CallbackAction::Unknown(name) => name,
        }
    }

    fn parse(name: &str) -> Self {
        match name {
            "complete" => CallbackAction::Complete,
            "remove" => CallbackAction::Remove,
            other => CallbackAction::Unknown(other.to_string()),
        }
    }
}

/// Decoded button payload
///
/// `index` is kept signed and wide so that any numeric index decodes and is
/// rejected later as out of range, rather than as a malformed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackPayload {
    pub action: CallbackAction,
    pub index: i128,
    pub owner: UserId,
}

impl CallbackPayload {
    pub fn new(action: CallbackAction, index: usize, owner: UserId) -> Self {
        Self {
            action,
            index: index as i128,
            owner,
        }
    }

    /// The index as a position in a list of `len` tasks, if it is one
    pub fn position(&self, len: usize) -> Option<usize> {
        usize::try_from(self.index).ok().filter(|index| *index < len)
    }

    /// Encode to the string carried by the button
    pub fn encode(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.action.as_str(),
            DELIMITER,
            self.index,
            DELIMITER,
            self.owner
        )
    }

    /// Decode a button payload.
    ///
    /// Returns `None` unless there are exactly three fields, the index is an
    /// integer, and the owner is a numeric user id. Indexes too large for
    /// `i128` saturate.
    pub fn decode(data: &str) -> Option<Self> {
        let mut fields = data.split(DELIMITER);
        let action = fields.next()?;
        let index = parse_index(fields.next()?)?;
        let owner = fields.next()?.parse::<u64>().ok()?;
        if fields.next().is_some() || action.is_empty() {
            return None;
        }

        Some(Self {
            action: CallbackAction::parse(action),
            index,
            owner: UserId(owner),
        })
    }
}

fn parse_index(field: &str) -> Option<i128> {
    match field.parse::<i128>() {
        Ok(index) => Some(index),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i128::MAX),
            IntErrorKind::NegOverflow => Some(i128::MIN),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_wire_format() {
        let payload = CallbackPayload::new(CallbackAction::Complete, 0, UserId(123456));
        assert_eq!(payload.encode(), "complete_0_123456");

        let payload = CallbackPayload::new(CallbackAction::Remove, 4, UserId(7));
        assert_eq!(payload.encode(), "remove_4_7");
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            CallbackPayload::decode("remove_2_99"),
            Some(CallbackPayload::new(CallbackAction::Remove, 2, UserId(99)))
        );
    }

    #[test]
    fn test_decode_unknown_action_is_carried() {
        let payload = CallbackPayload::decode("archive_1_5").unwrap();
        assert_eq!(payload.action, CallbackAction::Unknown("archive".to_string()));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for data in [
            "",
            "complete",
            "complete_1",
            "complete_x_5",
            "complete_-_5",
            "complete_1.5_5",
            "complete_1_abc",
            "complete_1_5_extra",
            "_1_5",
        ] {
            assert_eq!(CallbackPayload::decode(data), None, "payload {:?}", data);
        }
    }

    #[test]
    fn test_decode_keeps_any_numeric_index() {
        let payload = CallbackPayload::decode("complete_-1_5").unwrap();
        assert_eq!(payload.index, -1);
        assert_eq!(payload.position(3), None);

        let payload = CallbackPayload::decode("remove_99999999999999999999999_5").unwrap();
        assert_eq!(payload.index, 99999999999999999999999);
        assert_eq!(payload.position(3), None);

        let payload =
            CallbackPayload::decode("remove_9999999999999999999999999999999999999999999_5")
                .unwrap();
        assert_eq!(payload.index, i128::MAX);

        let payload = CallbackPayload::decode("remove_-9999999999999999999999999999999999999999999_5")
            .unwrap();
        assert_eq!(payload.index, i128::MIN);
    }

    #[test]
    fn test_position_bounds() {
        let payload = CallbackPayload::new(CallbackAction::Complete, 2, UserId(5));
        assert_eq!(payload.position(3), Some(2));
        assert_eq!(payload.position(2), None);
        assert_eq!(payload.position(0), None);
    }

    #[test]
    fn test_encoded_payload_fits_telegram_limit() {
        let payload = CallbackPayload::new(CallbackAction::Complete, usize::MAX, UserId(u64::MAX));
        assert!(payload.encode().len() <= 64);
    }
}
