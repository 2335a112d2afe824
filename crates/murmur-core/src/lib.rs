// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Murmur dialogue codec.
//!
//! This crate provides the message model, the collaborator traits the codec
//! consumes, and the error type shared by the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::MurmurError;
pub use traits::StickerDirectory;
pub use types::{
    Attachment, AttachmentKind, DialogueMode, Message, MessageId, MessageKind, Role, Settlement,
    Sticker, TransferStatus,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn murmur_error_variants_render() {
        let io = MurmurError::Io {
            path: "/tmp/x.json".into(),
            source: std::io::Error::other("gone"),
        };
        assert!(io.to_string().contains("/tmp/x.json"));

        let settled = MurmurError::TransferAlreadySettled {
            id: MessageId("42".into()),
            status: TransferStatus::Refunded,
        };
        assert_eq!(settled.to_string(), "transfer 42 is already refunded");

        let not = MurmurError::NotATransfer { id: "7".into() };
        assert_eq!(not.to_string(), "message 7 is not a transfer");
    }

    #[test]
    fn dialogue_mode_defaults_to_normal() {
        assert_eq!(DialogueMode::default(), DialogueMode::Normal);
    }
}
