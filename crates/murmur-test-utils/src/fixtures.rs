// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message and sticker constructors.

use murmur_core::types::STICKER_MIME_TYPE;
use murmur_core::{Attachment, Message, MessageKind, Role, Sticker, TransferStatus};

/// Bytes standing in for a JPEG photo.
pub const PHOTO_BYTES: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

/// Plain speech.
pub fn text(id: &str, role: Role, content: &str, timestamp: i64) -> Message {
    Message::new(id, role, content, timestamp)
}

/// Narration.
pub fn action(id: &str, role: Role, content: &str, timestamp: i64) -> Message {
    Message::new(id, role, content, timestamp).with_kind(MessageKind::Text { is_action: true })
}

/// Speech carrying one JPEG attachment.
pub fn photo(id: &str, role: Role, caption: &str, timestamp: i64) -> Message {
    Message::new(id, role, caption, timestamp)
        .with_attachment(Attachment::image("image/jpeg", PHOTO_BYTES.to_vec()))
}

/// A sent sticker, with its image attached the way the assembler stores it.
pub fn sticker_message(id: &str, role: Role, description: &str, timestamp: i64) -> Message {
    Message::new(id, role, "", timestamp)
        .with_kind(MessageKind::Sticker {
            description: description.to_string(),
        })
        .with_attachment(Attachment::image(STICKER_MIME_TYPE, vec![0x89, 0x50]))
}

/// A transfer card.
pub fn transfer(
    id: &str,
    role: Role,
    amount: f64,
    status: TransferStatus,
    timestamp: i64,
) -> Message {
    Message::new(id, role, "", timestamp).with_kind(MessageKind::Transfer { amount, status })
}

/// A directory sticker whose image bytes are derived from its id.
pub fn sticker(id: &str, description: &str) -> Sticker {
    Sticker {
        id: id.to_string(),
        data: id.as_bytes().to_vec(),
        description: description.to_string(),
    }
}

/// A small directory: `wave`, `cry`, `heart`.
pub fn sample_directory() -> Vec<Sticker> {
    vec![
        sticker("wave", "waving hello"),
        sticker("cry", "crying loudly"),
        sticker("heart", "sending love"),
    ]
}
