// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns scanned segments into stored messages.

use murmur_core::types::{EXPIRED_STICKER_CAPTION, STICKER_MIME_TYPE};
use murmur_core::{
    Attachment, DialogueMode, Message, MessageId, MessageKind, Role, StickerDirectory,
    TransferStatus,
};
use tracing::{debug, warn};

use crate::scanner::Segment;
use crate::splitter::{self, Draft};

/// Builds one batch of messages sharing a base timestamp.
///
/// The k-th message gets id `"{base}-{k}"` and timestamp `base + k + 1`, so
/// the same reply decoded twice yields identical ids.
pub struct MessageAssembler<'a, S: StickerDirectory + ?Sized> {
    base_timestamp: i64,
    role: Role,
    mode: DialogueMode,
    stickers: &'a S,
    messages: Vec<Message>,
}

/// Messages produced for one reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub messages: Vec<Message>,
    /// Set when nothing parsed and the fallback message was emitted.
    pub degraded: bool,
}

impl<'a, S: StickerDirectory + ?Sized> MessageAssembler<'a, S> {
    pub fn new(base_timestamp: i64, role: Role, mode: DialogueMode, stickers: &'a S) -> Self {
        Self {
            base_timestamp,
            role,
            mode,
            stickers,
            messages: Vec::new(),
        }
    }

    /// Appends the messages for one segment.
    pub fn push_segment(&mut self, segment: &Segment) {
        match segment {
            Segment::Sticker(id) => self.push_sticker(id),
            Segment::Transfer(amount) => self.push_transfer(*amount),
            Segment::Verbatim(text) => self.push_draft(Draft::speech(text.as_str())),
            Segment::Text(text) => {
                for draft in splitter::split(text, self.mode) {
                    self.push_draft(draft);
                }
            }
        }
    }

    fn push_sticker(&mut self, id: &str) {
        let message = match self.stickers.lookup(id) {
            Some(sticker) => self
                .next_message("")
                .with_kind(MessageKind::Sticker {
                    description: sticker.description.clone(),
                })
                .with_attachment(Attachment::image(STICKER_MIME_TYPE, sticker.data.clone())),
            None => {
                debug!(sticker_id = id, "sticker not in directory, using caption");
                self.next_message(EXPIRED_STICKER_CAPTION)
            }
        };
        self.messages.push(message);
    }

    fn push_transfer(&mut self, amount: f64) {
        let message = self.next_message("").with_kind(MessageKind::Transfer {
            amount,
            status: TransferStatus::Pending,
        });
        self.messages.push(message);
    }

    fn push_draft(&mut self, draft: Draft) {
        let message = self.next_message(draft.text).with_kind(MessageKind::Text {
            is_action: draft.is_action,
        });
        self.messages.push(message);
    }

    /// Appends one message carrying `text` and every attachment.
    ///
    /// A turn that comes with a photo is kept whole, never split.
    pub fn push_attached(&mut self, text: &str, attachments: Vec<Attachment>) {
        let mut message = self.next_message(text.trim());
        message.attachments = attachments;
        self.messages.push(message);
    }

    fn next_message(&self, content: impl Into<String>) -> Message {
        let k = self.messages.len() as i64;
        Message::new(
            MessageId(format!("{}-{k}", self.base_timestamp)),
            self.role,
            content,
            self.base_timestamp.saturating_add(k + 1),
        )
    }

    /// Closes the batch.
    ///
    /// If `source` is non-blank but produced no messages, one speech message
    /// carrying the trimmed source is emitted instead.
    pub fn finish(mut self, source: &str) -> Assembled {
        let source = source.trim();
        let degraded = self.messages.is_empty() && !source.is_empty();
        if degraded {
            warn!(
                base_timestamp = self.base_timestamp,
                role = %self.role,
                len = source.len(),
                "reply produced no messages, keeping raw text"
            );
            metrics::counter!("murmur_codec_degraded_total").increment(1);
            let fallback = self.next_message(source);
            self.messages.push(fallback);
        }
        Assembled {
            messages: self.messages,
            degraded,
        }
    }
}
