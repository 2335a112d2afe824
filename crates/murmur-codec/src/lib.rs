// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound half of the Murmur dialogue codec.
//!
//! A raw model reply goes through three stages:
//! - **Scanner**: strips echoed role labels, collects transfer settlement
//!   tokens, and cuts the text around `<STICKER:ID>` / `<TRANSFER:N>`.
//! - **Splitter**: breaks each text run into speech and narration using the
//!   conversation's dialogue mode.
//! - **Assembler**: numbers the resulting bubbles and guarantees that visible
//!   text is never lost.
//!
//! Text the user typed skips the scanner: its tokens stay literal, and in
//! novel mode it is kept as one speech bubble.
//!
//! Decoding never fails. It is a pure function of its inputs and is safe to
//! run on every prefix of a streaming reply.

pub mod assembler;
pub mod scanner;
pub mod settlement;
pub mod splitter;

use murmur_core::{Attachment, DialogueMode, Message, Role, StickerDirectory};
use serde::Serialize;

pub use assembler::MessageAssembler;
pub use settlement::{TransferTransition, apply_transitions, settle_pending, settlement_notice};

/// Everything one reply changes in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedTurn {
    /// New messages, in rendering order.
    pub messages: Vec<Message>,
    /// Pending transfers in the history that this reply settled.
    pub transitions: Vec<TransferTransition>,
    /// True when nothing parsed and the raw text was kept as one message.
    pub degraded: bool,
}

/// Decoder bound to a dialogue mode and sticker directory.
pub struct Decoder<'a, S: StickerDirectory + ?Sized> {
    mode: DialogueMode,
    role: Role,
    stickers: &'a S,
}

impl<'a, S: StickerDirectory + ?Sized> Decoder<'a, S> {
    /// Creates a decoder for model replies.
    pub fn new(mode: DialogueMode, stickers: &'a S) -> Self {
        Self {
            mode,
            role: Role::Model,
            stickers,
        }
    }

    /// Decodes text authored by `role` instead of the model.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Decodes `raw` into messages stamped after `base_timestamp`.
    pub fn decode(&self, raw: &str, base_timestamp: i64) -> Vec<Message> {
        self.assemble(&self.scan(raw), raw, base_timestamp)
            .messages
    }

    /// Decodes a turn that carries attachments into a single message.
    ///
    /// Without attachments this is the same as [`Decoder::decode`].
    pub fn decode_with_attachments(
        &self,
        raw: &str,
        base_timestamp: i64,
        attachments: Vec<Attachment>,
    ) -> Vec<Message> {
        if attachments.is_empty() {
            return self.decode(raw, base_timestamp);
        }
        let mut assembler =
            MessageAssembler::new(base_timestamp, self.role, self.mode, self.stickers);
        assembler.push_attached(raw, attachments);
        assembler.finish(raw).messages
    }

    /// Decodes `raw` and resolves its settlement tokens against `history`.
    ///
    /// `history` is not modified; pass the returned transitions to
    /// [`apply_transitions`] to persist them.
    pub fn decode_turn(&self, raw: &str, base_timestamp: i64, history: &[Message]) -> DecodedTurn {
        let scan = self.scan(raw);
        let assembled = self.assemble(&scan, raw, base_timestamp);
        let transitions = settle_pending(history, self.role, &scan.settlements);

        tracing::debug!(
            messages = assembled.messages.len(),
            transitions = transitions.len(),
            mode = %self.mode,
            "decoded turn"
        );

        DecodedTurn {
            messages: assembled.messages,
            transitions,
            degraded: assembled.degraded,
        }
    }

    fn scan(&self, raw: &str) -> scanner::Scan {
        match self.role {
            Role::User => scanner::scan_user_text(raw, self.mode),
            Role::Model | Role::System => scanner::scan(raw),
        }
    }

    fn assemble(
        &self,
        scan: &scanner::Scan,
        raw: &str,
        base_timestamp: i64,
    ) -> assembler::Assembled {
        let mut assembler =
            MessageAssembler::new(base_timestamp, self.role, self.mode, self.stickers);
        for segment in &scan.segments {
            assembler.push_segment(segment);
        }
        assembler.finish(raw)
    }
}

/// Decodes a model reply. Shorthand for [`Decoder::decode`].
pub fn decode<S: StickerDirectory + ?Sized>(
    raw: &str,
    base_timestamp: i64,
    mode: DialogueMode,
    stickers: &S,
) -> Vec<Message> {
    Decoder::new(mode, stickers).decode(raw, base_timestamp)
}
