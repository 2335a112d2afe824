// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History encoding: stored messages to a provider-neutral request.

use murmur_config::{ChatConfig, RequestShape};
use murmur_core::{DialogueMode, Message, MessageKind, MurmurError, Role, StickerDirectory};
use tracing::debug;

use crate::prompt::compose_system_instruction;
use crate::wire::{self, PartsRequest, RoleContentMessage};

/// One part of a replayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedPart {
    Text(String),
    /// Raw image bytes; the wire shapes base64 them.
    Image { mime_type: String, data: Vec<u8> },
}

/// A replayed message. `role` is never [`Role::System`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage {
    pub role: Role,
    pub parts: Vec<EncodedPart>,
}

/// Provider-neutral request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    pub system_instruction: String,
    pub messages: Vec<EncodedMessage>,
}

impl EncodedRequest {
    /// `systemInstruction` + `contents[].parts[]` layout.
    pub fn to_parts_shape(&self) -> PartsRequest {
        wire::parts_request(self)
    }

    /// `[{role, content}]` layout with a leading system entry.
    pub fn to_role_content_shape(&self) -> Vec<RoleContentMessage> {
        wire::role_content_messages(self)
    }

    /// Serializes the request in the given layout.
    pub fn render(&self, shape: RequestShape) -> Result<serde_json::Value, MurmurError> {
        let rendered = match shape {
            RequestShape::Parts => serde_json::to_value(self.to_parts_shape()),
            RequestShape::RoleContent => serde_json::to_value(self.to_role_content_shape()),
        };
        rendered.map_err(|source| MurmurError::Json {
            context: format!("{shape} request"),
            source,
        })
    }

    /// Iterates every part of every message.
    pub fn parts(&self) -> impl Iterator<Item = &EncodedPart> {
        self.messages.iter().flat_map(|m| m.parts.iter())
    }
}

/// Text that replaces an image outside the visual memory window.
pub fn archived_image_placeholder(role: Role) -> String {
    format!(
        "[System: {} previously sent an image here. Image data archived to save context window.]",
        role.sender_label()
    )
}

/// Encodes a stored conversation for the provider.
///
/// Does not modify `messages`.
pub fn encode<S: StickerDirectory + ?Sized>(
    messages: &[Message],
    config: &ChatConfig,
    stickers: &S,
) -> EncodedRequest {
    let retained = retained_history(messages, config.history_limit);
    let visual_from = retained.len().saturating_sub(config.visual_memory_limit);

    let encoded: Vec<EncodedMessage> = retained
        .iter()
        .enumerate()
        .map(|(index, message)| encode_message(message, index >= visual_from, config))
        .collect();

    debug!(
        stored = messages.len(),
        replayed = encoded.len(),
        images_kept = retained.len() - visual_from,
        "encoded history"
    );

    EncodedRequest {
        system_instruction: compose_system_instruction(config, stickers),
        messages: encoded,
    }
}

/// Non-system messages, cut to the last `limit` (0 keeps everything).
fn retained_history(messages: &[Message], limit: usize) -> Vec<&Message> {
    let replayable: Vec<&Message> = messages.iter().filter(|m| m.role != Role::System).collect();
    if limit == 0 || replayable.len() <= limit {
        return replayable;
    }
    replayable[replayable.len() - limit..].to_vec()
}

fn encode_message(message: &Message, keep_images: bool, config: &ChatConfig) -> EncodedMessage {
    let sender = message.role.sender_label();
    let mut parts = Vec::new();

    match &message.kind {
        MessageKind::Sticker { description } => {
            parts.push(EncodedPart::Text(format!(
                "[{sender} sent a sticker: {description}]"
            )));
        }
        MessageKind::Transfer { amount, status } => {
            parts.push(EncodedPart::Text(format!(
                "[{sender} sent a transfer of {}{amount}. Status: {}]",
                config.currency_symbol,
                status.replay_label()
            )));
        }
        MessageKind::Text { is_action } => {
            if let Some(text) = render_text(&message.content, *is_action, config.dialogue_mode) {
                parts.push(EncodedPart::Text(text));
            }
            for attachment in &message.attachments {
                parts.push(if keep_images {
                    EncodedPart::Image {
                        mime_type: attachment.mime_type.clone(),
                        data: attachment.data.clone(),
                    }
                } else {
                    EncodedPart::Text(archived_image_placeholder(message.role))
                });
            }
        }
    }

    EncodedMessage {
        role: message.role,
        parts,
    }
}

/// Re-applies the dialogue grammar so history reinforces it.
fn render_text(content: &str, is_action: bool, mode: DialogueMode) -> Option<String> {
    if content.trim().is_empty() {
        return None;
    }
    let text = match mode {
        DialogueMode::Novel if is_action => format!("<action>{content}</action>"),
        DialogueMode::Novel => format!("<say>{content}</say>"),
        DialogueMode::Normal if is_action => format!("({content})"),
        DialogueMode::Normal => content.to_string(),
    };
    Some(text)
}
