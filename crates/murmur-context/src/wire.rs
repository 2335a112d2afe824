// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider request layouts.
//!
//! Both layouts carry the same content. They differ only in how roles are
//! named and how text and images are nested.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use murmur_core::Role;
use serde::{Deserialize, Serialize};

use crate::encoder::{EncodedPart, EncodedRequest};

// --- parts layout ---

/// `{ systemInstruction, contents }` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartsRequest {
    /// Omitted when the composed instruction is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<PartsContent>,
    pub contents: Vec<PartsContent>,
}

/// A turn (or the system instruction) as a list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartsContent {
    /// `user` or `model`. Absent on the system instruction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<Part>,
}

/// Either `{text}` or `{inlineData}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

/// Base64 image payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

// --- role/content layout ---

/// One entry of a `[{role, content}]` message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleContentMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    pub content: MessageContent,
}

/// A plain string, or an array of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A typed part inside [`MessageContent::Parts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// A `data:` URL carrying the image inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

pub(crate) fn parts_request(request: &EncodedRequest) -> PartsRequest {
    let system_instruction = (!request.system_instruction.is_empty()).then(|| PartsContent {
        role: None,
        parts: vec![Part::Text {
            text: request.system_instruction.clone(),
        }],
    });

    let contents = request
        .messages
        .iter()
        .map(|message| PartsContent {
            role: Some(parts_role(message.role).to_string()),
            parts: message.parts.iter().map(to_part).collect(),
        })
        .collect();

    PartsRequest {
        system_instruction,
        contents,
    }
}

fn parts_role(role: Role) -> &'static str {
    match role {
        Role::Model => "model",
        Role::User | Role::System => "user",
    }
}

fn to_part(part: &EncodedPart) -> Part {
    match part {
        EncodedPart::Text(text) => Part::Text { text: text.clone() },
        EncodedPart::Image { mime_type, data } => Part::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.clone(),
                data: STANDARD.encode(data),
            },
        },
    }
}

pub(crate) fn role_content_messages(request: &EncodedRequest) -> Vec<RoleContentMessage> {
    let mut out = Vec::with_capacity(request.messages.len() + 1);

    if !request.system_instruction.is_empty() {
        out.push(RoleContentMessage {
            role: "system".to_string(),
            content: MessageContent::Text(request.system_instruction.clone()),
        });
    }

    out.extend(request.messages.iter().map(|message| RoleContentMessage {
        role: chat_role(message.role).to_string(),
        content: to_content(&message.parts),
    }));
    out
}

fn chat_role(role: Role) -> &'static str {
    match role {
        Role::Model => "assistant",
        Role::User | Role::System => "user",
    }
}

/// A lone text part collapses to a string; no parts become `""`.
fn to_content(parts: &[EncodedPart]) -> MessageContent {
    match parts {
        [] => MessageContent::Text(String::new()),
        [EncodedPart::Text(text)] => MessageContent::Text(text.clone()),
        _ => MessageContent::Parts(
            parts
                .iter()
                .map(|part| match part {
                    EncodedPart::Text(text) => ContentPart::Text { text: text.clone() },
                    EncodedPart::Image { mime_type, data } => ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:{mime_type};base64,{}", STANDARD.encode(data)),
                        },
                    },
                })
                .collect(),
        ),
    }
}
