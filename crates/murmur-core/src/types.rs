// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message model shared by the codec, the context encoder, and the binary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::MurmurError;

/// Caption stored in place of a sticker whose id no longer resolves.
pub const EXPIRED_STICKER_CAPTION: &str = "[Sticker expired]";

/// MIME type given to sticker attachments.
pub const STICKER_MIME_TYPE: &str = "image/png";

/// Unique identifier for a message within one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Author of a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person using the client.
    User,
    /// The language model.
    Model,
    /// UI-only notices. Never replayed to the model.
    System,
}

impl Role {
    /// Name used for this role when a message is replayed to the model as text.
    pub fn sender_label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Model => "Assistant",
            Role::System => "System",
        }
    }

    /// The party that receives a transfer sent by this role.
    ///
    /// System notices never take part in transfers.
    pub fn counterpart(self) -> Option<Role> {
        match self {
            Role::User => Some(Role::Model),
            Role::Model => Some(Role::User),
            Role::System => None,
        }
    }
}

/// Grammar used to split text into speech and narration.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DialogueMode {
    /// Bracket heuristic: `(sighs)` is narration, everything else is speech.
    #[default]
    Normal,
    /// Explicit `<action>` / `<say>` tags.
    Novel,
}

/// Lifecycle state of a money transfer card.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Accepted,
    Refunded,
}

impl TransferStatus {
    /// Capitalized label used when the transfer is replayed to the model.
    pub fn replay_label(self) -> &'static str {
        match self {
            TransferStatus::Pending => "Pending",
            TransferStatus::Accepted => "Accepted",
            TransferStatus::Refunded => "Refunded",
        }
    }

    /// Whether the transfer can no longer change state.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TransferStatus::Pending)
    }
}

/// How the recipient resolved a pending transfer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Settlement {
    Accept,
    Refund,
}

impl Settlement {
    /// Status a pending transfer moves to under this settlement.
    pub fn status(self) -> TransferStatus {
        match self {
            Settlement::Accept => TransferStatus::Accepted,
            Settlement::Refund => TransferStatus::Refunded,
        }
    }
}

/// What a message represents. A message has exactly one kind, so a sticker
/// can never also be a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageKind {
    /// Speech, or narration when `is_action` is set.
    Text {
        #[serde(default, skip_serializing_if = "is_false")]
        is_action: bool,
    },
    /// A sticker image; `description` is its semantic caption.
    Sticker { description: String },
    /// A money transfer card.
    Transfer {
        amount: f64,
        status: TransferStatus,
    },
}

impl Default for MessageKind {
    fn default() -> Self {
        MessageKind::Text { is_action: false }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Kind of binary attachment. Only images exist today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    #[default]
    Image,
}

/// Binary payload owned by a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub kind: AttachmentKind,
    pub mime_type: String,
    /// Raw bitmap bytes. Serialized as base64.
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates an image attachment.
    pub fn image(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            kind: AttachmentKind::Image,
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// A sticker in the profile-level sticker directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub description: String,
}

/// One chat bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    #[serde(default)]
    pub content: String,
    /// Ordering key. Rendering order is ascending timestamp order.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub kind: MessageKind,
}

impl Message {
    /// Creates a plain speech message.
    pub fn new(
        id: impl Into<MessageId>,
        role: Role,
        content: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
            timestamp,
            attachments: Vec::new(),
            kind: MessageKind::default(),
        }
    }

    /// Replaces the message kind.
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Whether this is narration rather than speech.
    pub fn is_action(&self) -> bool {
        matches!(self.kind, MessageKind::Text { is_action: true })
    }

    /// Whether this message is a sticker.
    pub fn is_sticker(&self) -> bool {
        matches!(self.kind, MessageKind::Sticker { .. })
    }

    /// Returns the transfer amount and status if this is a transfer card.
    pub fn transfer(&self) -> Option<(f64, TransferStatus)> {
        match self.kind {
            MessageKind::Transfer { amount, status } => Some((amount, status)),
            _ => None,
        }
    }

    /// Whether this is a transfer that has not been accepted or refunded yet.
    pub fn is_pending_transfer(&self) -> bool {
        matches!(
            self.kind,
            MessageKind::Transfer {
                status: TransferStatus::Pending,
                ..
            }
        )
    }

    /// Moves a pending transfer to its terminal state.
    ///
    /// A transfer settles exactly once; a second attempt is rejected and the
    /// stored status is left untouched.
    pub fn settle_transfer(
        &mut self,
        settlement: Settlement,
    ) -> Result<TransferStatus, MurmurError> {
        match &mut self.kind {
            MessageKind::Transfer { status, .. } if status.is_terminal() => {
                Err(MurmurError::TransferAlreadySettled {
                    id: self.id.clone(),
                    status: *status,
                })
            }
            MessageKind::Transfer { status, .. } => {
                *status = settlement.status();
                Ok(*status)
            }
            _ => Err(MurmurError::NotATransfer {
                id: self.id.clone(),
            }),
        }
    }

    /// Short text for the conversation list.
    pub fn preview(&self) -> &str {
        if !self.content.is_empty() {
            return &self.content;
        }
        match self.kind {
            MessageKind::Sticker { .. } => "[Sticker]",
            MessageKind::Transfer { .. } => "[Transfer]",
            MessageKind::Text { .. } if !self.attachments.is_empty() => "[Image]",
            MessageKind::Text { .. } => "",
        }
    }
}

/// Serde adapter storing bytes as a standard base64 string.
mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(status: TransferStatus) -> Message {
        Message::new("t-1", Role::User, "", 10).with_kind(MessageKind::Transfer {
            amount: 50.0,
            status,
        })
    }

    #[test]
    fn pending_transfer_settles_once() {
        let mut msg = transfer(TransferStatus::Pending);
        assert_eq!(
            msg.settle_transfer(Settlement::Accept).unwrap(),
            TransferStatus::Accepted
        );

        let err = msg.settle_transfer(Settlement::Refund).unwrap_err();
        assert!(matches!(
            err,
            MurmurError::TransferAlreadySettled {
                status: TransferStatus::Accepted,
                ..
            }
        ));
        assert_eq!(msg.transfer(), Some((50.0, TransferStatus::Accepted)));
    }

    #[test]
    fn settling_plain_text_is_rejected() {
        let mut msg = Message::new("m-1", Role::User, "hi", 1);
        let err = msg.settle_transfer(Settlement::Accept).unwrap_err();
        assert!(matches!(err, MurmurError::NotATransfer { .. }));
        assert_eq!(msg.kind, MessageKind::Text { is_action: false });
    }

    #[test]
    fn role_counterparts() {
        assert_eq!(Role::User.counterpart(), Some(Role::Model));
        assert_eq!(Role::Model.counterpart(), Some(Role::User));
        assert_eq!(Role::System.counterpart(), None);
        assert_eq!(Role::Model.sender_label(), "Assistant");
    }

    #[test]
    fn enum_strings_are_lowercase() {
        use std::str::FromStr;

        assert_eq!(DialogueMode::Novel.to_string(), "novel");
        assert_eq!(DialogueMode::from_str("normal").unwrap(), DialogueMode::Normal);
        assert_eq!(Role::from_str("model").unwrap(), Role::Model);
        assert_eq!(TransferStatus::Refunded.replay_label(), "Refunded");
    }

    #[test]
    fn message_json_shape() {
        let msg = Message::new("1-0", Role::Model, "", 2)
            .with_kind(MessageKind::Sticker {
                description: "wave".into(),
            })
            .with_attachment(Attachment::image(STICKER_MIME_TYPE, vec![1, 2, 3]));

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], "1-0");
        assert_eq!(json["role"], "model");
        assert_eq!(json["kind"]["type"], "sticker");
        assert_eq!(json["kind"]["description"], "wave");
        assert_eq!(json["attachments"][0]["data"], "AQID");
        assert_eq!(json["attachments"][0]["kind"], "image");

        let back: Message = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn minimal_json_uses_defaults() {
        let msg: Message = serde_json::from_str(
            r#"{"id": "a", "role": "user", "content": "hey", "timestamp": 5}"#,
        )
        .unwrap();
        assert!(msg.attachments.is_empty());
        assert!(!msg.is_action());
        assert_eq!(msg.preview(), "hey");
    }

    #[test]
    fn previews_for_special_kinds() {
        assert_eq!(transfer(TransferStatus::Pending).preview(), "[Transfer]");
        let image = Message::new("i", Role::User, "", 1)
            .with_attachment(Attachment::image("image/jpeg", vec![0]));
        assert_eq!(image.preview(), "[Image]");
    }
}
