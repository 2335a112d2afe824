// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Murmur chat client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of being silently ignored.

use murmur_core::DialogueMode;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level Murmur configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MurmurConfig {
    /// Process-level settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Per-conversation codec settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Sticker directory entries.
    #[serde(default)]
    pub stickers: Vec<StickerConfig>,
}

/// Process-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Provider request layout produced by the context encoder.
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
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestShape {
    /// One `parts` array per turn (`contents[].parts[]`).
    #[default]
    Parts,
    /// `role` plus `content` that is a string or a mixed array.
    RoleContent,
}

/// Codec settings for one conversation.
///
/// The protocol-block gates live here as plain fields; nothing in the codec
/// reads global toggles.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// User-authored base system instruction.
    #[serde(default)]
    pub system_instruction: String,

    /// Path to a file holding the base instruction. Takes precedence over
    /// `system_instruction` when readable and non-empty.
    #[serde(default)]
    pub system_instruction_file: Option<String>,

    /// Speech/narration grammar.
    #[serde(default)]
    pub dialogue_mode: DialogueMode,

    /// Number of most recent messages replayed to the model. 0 replays all.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Number of most recent replayed messages allowed to keep image bytes.
    #[serde(default = "default_visual_memory_limit")]
    pub visual_memory_limit: usize,

    /// Teach the model the sticker vocabulary.
    #[serde(default)]
    pub enable_stickers: bool,

    /// Teach the model the transfer vocabulary.
    #[serde(default)]
    pub enable_transfer: bool,

    /// Currency symbol prefixed to amounts when transfers are replayed.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Layout of the provider request.
    #[serde(default)]
    pub request_shape: RequestShape,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_instruction: String::new(),
            system_instruction_file: None,
            dialogue_mode: DialogueMode::default(),
            history_limit: default_history_limit(),
            visual_memory_limit: default_visual_memory_limit(),
            enable_stickers: false,
            enable_transfer: false,
            currency_symbol: default_currency_symbol(),
            request_shape: RequestShape::default(),
        }
    }
}

fn default_history_limit() -> usize {
    20
}

fn default_visual_memory_limit() -> usize {
    3
}

fn default_currency_symbol() -> String {
    "￥".to_string()
}

/// A sticker directory entry. The image is read from `path` at startup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StickerConfig {
    /// Id the model uses in `<STICKER:ID>`.
    pub id: String,

    /// Semantic caption shown to the model.
    pub description: String,

    /// Path to the sticker image.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_defaults() {
        let chat = ChatConfig::default();
        assert_eq!(chat.dialogue_mode, DialogueMode::Normal);
        assert_eq!(chat.history_limit, 20);
        assert_eq!(chat.visual_memory_limit, 3);
        assert!(!chat.enable_stickers);
        assert!(!chat.enable_transfer);
        assert_eq!(chat.currency_symbol, "￥");
        assert_eq!(chat.request_shape, RequestShape::Parts);
    }

    #[test]
    fn request_shape_strings() {
        use std::str::FromStr;

        assert_eq!(RequestShape::RoleContent.to_string(), "role_content");
        assert_eq!(
            RequestShape::from_str("role_content").unwrap(),
            RequestShape::RoleContent
        );
    }

    #[test]
    fn stickers_array_deserializes() {
        let toml_str = r#"
[[stickers]]
id = "wave"
description = "waving hello"
path = "stickers/wave.png"
"#;
        let config: MurmurConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.stickers.len(), 1);
        assert_eq!(config.stickers[0].id, "wave");
    }

    #[test]
    fn sticker_requires_path() {
        let toml_str = r#"
[[stickers]]
id = "wave"
description = "waving hello"
"#;
        assert!(toml::from_str::<MurmurConfig>(toml_str).is_err());
    }
}
