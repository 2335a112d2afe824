// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `murmur decode`, `murmur encode` and `murmur estimate`.

use std::path::{Path, PathBuf};

use murmur_codec::{DecodedTurn, Decoder};
use murmur_config::RequestShape;
use murmur_context::{TokenEstimate, encode, estimate_tokens};
use murmur_core::{Message, MurmurError, Role};
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::profile::Profile;

/// Reads a whole file, or stdin when `source` is `-`.
pub async fn read_input(source: &str) -> Result<String, MurmurError> {
    if source == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .map_err(|source| MurmurError::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(source)
        .await
        .map_err(|e| MurmurError::Io {
            path: PathBuf::from(source),
            source: e,
        })
}

/// Loads a conversation file: a JSON array of messages.
pub async fn read_conversation(path: &Path) -> Result<Vec<Message>, MurmurError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| MurmurError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| MurmurError::Json {
        context: path.display().to_string(),
        source,
    })
}

pub fn decode(
    raw: &str,
    base_timestamp: i64,
    role: Role,
    history: &[Message],
    profile: &Profile,
) -> DecodedTurn {
    Decoder::new(profile.chat.dialogue_mode, &profile.stickers)
        .with_role(role)
        .decode_turn(raw, base_timestamp, history)
}

pub fn encode_request(
    messages: &[Message],
    profile: &Profile,
    shape: RequestShape,
) -> Result<serde_json::Value, MurmurError> {
    encode(messages, &profile.chat, &profile.stickers).render(shape)
}

pub fn estimate(messages: &[Message], profile: &Profile) -> TokenEstimate {
    estimate_tokens(messages, &profile.chat, &profile.stickers)
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, MurmurError> {
    serde_json::to_string_pretty(value).map_err(|source| MurmurError::Json {
        context: "command output".to_string(),
        source,
    })
}
