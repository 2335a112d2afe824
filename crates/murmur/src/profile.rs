// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolves the file references in a loaded configuration.

use murmur_config::{ChatConfig, MurmurConfig, StickerConfig};
use murmur_core::Sticker;
use tracing::{info, warn};

/// Chat settings with the instruction file inlined, plus the sticker
/// directory with image bytes loaded.
#[derive(Debug, Clone)]
pub struct Profile {
    pub chat: ChatConfig,
    pub stickers: Vec<Sticker>,
}

/// Reads the instruction file and sticker images named by `config`.
///
/// Unreadable files are logged and skipped: the inline instruction is used
/// instead, and a missing sticker behaves like a deleted one.
pub async fn load_profile(config: &MurmurConfig) -> Profile {
    let mut chat = config.chat.clone();
    if let Some(instruction) = read_instruction_file(chat.system_instruction_file.as_deref()).await
    {
        chat.system_instruction = instruction;
    }

    let mut stickers = Vec::with_capacity(config.stickers.len());
    for entry in &config.stickers {
        if let Some(sticker) = load_sticker(entry).await {
            stickers.push(sticker);
        }
    }

    Profile { chat, stickers }
}

async fn read_instruction_file(path: Option<&str>) -> Option<String> {
    let path = path?;
    match tokio::fs::read_to_string(path).await {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                warn!(path, "system instruction file is empty, using inline instruction");
                return None;
            }
            info!(path, "loaded system instruction from file");
            Some(trimmed.to_string())
        }
        Err(e) => {
            warn!(path, error = %e, "failed to read system instruction file, falling back");
            None
        }
    }
}

async fn load_sticker(entry: &StickerConfig) -> Option<Sticker> {
    match tokio::fs::read(&entry.path).await {
        Ok(data) => Some(Sticker {
            id: entry.id.clone(),
            data,
            description: entry.description.clone(),
        }),
        Err(e) => {
            warn!(
                sticker_id = entry.id.as_str(),
                path = entry.path.as_str(),
                error = %e,
                "sticker image unreadable, leaving it out of the directory"
            );
            None
        }
    }
}
