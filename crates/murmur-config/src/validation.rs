// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::MurmurConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of stopping at the first one.
pub fn validate_config(config: &MurmurConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` must be one of {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.chat.currency_symbol.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "chat.currency_symbol must not be empty".to_string(),
        });
    }

    let mut seen_ids = HashSet::new();
    for (i, sticker) in config.stickers.iter().enumerate() {
        let id = sticker.id.as_str();
        if id.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("stickers[{i}].id must not be empty"),
            });
        } else if id.contains('>') || id.chars().any(char::is_whitespace) {
            // The id must survive a round trip through `<STICKER:ID>`.
            errors.push(ConfigError::Validation {
                message: format!(
                    "stickers[{i}].id `{id}` must not contain `>` or whitespace"
                ),
            });
        }

        if !id.is_empty() && !seen_ids.insert(id) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate sticker id `{id}` in [[stickers]] array"),
            });
        }

        if sticker.description.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("stickers[{i}].description must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
