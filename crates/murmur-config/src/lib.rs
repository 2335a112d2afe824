// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Murmur chat client.
//!
//! TOML files layered through Figment, `MURMUR_` environment overrides,
//! strict unknown-key rejection, and miette diagnostics with typo hints.
//!
//! # Usage
//!
//! ```no_run
//! use murmur_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("history limit: {}", config.chat.history_limit);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{AppConfig, ChatConfig, MurmurConfig, RequestShape, StickerConfig};

/// Load configuration from the standard hierarchy and validate it.
pub fn load_and_validate() -> Result<MurmurConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from an explicit file and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<MurmurConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_sources([path.to_path_buf()])
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<MurmurConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

/// Validates a successful load, or converts the Figment error. Sources are
/// only read back from disk when there is an error to point into.
fn finish(
    loaded: Result<MurmurConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<MurmurConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                stickers = config.stickers.len(),
                mode = %config.chat.dialogue_mode,
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

fn collect_toml_sources() -> Vec<(String, String)> {
    read_sources(loader::config_search_paths())
}

/// Reads each existing file, keyed by the path string Figment reports.
fn read_sources(paths: impl IntoIterator<Item = std::path::PathBuf>) -> Vec<(String, String)> {
    paths
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let absolute = if path.is_absolute() {
                path
            } else {
                std::env::current_dir().ok()?.join(path)
            };
            Some((absolute.display().to_string(), content))
        })
        .collect()
}
