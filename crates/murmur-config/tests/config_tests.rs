// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Murmur configuration system.

use murmur_config::diagnostic::ConfigError;
use murmur_config::model::{MurmurConfig, RequestShape};
use murmur_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};
use murmur_core::DialogueMode;

/// A file using every section deserializes into the expected values.
#[test]
fn full_toml_deserializes() {
    let toml = r#"
[app]
log_level = "debug"

[chat]
system_instruction = "You are Mika."
dialogue_mode = "novel"
history_limit = 40
visual_memory_limit = 1
enable_stickers = true
enable_transfer = true
currency_symbol = "$"
request_shape = "role_content"

[[stickers]]
id = "wave"
description = "waving hello"
path = "stickers/wave.png"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.chat.system_instruction, "You are Mika.");
    assert_eq!(config.chat.dialogue_mode, DialogueMode::Novel);
    assert_eq!(config.chat.history_limit, 40);
    assert_eq!(config.chat.visual_memory_limit, 1);
    assert!(config.chat.enable_stickers);
    assert!(config.chat.enable_transfer);
    assert_eq!(config.chat.currency_symbol, "$");
    assert_eq!(config.chat.request_shape, RequestShape::RoleContent);
    assert_eq!(config.stickers[0].path, "stickers/wave.png");
}

/// An empty file yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.chat.dialogue_mode, DialogueMode::Normal);
    assert_eq!(config.chat.history_limit, 20);
    assert_eq!(config.chat.visual_memory_limit, 3);
    assert!(config.stickers.is_empty());
}

/// A misspelled key is reported with a suggestion.
#[test]
fn unknown_key_gets_suggestion() {
    let toml = "[chat]\nhistroy_limit = 5\n";

    let errors = load_and_validate_str(toml).expect_err("typo should be rejected");
    let suggestion = errors.iter().find_map(|e| match e {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } if key == "histroy_limit" => suggestion.clone(),
        _ => None,
    });
    assert_eq!(suggestion.as_deref(), Some("history_limit"));
}

/// Unknown top-level sections are rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let err = load_config_from_str("[provider]\nname = \"x\"\n")
        .expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("provider"),
        "error should mention the unknown section, got: {err_str}"
    );
}

/// A negative limit is a type error, not a silent wrap-around.
#[test]
fn negative_history_limit_is_rejected() {
    let errors =
        load_and_validate_str("[chat]\nhistory_limit = -1\n").expect_err("should be rejected");
    assert!(!errors.is_empty());
}

/// Validation runs after a successful parse.
#[test]
fn validation_errors_surface_through_loader() {
    let toml = r#"
[[stickers]]
id = "wave"
description = "hello"
path = "a.png"

[[stickers]]
id = "wave"
description = "again"
path = "b.png"
"#;
    let errors = load_and_validate_str(toml).expect_err("duplicate ids should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("duplicate sticker id"))
    ));
}

/// Explicit config files are read from disk.
#[test]
fn load_from_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("murmur.toml");
    std::fs::write(&path, "[chat]\ndialogue_mode = \"novel\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file config should load");
    assert_eq!(config.chat.dialogue_mode, DialogueMode::Novel);
}

/// `MURMUR_CHAT_HISTORY_LIMIT` maps to `chat.history_limit`, not
/// `chat.history.limit`.
#[test]
fn env_var_overrides_local_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("murmur.toml", "[chat]\nhistory_limit = 8\nenable_stickers = true\n")?;
        jail.set_env("MURMUR_CHAT_HISTORY_LIMIT", "2");
        jail.set_env("MURMUR_APP_LOG_LEVEL", "warn");

        let config = murmur_config::load_config()?;
        assert_eq!(config.chat.history_limit, 2);
        assert!(config.chat.enable_stickers);
        assert_eq!(config.app.log_level, "warn");
        Ok(())
    });
}

/// Upper-case variables are the normal spelling and must pass validation.
#[test]
fn env_vars_survive_full_validation() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("MURMUR_CHAT_DIALOGUE_MODE", "novel");
        jail.set_env("MURMUR_CHAT_ENABLE_TRANSFER", "true");

        let config = murmur_config::load_and_validate()
            .map_err(|errors| format!("{} config errors", errors.len()))?;
        assert_eq!(config.chat.dialogue_mode, DialogueMode::Novel);
        assert!(config.chat.enable_transfer);
        Ok(())
    });
}

/// Defaults serialize and load back unchanged.
#[test]
fn serialized_defaults_round_trip_through_toml() {
    let rendered = toml::to_string(&MurmurConfig::default()).unwrap();
    let config = load_config_from_str(&rendered).unwrap();
    assert_eq!(config.chat, MurmurConfig::default().chat);
}
