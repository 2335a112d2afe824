// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Murmur integration tests.
//!
//! # Components
//!
//! - [`fixtures`] - one-line constructors for every message kind and stickers
//! - [`ConversationBuilder`] - stored conversations with increasing timestamps

pub mod conversation;
pub mod fixtures;

pub use conversation::ConversationBuilder;
pub use fixtures::{sample_directory, sticker};
