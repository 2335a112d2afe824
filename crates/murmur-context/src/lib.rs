// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound half of the Murmur dialogue codec.
//!
//! Turns a stored conversation into what the provider sees:
//! - **Prompt**: base instruction plus the protocol blocks the conversation
//!   enables
//! - **Encoder**: truncated history with stickers, transfers and narration
//!   re-rendered as text and old images archived
//! - **Wire**: the `parts` and `role/content` request layouts
//! - **Tokens**: a size estimate computed over the encoder's exact output

pub mod encoder;
pub mod prompt;
pub mod tokens;
pub mod wire;

pub use encoder::{
    EncodedMessage, EncodedPart, EncodedRequest, archived_image_placeholder, encode,
};
pub use prompt::compose_system_instruction;
pub use tokens::{IMAGE_TOKEN_COST, TokenEstimate, estimate_request, estimate_tokens, text_cost};
pub use wire::{PartsRequest, RoleContentMessage};
