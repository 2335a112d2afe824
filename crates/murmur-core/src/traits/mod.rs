// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator interfaces the codec consumes but does not own.

pub mod sticker;

pub use sticker::StickerDirectory;
