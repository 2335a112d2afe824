// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Character-based token estimation.
//!
//! CJK ideographs count one token each; every other character costs a
//! quarter token, rounded up per string. The estimate runs over exactly
//! what [`encode`](crate::encode) would send, including archival
//! placeholders.

use murmur_config::ChatConfig;
use murmur_core::{Message, StickerDirectory};
use serde::Serialize;

use crate::encoder::{EncodedPart, EncodedRequest, encode};

/// Flat cost charged for every image part.
pub const IMAGE_TOKEN_COST: usize = 258;

/// Estimated prompt size, broken down by source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenEstimate {
    pub total: usize,
    pub system: usize,
    pub history: usize,
    pub images: usize,
}

/// Estimates the prompt that `encode(messages, config, stickers)` produces.
pub fn estimate_tokens<S: StickerDirectory + ?Sized>(
    messages: &[Message],
    config: &ChatConfig,
    stickers: &S,
) -> TokenEstimate {
    estimate_request(&encode(messages, config, stickers))
}

/// Estimates an already encoded request.
pub fn estimate_request(request: &EncodedRequest) -> TokenEstimate {
    let system = text_cost(&request.system_instruction);
    let (history, images) = request
        .parts()
        .fold((0, 0), |(history, images), part| match part {
            EncodedPart::Text(text) => (history + text_cost(text), images),
            EncodedPart::Image { .. } => (history, images + IMAGE_TOKEN_COST),
        });

    TokenEstimate {
        total: system + history + images,
        system,
        history,
        images,
    }
}

/// Estimated tokens for one string.
pub fn text_cost(text: &str) -> usize {
    let (cjk, other) = text.chars().fold((0usize, 0usize), |(cjk, other), c| {
        if is_cjk_ideograph(c) {
            (cjk + 1, other)
        } else {
            (cjk, other + 1)
        }
    });
    cjk + other.div_ceil(4)
}

fn is_cjk_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'      // unified ideographs
        | '\u{3400}'..='\u{4DBF}'    // extension A
        | '\u{20000}'..='\u{2A6DF}') // extension B
}
