// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System instruction composition.
//!
//! The base instruction is followed by one protocol block per enabled
//! feature. Each block teaches the model exactly the vocabulary the decoder
//! understands, so the two halves of the codec stay in step.

use murmur_config::ChatConfig;
use murmur_core::{DialogueMode, Sticker, StickerDirectory};

/// Teaches the `<action>` / `<say>` grammar.
pub const NOVEL_MODE_BLOCK: &str = "\
[IMMERSIVE/NOVEL DIALOGUE MODE ENABLED]
You are writing a visual novel script. Your reply is parsed by a strict program.

FORMATTING RULES:
1. Use exactly two tags:
   <action>...</action> for narration: movement, expressions, thoughts, surroundings.
   <say>...</say> for every line the character speaks aloud.
2. Do not invent other tags such as <smile>, <think> or <scene>, and do not add attributes.
3. Do not write text outside the tags. Do not use brackets or quotation marks for speech.
4. Always close every tag.

EXAMPLE:
<action>She pushes the door open and looks around.</action>
<say>Is anyone home?</say>";

const STICKER_RULES: &str = "\
RULES FOR STICKERS:
1. To send a sticker, write its tag on a line of its own: <STICKER:ID>
2. Use only the tag, never Markdown image syntax.
3. Stickers can be mixed with text. Use them when the emotion fits, not in every reply.
4. Stickers from the user appear as \"[User sent a sticker: ...]\".
5. Your own stickers are recorded as \"[Assistant sent a sticker: ...]\". Never write these records yourself.";

/// Composes the full system instruction for `config`.
///
/// Pieces appear in a fixed order (base, novel grammar, stickers, transfers)
/// and are separated by a blank line. Disabled or empty pieces are skipped.
pub fn compose_system_instruction<S: StickerDirectory + ?Sized>(
    config: &ChatConfig,
    stickers: &S,
) -> String {
    let mut blocks: Vec<String> = Vec::with_capacity(4);

    let base = config.system_instruction.trim();
    if !base.is_empty() {
        blocks.push(base.to_string());
    }

    if config.dialogue_mode == DialogueMode::Novel {
        blocks.push(NOVEL_MODE_BLOCK.to_string());
    }

    if config.enable_stickers {
        let listing = stickers.listing();
        if !listing.is_empty() {
            blocks.push(sticker_block(&listing));
        }
    }

    if config.enable_transfer {
        blocks.push(transfer_block(&config.currency_symbol));
    }

    blocks.join("\n\n")
}

fn sticker_block(stickers: &[&Sticker]) -> String {
    let listing = stickers
        .iter()
        .map(|s| format!("- ID: {}, Meaning: {}", s.id, s.description))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "[STICKER PROTOCOL ENABLED]\n\
         You can send sticker images to express emotions or reactions.\n\
         Available stickers:\n\
         {listing}\n\n\
         {STICKER_RULES}"
    )
}

fn transfer_block(currency: &str) -> String {
    format!(
        "[TRANSFER PROTOCOL ENABLED]\n\
         You can send and receive simulated money transfers.\n\
         RULES FOR TRANSFERS:\n\
         1. To send money, write this tag on a line of its own: <TRANSFER:AMOUNT> \
         (for example <TRANSFER:100> sends {currency}100).\n\
         2. Transfers from the user appear as \"[User sent a transfer of ...]\".\n\
         3. To accept the user's pending transfer, write <ACCEPT_TRANSFER> on a line of its own.\n\
         4. To refuse it and give the money back, write <REJECT_TRANSFER> on a line of its own.\n\
         5. Put nothing else inside these tags.\n\
         6. Only use transfers when they fit the roleplay.\n\
         7. Never repeat bracketed history records like \"[User sent ...]\" in your reply."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stickers() -> Vec<Sticker> {
        vec![Sticker {
            id: "wave".into(),
            data: vec![],
            description: "waving hello".into(),
        }]
    }

    #[test]
    fn base_only_by_default() {
        let config = ChatConfig {
            system_instruction: "  You are Mika.  ".into(),
            ..Default::default()
        };
        assert_eq!(compose_system_instruction(&config, &stickers()), "You are Mika.");
    }

    #[test]
    fn blocks_follow_fixed_order() {
        let config = ChatConfig {
            system_instruction: "Base.".into(),
            dialogue_mode: DialogueMode::Novel,
            enable_stickers: true,
            enable_transfer: true,
            ..Default::default()
        };
        let composed = compose_system_instruction(&config, &stickers());

        let novel = composed.find("[IMMERSIVE/NOVEL DIALOGUE MODE ENABLED]").unwrap();
        let sticker = composed.find("[STICKER PROTOCOL ENABLED]").unwrap();
        let transfer = composed.find("[TRANSFER PROTOCOL ENABLED]").unwrap();
        assert!(composed.starts_with("Base.\n\n"));
        assert!(novel < sticker && sticker < transfer);
        assert!(composed.contains("- ID: wave, Meaning: waving hello"));
    }

    #[test]
    fn sticker_block_needs_stickers() {
        let config = ChatConfig {
            enable_stickers: true,
            ..Default::default()
        };
        let empty: Vec<Sticker> = Vec::new();
        assert_eq!(compose_system_instruction(&config, &empty), "");
    }

    #[test]
    fn empty_base_is_skipped() {
        let config = ChatConfig {
            enable_transfer: true,
            currency_symbol: "$".into(),
            ..Default::default()
        };
        let composed = compose_system_instruction(&config, &stickers());
        assert!(composed.starts_with("[TRANSFER PROTOCOL ENABLED]"));
        assert!(composed.contains("sends $100"));
    }
}
