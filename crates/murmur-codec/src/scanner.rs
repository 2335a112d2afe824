// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inline token scanning.
//!
//! Recognizes the three kinds of markup a model reply can carry outside of
//! the speech/narration grammar: echoed role labels (discarded), transfer
//! settlement tokens (collected), and sticker/transfer tokens (kept in place
//! as segments). Everything else is plain text for the splitter.

use std::sync::LazyLock;

use murmur_core::{DialogueMode, Settlement};
use regex::Regex;

/// A `[User ...]`, `[Assistant ...]` or `[System ...]` label alone on a line.
/// Models sometimes echo the sender prefixes used when history is replayed.
static ROLE_LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\[(?:User|Assistant|System)[^\n]*\][ \t]*\r?$")
        .expect("role label pattern is valid")
});

static SETTLEMENT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(ACCEPT|REJECT)_TRANSFER>").expect("settlement pattern is valid")
});

static INLINE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<STICKER:([^<>\n]+)>|<TRANSFER:(\d+(?:\.\d+)?)>")
        .expect("inline token pattern is valid")
});

/// One ordered piece of a scanned reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Plain text, trimmed and never blank.
    Text(String),
    /// `<STICKER:ID>` with the id trimmed.
    Sticker(String),
    /// `<TRANSFER:NUMBER>`.
    Transfer(f64),
    /// Text kept as a single speech bubble, bypassing the splitter.
    Verbatim(String),
}

/// Result of scanning one reply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    pub segments: Vec<Segment>,
    /// Settlement tokens in textual order.
    pub settlements: Vec<Settlement>,
}

/// Scans `raw` into segments and settlement tokens.
///
/// Safe on any prefix of a streamed reply: a half-written token simply fails
/// to match and stays in a text segment.
pub fn scan(raw: &str) -> Scan {
    let without_labels = ROLE_LABEL_LINE.replace_all(raw, "");

    let settlements = SETTLEMENT_TOKEN
        .captures_iter(&without_labels)
        .map(|caps| match &caps[1] {
            "ACCEPT" => Settlement::Accept,
            _ => Settlement::Refund,
        })
        .collect();
    let cleaned = SETTLEMENT_TOKEN.replace_all(&without_labels, "");

    Scan {
        segments: segment(cleaned.trim()),
        settlements,
    }
}

/// Scans text the user typed.
///
/// Control tokens are not interpreted: a user cannot settle a transfer or
/// create a transfer card by typing its tag. Normal mode still splits on
/// brackets; in novel mode the whole text is one speech bubble.
pub fn scan_user_text(raw: &str, mode: DialogueMode) -> Scan {
    let text = raw.trim();
    let segments = if text.is_empty() {
        Vec::new()
    } else {
        vec![match mode {
            DialogueMode::Normal => Segment::Text(text.to_string()),
            DialogueMode::Novel => Segment::Verbatim(text.to_string()),
        }]
    };
    Scan {
        segments,
        settlements: Vec::new(),
    }
}

fn segment(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text_start = 0;

    for caps in INLINE_TOKEN.captures_iter(text) {
        let token = match (caps.get(1), caps.get(2)) {
            (Some(id), _) => {
                let id = id.as_str().trim();
                (!id.is_empty()).then(|| Segment::Sticker(id.to_string()))
            }
            (None, Some(amount)) => parse_amount(amount.as_str()).map(Segment::Transfer),
            (None, None) => None,
        };
        // Tokens that match the shape but carry no usable value stay text.
        let Some(token) = token else { continue };

        let whole = caps.get(0).map_or(0..0, |m| m.range());
        push_text(&mut segments, &text[text_start..whole.start]);
        segments.push(token);
        text_start = whole.end;
    }
    push_text(&mut segments, &text[text_start..]);

    segments
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Finite amounts only; a digit run too long for `f64` is not a transfer.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_segment() {
        let scan = scan("  hello there \n");
        assert_eq!(scan.segments, vec![text("hello there")]);
        assert!(scan.settlements.is_empty());
    }

    #[test]
    fn tokens_split_text_in_order() {
        let scan = scan("hi <STICKER:wave> here <TRANSFER:12.5> bye");
        assert_eq!(
            scan.segments,
            vec![
                text("hi"),
                Segment::Sticker("wave".into()),
                text("here"),
                Segment::Transfer(12.5),
                text("bye"),
            ]
        );
    }

    #[test]
    fn malformed_tokens_stay_text() {
        for raw in [
            "<TRANSFER:abc>",
            "<TRANSFER:5.>",
            "<TRANSFER:-5>",
            "<STICKER:>",
            "<STICKER:wave",
            "<sticker:wave>",
        ] {
            assert_eq!(scan(raw).segments, vec![text(raw)], "input {raw:?}");
        }
    }

    #[test]
    fn blank_sticker_id_stays_text() {
        assert_eq!(scan("<STICKER:  >").segments, vec![text("<STICKER:  >")]);
    }

    #[test]
    fn oversized_amount_stays_text() {
        let raw = format!("<TRANSFER:{}>", "9".repeat(400));
        assert_eq!(scan(&raw).segments, vec![Segment::Text(raw.clone())]);
    }

    #[test]
    fn settlement_tokens_are_collected_and_removed() {
        let scan = scan("<ACCEPT_TRANSFER>Thanks!<REJECT_TRANSFER>");
        assert_eq!(scan.settlements, vec![Settlement::Accept, Settlement::Refund]);
        assert_eq!(scan.segments, vec![text("Thanks!")]);
    }

    #[test]
    fn role_labels_alone_on_a_line_are_stripped() {
        let raw = "[Assistant sent a sticker: waving]\nHi!\n  [User] \nBye";
        assert_eq!(scan(raw).segments, vec![text("Hi!\n\nBye")]);
    }

    #[test]
    fn role_label_inside_a_sentence_is_kept() {
        let raw = "I saw [User] do it";
        assert_eq!(scan(raw).segments, vec![text(raw)]);
    }

    #[test]
    fn user_text_keeps_tokens_literal() {
        let scan = scan_user_text(" I typed <ACCEPT_TRANSFER> and <TRANSFER:99> ", DialogueMode::Normal);
        assert!(scan.settlements.is_empty());
        assert_eq!(
            scan.segments,
            vec![text("I typed <ACCEPT_TRANSFER> and <TRANSFER:99>")]
        );
    }

    #[test]
    fn user_text_in_novel_mode_is_verbatim() {
        let scan = scan_user_text("<action>waves</action> hi", DialogueMode::Novel);
        assert_eq!(
            scan.segments,
            vec![Segment::Verbatim("<action>waves</action> hi".into())]
        );
        assert!(scan_user_text("  ", DialogueMode::Novel).segments.is_empty());
    }

    #[test]
    fn only_control_tokens_leave_no_segments() {
        let scan = scan("<ACCEPT_TRANSFER>");
        assert!(scan.segments.is_empty());
        assert_eq!(scan.settlements, vec![Settlement::Accept]);
    }
}
