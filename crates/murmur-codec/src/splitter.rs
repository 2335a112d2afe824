// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Speech/narration splitting for plain-text segments.

use std::sync::LazyLock;

use murmur_core::DialogueMode;
use regex::Regex;

static NOVEL_OPEN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(action|say)>").expect("novel tag pattern is valid"));

/// One bubble's worth of text before it becomes a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub is_action: bool,
}

impl Draft {
    pub fn speech(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_action: false,
        }
    }

    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_action: true,
        }
    }
}

/// Splits one text segment into drafts using the grammar of `mode`.
///
/// Drafts are trimmed and never empty.
pub fn split(segment: &str, mode: DialogueMode) -> Vec<Draft> {
    match mode {
        DialogueMode::Normal => split_brackets(segment),
        DialogueMode::Novel => split_tags(segment),
    }
}

fn is_open(c: char) -> bool {
    c == '(' || c == '（'
}

fn is_close(c: char) -> bool {
    c == ')' || c == '）'
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Normal mode: a line that is exactly one bracket pair is narration.
fn split_brackets(segment: &str) -> Vec<Draft> {
    break_around_brackets(segment)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match narration_body(line) {
            Some(body) => {
                let body = body.trim();
                (!body.is_empty()).then(|| Draft::narration(body))
            }
            None => Some(Draft::speech(line)),
        })
        .collect()
}

/// Puts every bracketed run on its own line.
///
/// `)` followed by `(` (whitespace between is dropped), `)` followed by
/// anything but a line break, and anything but `)` or a line break followed
/// by `(` each get a `\n` between them.
fn break_around_brackets(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        out.push(c);
        i += 1;
        let Some(&next) = chars.get(i) else { break };

        if is_close(c) {
            let next_visible = chars[i..]
                .iter()
                .position(|ch| !ch.is_whitespace())
                .map(|offset| i + offset);
            match next_visible {
                Some(j) if is_open(chars[j]) => {
                    out.push('\n');
                    i = j;
                }
                _ if !is_line_break(next) => out.push('\n'),
                _ => {}
            }
        } else if !is_line_break(c) && is_open(next) {
            out.push('\n');
        }
    }

    out
}

/// Content of a line shaped `(...)` with no brackets inside.
fn narration_body(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    if !is_open(first) || !is_close(last) {
        return None;
    }
    let body = chars.as_str();
    (!body.chars().any(|c| is_open(c) || is_close(c))).then_some(body)
}

/// Novel mode: `<action>` and `<say>` tags, anything outside them is speech.
fn split_tags(segment: &str) -> Vec<Draft> {
    let mut drafts = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = NOVEL_OPEN_TAG.captures_at(segment, cursor) {
        let Some(tag) = caps.get(0) else { break };
        push_trimmed(&mut drafts, &segment[cursor..tag.start()], false);

        let is_action = caps[1].eq_ignore_ascii_case("action");
        let closing = if is_action { "</action>" } else { "</say>" };
        let rest = &segment[tag.end()..];

        // Content stops at the next `<`; the matching closing tag is consumed.
        let (body, consumed) = match rest.find('<') {
            Some(lt) => {
                let closes = rest[lt..]
                    .get(..closing.len())
                    .is_some_and(|s| s.eq_ignore_ascii_case(closing));
                (&rest[..lt], if closes { lt + closing.len() } else { lt })
            }
            None => (rest, rest.len()),
        };
        push_trimmed(&mut drafts, body, is_action);
        cursor = tag.end() + consumed;
    }
    push_trimmed(&mut drafts, &segment[cursor..], false);

    if drafts.is_empty() {
        push_trimmed(&mut drafts, segment, false);
    }
    drafts
}

fn push_trimmed(drafts: &mut Vec<Draft>, text: &str, is_action: bool) {
    let text = text.trim();
    if !text.is_empty() {
        drafts.push(Draft {
            text: text.to_string(),
            is_action,
        });
    }
}
