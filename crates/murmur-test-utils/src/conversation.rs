// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for stored conversations.

use murmur_core::{Message, Role, TransferStatus};

use crate::fixtures;

/// Appends messages with ids `m0, m1, ...` and timestamps spaced 10 apart.
#[derive(Debug, Default)]
pub struct ConversationBuilder {
    messages: Vec<Message>,
}

impl ConversationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> (String, i64) {
        let n = self.messages.len();
        (format!("m{n}"), 1_000 + 10 * n as i64)
    }

    pub fn user(self, content: &str) -> Self {
        self.push_text(Role::User, content)
    }

    pub fn model(self, content: &str) -> Self {
        self.push_text(Role::Model, content)
    }

    pub fn system(self, content: &str) -> Self {
        self.push_text(Role::System, content)
    }

    pub fn model_action(mut self, content: &str) -> Self {
        let (id, ts) = self.slot();
        self.messages.push(fixtures::action(&id, Role::Model, content, ts));
        self
    }

    pub fn photo(mut self, role: Role, caption: &str) -> Self {
        let (id, ts) = self.slot();
        self.messages.push(fixtures::photo(&id, role, caption, ts));
        self
    }

    pub fn sticker(mut self, role: Role, description: &str) -> Self {
        let (id, ts) = self.slot();
        self.messages.push(fixtures::sticker_message(&id, role, description, ts));
        self
    }

    pub fn transfer(mut self, role: Role, amount: f64, status: TransferStatus) -> Self {
        let (id, ts) = self.slot();
        self.messages.push(fixtures::transfer(&id, role, amount, status, ts));
        self
    }

    /// Alternating user/model speech, `count` messages long.
    pub fn alternating(mut self, count: usize) -> Self {
        for i in 0..count {
            self = if i % 2 == 0 {
                self.user(&format!("user line {i}"))
            } else {
                self.model(&format!("model line {i}"))
            };
        }
        self
    }

    fn push_text(mut self, role: Role, content: &str) -> Self {
        let (id, ts) = self.slot();
        self.messages.push(fixtures::text(&id, role, content, ts));
        self
    }

    pub fn build(self) -> Vec<Message> {
        self.messages
    }
}
