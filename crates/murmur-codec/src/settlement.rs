// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of `<ACCEPT_TRANSFER>` / `<REJECT_TRANSFER>` against history.

use std::collections::HashSet;

use murmur_core::{Message, MessageId, Role, Settlement, TransferStatus};
use serde::Serialize;
use tracing::{debug, warn};

/// A pending transfer that a reply settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferTransition {
    pub message_id: MessageId,
    pub settlement: Settlement,
}

impl TransferTransition {
    /// Status the transfer ends up in.
    pub fn status(&self) -> TransferStatus {
        self.settlement.status()
    }
}

/// Matches each settlement to the latest still-pending transfer sent by the
/// counterpart of `settler`.
///
/// Settlements are resolved in order; once a transfer has been claimed by an
/// earlier token it is no longer pending for the later ones. Tokens with
/// nothing to settle are dropped.
pub fn settle_pending(
    history: &[Message],
    settler: Role,
    settlements: &[Settlement],
) -> Vec<TransferTransition> {
    let Some(sender) = settler.counterpart() else {
        if !settlements.is_empty() {
            debug!(role = %settler, "role cannot settle transfers, ignoring tokens");
        }
        return Vec::new();
    };

    let mut claimed: HashSet<&MessageId> = HashSet::new();
    let mut transitions = Vec::new();

    for &settlement in settlements {
        let target = history
            .iter()
            .filter(|m| m.role == sender && m.is_pending_transfer() && !claimed.contains(&m.id))
            .max_by_key(|m| m.timestamp);

        match target {
            Some(message) => {
                debug!(
                    message_id = %message.id,
                    status = %settlement.status(),
                    "transfer settled by reply"
                );
                claimed.insert(&message.id);
                transitions.push(TransferTransition {
                    message_id: message.id.clone(),
                    settlement,
                });
            }
            None => debug!(%settlement, "no pending transfer to settle"),
        }
    }

    transitions
}

/// Applies transitions to a stored conversation, returning how many took
/// effect. Transitions whose message is missing or already settled are
/// skipped.
///
/// Each settled transfer is followed by a system notice stamped one
/// millisecond after it (see [`settlement_notice`]).
pub fn apply_transitions(history: &mut Vec<Message>, transitions: &[TransferTransition]) -> usize {
    let mut applied = 0;
    for transition in transitions {
        let Some(index) = history.iter().position(|m| m.id == transition.message_id) else {
            warn!(message_id = %transition.message_id, "transition targets unknown message");
            continue;
        };
        match history[index].settle_transfer(transition.settlement) {
            Ok(_) => {
                let notice = settlement_notice(&history[index], transition.settlement);
                history.insert(index + 1, notice);
                applied += 1;
            }
            Err(e) => warn!(error = %e, "skipping transfer transition"),
        }
    }
    applied
}

/// The system message recording that `transfer` was settled.
///
/// Its id is `"{transfer id}-settled"`. System messages are never replayed
/// to the model.
pub fn settlement_notice(transfer: &Message, settlement: Settlement) -> Message {
    let content = match settlement {
        Settlement::Accept => "Transfer accepted",
        Settlement::Refund => "Transfer refunded",
    };
    Message::new(
        MessageId(format!("{}-settled", transfer.id)),
        Role::System,
        content,
        transfer.timestamp.saturating_add(1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::MessageKind;

    fn transfer(id: &str, role: Role, status: TransferStatus, ts: i64) -> Message {
        Message::new(id, role, "", ts).with_kind(MessageKind::Transfer {
            amount: 10.0,
            status,
        })
    }

    #[test]
    fn accept_targets_latest_pending_user_transfer() {
        let history = vec![
            transfer("a", Role::User, TransferStatus::Pending, 1),
            transfer("b", Role::User, TransferStatus::Pending, 2),
            transfer("c", Role::Model, TransferStatus::Pending, 3),
        ];
        let transitions = settle_pending(&history, Role::Model, &[Settlement::Accept]);
        assert_eq!(
            transitions,
            vec![TransferTransition {
                message_id: "b".into(),
                settlement: Settlement::Accept,
            }]
        );
        assert_eq!(transitions[0].status(), TransferStatus::Accepted);
    }

    #[test]
    fn settled_transfers_are_skipped() {
        let history = vec![
            transfer("a", Role::User, TransferStatus::Pending, 1),
            transfer("b", Role::User, TransferStatus::Refunded, 2),
        ];
        let transitions = settle_pending(&history, Role::Model, &[Settlement::Accept]);
        assert_eq!(transitions[0].message_id, MessageId::from("a"));
    }

    #[test]
    fn multiple_tokens_settle_successive_transfers() {
        let history = vec![
            transfer("a", Role::User, TransferStatus::Pending, 1),
            transfer("b", Role::User, TransferStatus::Pending, 2),
        ];
        let transitions = settle_pending(
            &history,
            Role::Model,
            &[Settlement::Accept, Settlement::Refund, Settlement::Accept],
        );
        let ids: Vec<_> = transitions.iter().map(|t| t.message_id.0.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(transitions[1].settlement, Settlement::Refund);
    }

    #[test]
    fn no_pending_transfer_is_a_no_op() {
        let history = vec![Message::new("x", Role::User, "hi", 1)];
        assert!(settle_pending(&history, Role::Model, &[Settlement::Refund]).is_empty());
    }

    #[test]
    fn system_role_never_settles() {
        let history = vec![transfer("a", Role::User, TransferStatus::Pending, 1)];
        assert!(settle_pending(&history, Role::System, &[Settlement::Accept]).is_empty());
    }

    #[test]
    fn apply_updates_in_place_once() {
        let mut history = vec![transfer("a", Role::User, TransferStatus::Pending, 1)];
        let transitions = vec![
            TransferTransition {
                message_id: "a".into(),
                settlement: Settlement::Refund,
            },
            TransferTransition {
                message_id: "a".into(),
                settlement: Settlement::Accept,
            },
            TransferTransition {
                message_id: "missing".into(),
                settlement: Settlement::Accept,
            },
        ];
        assert_eq!(apply_transitions(&mut history, &transitions), 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].transfer(), Some((10.0, TransferStatus::Refunded)));
        assert_eq!(history[1].content, "Transfer refunded");
    }

    #[test]
    fn notice_follows_the_settled_transfer() {
        let mut history = vec![
            transfer("a", Role::User, TransferStatus::Pending, 100),
            Message::new("b", Role::User, "for lunch", 200),
        ];
        let transitions = vec![TransferTransition {
            message_id: "a".into(),
            settlement: Settlement::Accept,
        }];
        assert_eq!(apply_transitions(&mut history, &transitions), 1);

        let ids: Vec<_> = history.iter().map(|m| m.id.0.as_str()).collect();
        assert_eq!(ids, ["a", "a-settled", "b"]);
        let notice = &history[1];
        assert_eq!(notice.role, Role::System);
        assert_eq!(notice.timestamp, 101);
        assert_eq!(notice.content, "Transfer accepted");
    }
}
