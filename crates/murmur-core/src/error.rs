// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Murmur workspace.
//!
//! The codec itself never fails: malformed input degrades to text. These
//! errors cover the fallible edges around it (explicit transfer settlement,
//! file I/O, JSON conversation files). Configuration has its own error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{MessageId, TransferStatus};

/// The primary error type used across the Murmur crates.
#[derive(Debug, Error)]
pub enum MurmurError {
    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A conversation file or provider payload could not be (de)serialized.
    #[error("json error in {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// A transfer action targeted a message that is not a transfer card.
    #[error("message {id} is not a transfer")]
    NotATransfer { id: MessageId },

    /// A transfer action targeted a transfer that already left `pending`.
    #[error("transfer {id} is already {status}")]
    TransferAlreadySettled {
        id: MessageId,
        status: TransferStatus,
    },
}
