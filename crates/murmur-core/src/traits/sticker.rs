// SPDX-FileCopyrightText: 2026 Murmur Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sticker directory lookup.

use crate::types::Sticker;

/// Profile-level sticker directory.
///
/// Lookups of unknown ids return `None`; callers degrade to a text caption
/// instead of failing.
pub trait StickerDirectory {
    /// Finds a sticker by its exact id.
    fn lookup(&self, id: &str) -> Option<&Sticker>;

    /// All currently defined stickers, in definition order.
    fn listing(&self) -> Vec<&Sticker>;
}

impl StickerDirectory for [Sticker] {
    fn lookup(&self, id: &str) -> Option<&Sticker> {
        self.iter().find(|s| s.id == id)
    }

    fn listing(&self) -> Vec<&Sticker> {
        self.iter().collect()
    }
}

impl StickerDirectory for Vec<Sticker> {
    fn lookup(&self, id: &str) -> Option<&Sticker> {
        self.as_slice().lookup(id)
    }

    fn listing(&self) -> Vec<&Sticker> {
        self.as_slice().listing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sticker(id: &str) -> Sticker {
        Sticker {
            id: id.into(),
            data: vec![0xff],
            description: format!("{id} face"),
        }
    }

    #[test]
    fn lookup_by_exact_id() {
        let dir = vec![sticker("happy"), sticker("sad")];
        assert_eq!(dir.lookup("sad").unwrap().description, "sad face");
        assert!(dir.lookup("Sad").is_none());
        assert!(dir.lookup("angry").is_none());
    }

    #[test]
    fn listing_keeps_definition_order() {
        let dir = vec![sticker("b"), sticker("a")];
        let ids: Vec<&str> = dir.listing().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn empty_slice_directory() {
        let dir: &[Sticker] = &[];
        assert!(dir.lookup("x").is_none());
        assert!(dir.listing().is_empty());
    }
}
