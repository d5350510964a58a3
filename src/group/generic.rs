//! Portable 8-wide group matching using SWAR arithmetic on a `u64`.

use std::num::NonZeroU64;

use super::{GroupQuery, MatchMask};

#[inline]
fn repeat(byte: u8) -> u64 {
    u64::from_ne_bytes([byte; 8])
}

/// Eight control bytes packed into a `u64`.
#[derive(Clone, Copy)]
pub struct Group(u64);

impl GroupQuery for Group {
    const WIDTH: usize = 8;
    type Mask = BitMask;

    #[inline]
    fn load(bytes: &[u8]) -> Group {
        assert_eq!(bytes.len(), Self::WIDTH, "window must be one group wide");

        let mut buf = [0; 8];
        buf.copy_from_slice(bytes);

        // Little-endian, so byte i occupies bits 8i..8i+8 on every target.
        Group(u64::from_le_bytes(buf))
    }

    #[inline]
    fn match_tag(&self, tag: u8) -> BitMask {
        // SWAR zero-byte detection on `group ^ tag`. A borrow out of a
        // matching lane can leak a false positive into the lane above it;
        // that is benign here because candidates are always verified
        // against the slot itself.
        let cmp = self.0 ^ repeat(tag);
        BitMask(cmp.wrapping_sub(repeat(0x01)) & !cmp & repeat(0x80))
    }

    #[inline]
    fn match_empty(&self) -> BitMask {
        // EMPTY is 0b1111_1111 and DELETED is 0b1000_0000, so the second
        // highest bit tells them apart.
        BitMask(self.0 & (self.0 << 1) & repeat(0x80))
    }

    #[inline]
    fn match_empty_or_deleted(&self) -> BitMask {
        // Both non-full states set the high bit; full tags never do.
        BitMask(self.0 & repeat(0x80))
    }

    #[inline]
    fn match_full(&self) -> BitMask {
        BitMask(!self.0 & repeat(0x80))
    }
}

/// A match result with the high bit of each matching lane set.
#[derive(Clone, Copy)]
pub struct BitMask(u64);

impl MatchMask for BitMask {
    #[inline]
    fn any_set(&self) -> bool {
        self.0 != 0
    }

    #[inline]
    fn lowest_set_bit(&self) -> Option<usize> {
        Some(NonZeroU64::new(self.0)?.trailing_zeros() as usize / 8)
    }

    #[inline]
    fn highest_set_bit(&self) -> Option<usize> {
        Some((63 - NonZeroU64::new(self.0)?.leading_zeros() as usize) / 8)
    }
}

impl Iterator for BitMask {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let bit = (NonZeroU64::new(self.0)?.trailing_zeros() as usize) / 8;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctrl::{DELETED, EMPTY};

    const BYTES: [u8; 8] = [0x23, EMPTY, 0x00, DELETED, 0x7f, 0x23, EMPTY, 0x01];

    #[test]
    fn matches() {
        let group = Group::load(&BYTES);

        let tag: Vec<_> = group.match_tag(0x23).collect();
        assert_eq!(tag, vec![0, 5]);

        let empty: Vec<_> = group.match_empty().collect();
        assert_eq!(empty, vec![1, 6]);

        let available: Vec<_> = group.match_empty_or_deleted().collect();
        assert_eq!(available, vec![1, 3, 6]);

        let full: Vec<_> = group.match_full().collect();
        assert_eq!(full, vec![0, 2, 4, 5, 7]);
    }

    #[test]
    fn mask_bit_queries() {
        let group = Group::load(&BYTES);
        let mask = group.match_empty_or_deleted();

        assert!(mask.any_set());
        assert_eq!(mask.lowest_set_bit(), Some(1));
        assert_eq!(mask.highest_set_bit(), Some(6));

        let none = Group::load(&[0; 8]).match_empty_or_deleted();
        assert!(!none.any_set());
        assert_eq!(none.lowest_set_bit(), None);
        assert_eq!(none.highest_set_bit(), None);
    }
}
