//! 16-wide group matching using SSE2 intrinsics.

use std::arch::x86_64::{self, __m128i};
use std::num::NonZeroU16;

use super::{GroupQuery, MatchMask};
use crate::ctrl::EMPTY;

/// Sixteen control bytes in an SSE2 register.
#[derive(Clone, Copy)]
pub struct Group(__m128i);

impl GroupQuery for Group {
    const WIDTH: usize = 16;
    type Mask = BitMask;

    #[inline]
    fn load(bytes: &[u8]) -> Group {
        assert_eq!(bytes.len(), Self::WIDTH, "window must be one group wide");

        // Safety: the window is exactly 16 bytes, and an unaligned load
        // has no alignment requirement.
        unsafe { Group(x86_64::_mm_loadu_si128(bytes.as_ptr() as *const __m128i)) }
    }

    #[inline]
    fn match_tag(&self, tag: u8) -> BitMask {
        unsafe {
            let cmp = x86_64::_mm_cmpeq_epi8(self.0, x86_64::_mm_set1_epi8(tag as i8));
            BitMask(x86_64::_mm_movemask_epi8(cmp) as u16)
        }
    }

    #[inline]
    fn match_empty(&self) -> BitMask {
        self.match_tag(EMPTY)
    }

    #[inline]
    fn match_empty_or_deleted(&self) -> BitMask {
        // The sign bit is set exactly on EMPTY and DELETED bytes.
        unsafe { BitMask(x86_64::_mm_movemask_epi8(self.0) as u16) }
    }

    #[inline]
    fn match_full(&self) -> BitMask {
        unsafe { BitMask(!(x86_64::_mm_movemask_epi8(self.0) as u16)) }
    }
}

/// A match result with one bit per byte position.
#[derive(Clone, Copy)]
pub struct BitMask(u16);

impl MatchMask for BitMask {
    #[inline]
    fn any_set(&self) -> bool {
        self.0 != 0
    }

    #[inline]
    fn lowest_set_bit(&self) -> Option<usize> {
        Some(NonZeroU16::new(self.0)?.trailing_zeros() as usize)
    }

    #[inline]
    fn highest_set_bit(&self) -> Option<usize> {
        Some(15 - NonZeroU16::new(self.0)?.leading_zeros() as usize)
    }
}

impl Iterator for BitMask {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let bit = NonZeroU16::new(self.0)?.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctrl::DELETED;

    #[test]
    fn matches() {
        let mut bytes = [0x11; 16];
        bytes[3] = EMPTY;
        bytes[7] = DELETED;
        bytes[12] = 0x42;
        let group = Group::load(&bytes);

        let available: Vec<_> = group.match_empty_or_deleted().collect();
        assert_eq!(available, vec![3, 7]);

        assert_eq!(group.match_empty().lowest_set_bit(), Some(3));
        assert_eq!(group.match_tag(0x42).lowest_set_bit(), Some(12));
        assert_eq!(group.match_empty_or_deleted().highest_set_bit(), Some(7));
        assert_eq!(group.match_full().count(), 14);
    }
}
