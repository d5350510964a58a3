//! Control bytes and the mirrored control array.
//!
//! Every slot is described by one byte: empty, deleted (a tombstone), or
//! full with a 7-bit tag derived from the hash. The array keeps a copy of
//! its leading bytes past the last slot so a group load starting at any
//! slot offset reads fully in-bounds.

use std::marker::PhantomData;

use crate::group::{DefaultGroup, GroupQuery};

/// The control byte for a slot that has never held an entry.
pub const EMPTY: u8 = 0b1111_1111;

/// The control byte for a slot whose entry was removed (a tombstone).
pub const DELETED: u8 = 0b1000_0000;

// Full control bytes are 0b0xxx_xxxx; the low seven bits carry the tag.
const TAG: u8 = 0b0111_1111;

/// Returns the control byte for an occupied slot with the given tag.
#[inline]
pub fn full(tag: u8) -> u8 {
    tag & TAG
}

/// Returns `true` if the control byte marks an occupied slot.
#[inline]
pub fn is_full(ctrl: u8) -> bool {
    ctrl & 0x80 == 0
}

/// Returns `true` if the control byte is [`EMPTY`] or [`DELETED`].
#[inline]
pub fn is_empty_or_deleted(ctrl: u8) -> bool {
    ctrl & 0x80 != 0
}

/// A byte-per-slot occupancy array with a mirrored tail region.
///
/// A table with capacity `c` (where `c + 1` is a power of two) has
/// `c + 1` slots at offsets `0..=c`. The buffer holds `G::WIDTH - 1`
/// extra bytes mirroring bytes `0..G::WIDTH-1`, so the group load at any
/// slot offset never reads past the end. [`set`](CtrlArray::set) keeps
/// the mirror coherent; probing only ever deals in logical offsets.
pub struct CtrlArray<G = DefaultGroup> {
    bytes: Box<[u8]>,
    capacity: usize,
    _group: PhantomData<G>,
}

impl<G: GroupQuery> CtrlArray<G> {
    /// Creates an all-[`EMPTY`] array for a table with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics unless `capacity + 1` is a power of two no smaller than
    /// the group width.
    pub fn new(capacity: usize) -> CtrlArray<G> {
        assert!(
            capacity.wrapping_add(1).is_power_of_two(),
            "capacity must be a power of two minus one"
        );
        assert!(
            capacity + 1 >= G::WIDTH,
            "the table must be at least one group wide"
        );

        CtrlArray {
            bytes: vec![EMPTY; capacity + G::WIDTH].into_boxed_slice(),
            capacity,
            _group: PhantomData,
        }
    }

    /// The table's capacity, also the mask applied to probe offsets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of slots, `capacity + 1`.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.capacity + 1
    }

    /// Returns `true` for tables below the small-table threshold, which
    /// disables backward exploration to avoid pathological clustering.
    #[inline]
    pub fn is_small(&self) -> bool {
        self.capacity < G::WIDTH - 1
    }

    /// Returns the control byte at `i`.
    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        self.bytes[i]
    }

    /// Writes the control byte at slot `i`, updating the mirrored tail
    /// when `i` falls within the leading `G::WIDTH - 1` bytes.
    #[inline]
    pub fn set(&mut self, i: usize, ctrl: u8) {
        assert!(i <= self.capacity, "slot offset out of bounds");

        self.bytes[i] = ctrl;
        if i < G::WIDTH - 1 {
            self.bytes[self.capacity + 1 + i] = ctrl;
        }
    }

    /// Loads the group of control bytes starting at the slot `offset`.
    #[inline]
    pub fn group(&self, offset: usize) -> G {
        assert!(offset <= self.capacity, "group offset out of bounds");
        G::load(&self.bytes[offset..offset + G::WIDTH])
    }

    /// Resets every slot (and the mirror) to [`EMPTY`].
    pub fn reset(&mut self) {
        self.bytes.fill(EMPTY);
    }

    /// The address of the underlying buffer, used by splitters to
    /// diversify probe order across table instances.
    #[inline]
    pub fn base_addr(&self) -> usize {
        self.bytes.as_ptr() as usize
    }
}
