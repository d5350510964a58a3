//! The probe sequence and the first-non-full-slot search.

use std::fmt;
use std::marker::PhantomData;

use crate::ctrl::CtrlArray;
use crate::group::{DefaultGroup, GroupQuery, MatchMask};
use crate::seed::{AddressSeed, HashSplitter};

/// A probe sequence over the group-aligned offsets of a table.
///
/// The sequence is a triangular progression of the form
///
/// ```text
/// p(i) = W/2 * (i² - i) + seed  (mod mask + 1)
/// ```
///
/// where `W` is the group width. Stepping by successively larger
/// multiples of `W` keeps the groups probed at different steps from
/// overlapping, and because `mask + 1` is a power of two, the offsets
/// visited over one cycle of `(mask + 1) / W` steps are a permutation of
/// every group-aligned residue: the whole table is covered with no
/// repeats before the sequence wraps.
///
/// Wrapping at `mask + 1` matters for a second reason: group loads near
/// the end of the control array read the mirrored tail, and the
/// candidates they report only have real slots once their positions are
/// wrapped back through [`offset_at`](ProbeSeq::offset_at).
pub struct ProbeSeq<G = DefaultGroup> {
    mask: usize,
    offset: usize,
    index: usize,
    _group: PhantomData<G>,
}

impl<G: GroupQuery> ProbeSeq<G> {
    /// Starts a sequence at `seed & mask`.
    #[inline]
    pub fn new(seed: usize, mask: usize) -> ProbeSeq<G> {
        debug_assert!(
            mask.wrapping_add(1).is_power_of_two(),
            "mask must be a power of two minus one"
        );

        ProbeSeq {
            mask,
            offset: seed & mask,
            index: 0,
            _group: PhantomData,
        }
    }

    /// The current group origin, always in `[0, mask]`.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The slot `i` positions ahead of the current group origin, wrapped
    /// through the mask. Resolves a match bit to a concrete slot.
    #[inline]
    pub fn offset_at(&self, i: usize) -> usize {
        (self.offset + i) & self.mask
    }

    /// The cumulative probe length: group width times the number of
    /// groups already left behind.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Advances to the next group in the progression.
    #[inline]
    pub fn next(&mut self) {
        self.index += G::WIDTH;
        self.offset = (self.offset + self.index) & self.mask;
    }
}

/// The result of a successful [`find_first_non_full`] search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FindInfo {
    /// The resolved slot, whose control byte is empty or deleted.
    pub offset: usize,
    /// Group width times the number of groups scanned before the match;
    /// a proxy for search cost used in load-factor statistics.
    pub probe_length: usize,
}

/// The table has no empty or deleted slot reachable by the probe
/// sequence: every slot is occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableFull;

impl fmt::Display for TableFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("table has no empty or deleted slots")
    }
}

impl std::error::Error for TableFull {}

/// How a candidate slot is resolved within a matching group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Exploration {
    /// Always take the lowest matching position: a plain left-to-right
    /// scan, and the behavior callers should ship.
    #[default]
    Forward,
    /// For tables above the small-table threshold, a hash-derived coin
    /// picks the highest matching position instead. This adds positional
    /// entropy when address-space randomization is absent and exercises
    /// both resolution paths; it never affects which *groups* are probed.
    Entropic,
}

// Whether the entropic policy resolves this probe backwards.
#[inline]
fn insert_backwards(seed: usize) -> bool {
    seed % 13 > 6
}

/// A configured probing engine: a [`HashSplitter`] plus an
/// [`Exploration`] policy.
///
/// The default prober uses [`AddressSeed`] and forward resolution.
pub struct Prober<S = AddressSeed> {
    splitter: S,
    exploration: Exploration,
}

impl Prober {
    /// Creates a prober with the default splitter and forward resolution.
    pub fn new() -> Prober {
        Prober {
            splitter: AddressSeed,
            exploration: Exploration::Forward,
        }
    }
}

impl Default for Prober {
    fn default() -> Prober {
        Prober::new()
    }
}

impl<S: HashSplitter> Prober<S> {
    /// Replaces the hash splitter.
    pub fn with_splitter<T: HashSplitter>(self, splitter: T) -> Prober<T> {
        Prober {
            splitter,
            exploration: self.exploration,
        }
    }

    /// Replaces the exploration policy.
    pub fn with_exploration(self, exploration: Exploration) -> Prober<S> {
        Prober {
            exploration,
            ..self
        }
    }

    /// Probes `ctrl` with a sequence derived from `hash` and returns the
    /// first slot eligible for insertion.
    ///
    /// The search loads one group per step and stops at the first group
    /// containing an empty or deleted byte; tables holding both states in
    /// one group (as happens during in-place tombstone compaction) are
    /// handled like any other. The loop is bounded by one full cycle of
    /// the sequence, so a completely occupied table yields
    /// `Err(TableFull)` rather than spinning.
    ///
    /// Never mutates the array; the result is a pure function of the
    /// control bytes, the hash, and this prober's configuration.
    pub fn find_first_non_full<G: GroupQuery>(
        &self,
        ctrl: &CtrlArray<G>,
        hash: u64,
    ) -> Result<FindInfo, TableFull> {
        let capacity = ctrl.capacity();
        let seed = self.splitter.seed(hash, ctrl.base_addr());

        // The coin is per-probe, not per-group.
        let backwards = self.exploration == Exploration::Entropic
            && !ctrl.is_small()
            && insert_backwards(seed);

        let mut seq = ProbeSeq::<G>::new(seed, capacity);
        loop {
            let mask = ctrl.group(seq.offset()).match_empty_or_deleted();

            let bit = if backwards {
                mask.highest_set_bit()
            } else {
                mask.lowest_set_bit()
            };

            if let Some(bit) = bit {
                return Ok(FindInfo {
                    offset: seq.offset_at(bit),
                    probe_length: seq.index(),
                });
            }

            seq.next();

            // One full cycle visited every group; the table is full.
            if seq.index() > capacity {
                return Err(TableFull);
            }
        }
    }
}

/// Probes `ctrl` with the default [`Prober`]; see
/// [`Prober::find_first_non_full`].
pub fn find_first_non_full<G: GroupQuery>(
    ctrl: &CtrlArray<G>,
    hash: u64,
) -> Result<FindInfo, TableFull> {
    Prober::new().find_first_non_full(ctrl, hash)
}
