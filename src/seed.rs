//! Splitting a hash into a probe seed and a control-byte tag.

/// Derives the probe seed for a hash.
///
/// Implementations must be pure and deterministic within a process; the
/// seed decides only where a table's probe sequence starts, never whether
/// a key can be found, so mixing is a load-balancing and hash-flooding
/// defense rather than a correctness requirement.
pub trait HashSplitter {
    /// Returns the probe seed for `hash` in the array at `base`.
    fn seed(&self, hash: u64, base: usize) -> usize;
}

/// The default splitter: mixes the control array's address into the hash
/// so that distinct table instances scan in different orders.
#[derive(Clone, Copy, Debug, Default)]
pub struct AddressSeed;

impl HashSplitter for AddressSeed {
    #[inline]
    fn seed(&self, hash: u64, base: usize) -> usize {
        (hash >> 7) as usize ^ (base >> 12)
    }
}

/// A splitter that uses the hash unmixed, giving every table the same,
/// reproducible scan order. Useful for tests and deterministic layouts.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentitySeed;

impl HashSplitter for IdentitySeed {
    #[inline]
    fn seed(&self, hash: u64, _base: usize) -> usize {
        hash as usize
    }
}

/// The low seven bits of the hash, stored in the control byte of a full
/// slot as its tag.
#[inline]
pub fn h2(hash: u64) -> u8 {
    (hash & 0x7f) as u8
}
