//! Group-wise matching of control bytes.
//!
//! A group is a fixed-width window of consecutive control bytes that is
//! matched as a unit, producing a bitmask of candidate positions. The
//! width is fixed per matcher: 16 bytes for the SSE2 matcher, 8 for the
//! portable fallback. The fallback is always compiled so the vectorized
//! matcher can be cross-checked against it on any target.

pub mod generic;

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub mod sse2;

#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub use sse2::Group as DefaultGroup;

#[cfg(not(all(target_arch = "x86_64", target_feature = "sse2")))]
pub use generic::Group as DefaultGroup;

/// A loaded window of control bytes, matched as a unit.
pub trait GroupQuery: Sized {
    /// The number of control bytes in a group.
    const WIDTH: usize;

    /// The bitmask produced by matching this group.
    type Mask: MatchMask;

    /// Loads a group from a window of exactly `WIDTH` bytes.
    fn load(bytes: &[u8]) -> Self;

    /// Returns a mask of positions holding the given full control byte.
    fn match_tag(&self, tag: u8) -> Self::Mask;

    /// Returns a mask of positions holding [`EMPTY`](crate::ctrl::EMPTY).
    fn match_empty(&self) -> Self::Mask;

    /// Returns a mask of positions holding [`EMPTY`](crate::ctrl::EMPTY)
    /// or [`DELETED`](crate::ctrl::DELETED), in any combination.
    fn match_empty_or_deleted(&self) -> Self::Mask;

    /// Returns a mask of positions holding full control bytes.
    fn match_full(&self) -> Self::Mask;
}

/// A set of matched byte positions within a group.
///
/// Iterating yields the matched positions in ascending order.
pub trait MatchMask: Copy + Iterator<Item = usize> {
    /// Returns `true` if any position matched.
    fn any_set(&self) -> bool;

    /// The first matched position in scan order, if any.
    fn lowest_set_bit(&self) -> Option<usize>;

    /// The last matched position in scan order, if any.
    fn highest_set_bit(&self) -> Option<usize>;
}
