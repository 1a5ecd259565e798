//! Triangle identity.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of a triangle.
///
/// Assigned once when the triangle is created and never derived from its
/// position, so two triangles with identical coordinates in different
/// generations still have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TriangleId(u32);

impl TriangleId {
    /// Wrap a raw id.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for TriangleId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Monotonic allocator for [`TriangleId`]s.
///
/// Never wraps: once `u32::MAX` has been handed out the sequence is
/// exhausted and [`allocate`](Self::allocate) returns `None`.
///
/// # Example
///
/// ```
/// use xagon_types::{TriangleId, TriangleIdSequence};
///
/// let mut ids = TriangleIdSequence::starting_at(20);
/// assert_eq!(ids.allocate(), Some(TriangleId::new(20)));
/// assert_eq!(ids.allocate(), Some(TriangleId::new(21)));
/// assert_eq!(ids.peek(), 22);
///
/// let mut last = TriangleIdSequence::after(TriangleId::new(u32::MAX));
/// assert_eq!(last.remaining(), 0);
/// assert_eq!(last.allocate(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriangleIdSequence {
    // One past `u32::MAX` marks an exhausted sequence.
    next: u64,
}

impl TriangleIdSequence {
    #[allow(clippy::cast_lossless)]
    const END: u64 = u32::MAX as u64 + 1;

    /// Start a sequence at zero.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Start a sequence at `next`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_lossless)] // u64::from is not const
    pub const fn starting_at(next: u32) -> Self {
        Self { next: next as u64 }
    }

    /// Start a sequence just past `last`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn after(last: TriangleId) -> Self {
        Self {
            next: last.0 as u64 + 1,
        }
    }

    /// Hand out the next id, or `None` once the id space is used up.
    #[inline]
    pub fn allocate(&mut self) -> Option<TriangleId> {
        let raw = u32::try_from(self.next).ok()?;
        self.next += 1;
        Some(TriangleId(raw))
    }

    /// The raw value the next call to [`allocate`](Self::allocate) returns.
    ///
    /// Equals `u32::MAX + 1` when the sequence is exhausted.
    #[inline]
    #[must_use]
    pub const fn peek(&self) -> u64 {
        self.next
    }

    /// How many more ids can be allocated.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        Self::END - self.next
    }
}
