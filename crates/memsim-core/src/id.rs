//! Strongly-typed identifiers and the [`Address`] type alias.

use std::fmt;
use std::num::NonZeroU64;

/// Byte offset within a simulated address range.
pub type Address = usize;

/// Identifies a live allocation within an allocator instance.
///
/// Ids are handed out sequentially starting at 1 and are never reused
/// while the issuing allocator lives (until it is re-initialized).
/// Free blocks carry no id at all, so the "free" sentinel is expressed
/// as `Option<AllocationId>` rather than a magic value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllocationId(NonZeroU64);

impl AllocationId {
    /// The first id issued by a freshly initialized allocator.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Wrap a raw id. Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// The id issued after this one.
    ///
    /// # Panics
    ///
    /// Panics if the id space is exhausted.
    pub fn successor(self) -> Self {
        Self(
            self.0
                .checked_add(1)
                .expect("allocation id space exhausted"),
        )
    }
}

impl fmt::Display for AllocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroU64> for AllocationId {
    fn from(v: NonZeroU64) -> Self {
        Self(v)
    }
}
