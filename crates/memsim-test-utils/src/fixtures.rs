//! Reusable allocator and cache fixtures.
//!
//! - [`fragmented_10_30_20`]: free holes of 10, 30 and 20 bytes.
//! - [`three_adjacent`]: three equal allocations carved from one region.
//! - [`REFERENCE_TRACE`]: the ten-address cache demo trace.

use memsim_alloc::Allocator;
use memsim_cache::{CacheConfig, CacheHierarchy};
use memsim_core::{AllocationId, FitStrategy};

/// Address stream used by the L1/L2 demo.
pub const REFERENCE_TRACE: [usize; 10] = [0, 4, 8, 16, 32, 0, 4, 64, 128, 0];

/// Start addresses of the three holes in [`fragmented_10_30_20`].
pub const HOLE_STARTS: [usize; 3] = [0, 11, 42];

/// A 63-byte allocator whose free blocks are 10 @0, 30 @11 and 20 @42,
/// each followed by a 1-byte allocation that keeps it from coalescing.
pub fn fragmented_10_30_20() -> Allocator {
    let mut alloc = Allocator::new(63);
    let mut holes = Vec::new();
    for size in [10, 30, 20] {
        holes.push(
            alloc
                .allocate(FitStrategy::FirstFit, size)
                .expect("fixture fits"),
        );
        alloc
            .allocate(FitStrategy::FirstFit, 1)
            .expect("fixture fits");
    }
    for id in holes {
        alloc.free(id).expect("fixture id is live");
    }
    alloc
}

/// Allocate three `size`-byte blocks back to back from a fresh allocator
/// of exactly `3 * size` bytes.
pub fn three_adjacent(size: usize) -> (Allocator, [AllocationId; 3]) {
    let mut alloc = Allocator::new(3 * size);
    let ids = [(); 3].map(|_| {
        alloc
            .allocate(FitStrategy::FirstFit, size)
            .expect("fixture fits")
    });
    (alloc, ids)
}

/// L1 = 64B/16B lines, L2 = 128B/16B lines.
pub fn l1_l2() -> CacheHierarchy {
    CacheHierarchy::new()
        .with_level("L1", CacheConfig::new(64, 16))
        .and_then(|h| h.with_level("L2", CacheConfig::new(128, 16)))
        .expect("fixture geometry is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_allocator_invariants, free_sizes};

    #[test]
    fn fragmented_layout() {
        let alloc = fragmented_10_30_20();
        let dump = alloc.dump();
        assert_eq!(free_sizes(&dump), vec![10, 30, 20]);
        let starts: Vec<_> = dump
            .iter()
            .filter(|v| v.is_free())
            .map(|v| v.start)
            .collect();
        assert_eq!(starts, HOLE_STARTS);
        assert_allocator_invariants(&alloc);
    }

    #[test]
    fn three_adjacent_fills_range() {
        let (alloc, ids) = three_adjacent(16);
        assert_eq!(alloc.metrics().free, 0);
        assert_eq!(ids.map(|id| id.get()), [1, 2, 3]);
    }

    #[test]
    fn hierarchy_has_two_levels() {
        assert_eq!(l1_l2().len(), 2);
    }
}
