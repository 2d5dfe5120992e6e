//! Test utilities for memsim development.
//!
//! Provides invariant checkers for allocator block sequences, reusable
//! allocator and cache fixtures ([`fixtures`]), and proptest strategies
//! for random allocate/free workloads ([`ops`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod ops;

use memsim_alloc::{Allocator, BlockView};

/// Assert that `blocks` tile `[0, total_size)` in order with no gaps,
/// overlaps, or empty blocks.
pub fn assert_tiling(total_size: usize, blocks: &[BlockView]) {
    let mut cursor = 0;
    for (i, view) in blocks.iter().enumerate() {
        assert_eq!(
            view.start, cursor,
            "block {i} starts at {} but previous block ended at {cursor}",
            view.start
        );
        assert!(view.size > 0, "block {i} at {} is empty", view.start);
        cursor = view.end();
    }
    assert_eq!(
        cursor, total_size,
        "blocks end at {cursor}, managed range ends at {total_size}"
    );
}

/// Assert that no two consecutive blocks are both free.
pub fn assert_no_adjacent_free(blocks: &[BlockView]) {
    for pair in blocks.windows(2) {
        assert!(
            !(pair[0].is_free() && pair[1].is_free()),
            "free blocks at {} and {} were not coalesced",
            pair[0].start,
            pair[1].start
        );
    }
}

/// Check every structural invariant of `alloc`.
///
/// Beyond tiling and coalescing, verifies that the metrics agree with the
/// dump and that every live id resolves to an allocated block.
pub fn assert_allocator_invariants(alloc: &Allocator) {
    let dump = alloc.dump();
    assert_tiling(alloc.total_size(), &dump);
    assert_no_adjacent_free(&dump);

    let metrics = alloc.metrics();
    assert_eq!(metrics.used + metrics.free, alloc.total_size());
    assert_eq!(
        metrics.free_block_count + metrics.allocated_block_count,
        dump.len()
    );

    let live: Vec<_> = alloc.live_allocations().collect();
    assert_eq!(live.len(), metrics.allocated_block_count);
    for id in live {
        let view = alloc
            .block_of(id)
            .unwrap_or_else(|| panic!("live id {id} has no block"));
        assert_eq!(view.id(), Some(id));
    }
}

/// Sizes of every block in address order.
pub fn block_sizes(blocks: &[BlockView]) -> Vec<usize> {
    blocks.iter().map(|view| view.size).collect()
}

/// Sizes of the free blocks in address order.
pub fn free_sizes(blocks: &[BlockView]) -> Vec<usize> {
    blocks
        .iter()
        .filter(|view| view.is_free())
        .map(|view| view.size)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use memsim_core::FitStrategy;

    #[test]
    fn fresh_allocator_passes() {
        assert_allocator_invariants(&Allocator::new(32));
    }

    #[test]
    fn sizes_helpers() {
        let mut alloc = Allocator::new(32);
        alloc.allocate(FitStrategy::FirstFit, 8).unwrap();
        let dump = alloc.dump();
        assert_eq!(block_sizes(&dump), vec![8, 24]);
        assert_eq!(free_sizes(&dump), vec![24]);
    }

    #[test]
    #[should_panic(expected = "managed range ends at")]
    fn short_tiling_detected() {
        let dump = Allocator::new(32).dump();
        assert_tiling(40, &dump);
    }
}
