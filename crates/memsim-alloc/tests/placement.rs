//! Integration tests: placement, splitting, coalescing, and fragmentation
//! accounting through the public allocator API.

use memsim_alloc::{Allocator, AllocatorConfig, BlockState};
use memsim_core::{AllocError, FitStrategy};
use memsim_test_utils::fixtures::{fragmented_10_30_20, three_adjacent, HOLE_STARTS};
use memsim_test_utils::ops::{apply, ops};
use memsim_test_utils::{assert_allocator_invariants, block_sizes, free_sizes};
use proptest::prelude::*;

// ── Strategy choice ──────────────────────────────────────────────────

fn placed_at(strategy: FitStrategy, request: usize) -> usize {
    let mut alloc = fragmented_10_30_20();
    let id = alloc.allocate(strategy, request).unwrap();
    assert_allocator_invariants(&alloc);
    alloc.block_of(id).unwrap().start
}

#[test]
fn first_fit_takes_first_hole_large_enough() {
    assert_eq!(placed_at(FitStrategy::FirstFit, 15), HOLE_STARTS[1]);
    assert_eq!(placed_at(FitStrategy::FirstFit, 5), HOLE_STARTS[0]);
}

#[test]
fn best_fit_takes_smallest_hole() {
    assert_eq!(placed_at(FitStrategy::BestFit, 15), HOLE_STARTS[2]);
    assert_eq!(placed_at(FitStrategy::BestFit, 25), HOLE_STARTS[1]);
}

#[test]
fn worst_fit_takes_largest_hole() {
    assert_eq!(placed_at(FitStrategy::WorstFit, 15), HOLE_STARTS[1]);
    assert_eq!(placed_at(FitStrategy::WorstFit, 1), HOLE_STARTS[1]);
}

#[test]
fn best_fit_split_leaves_remainder_in_place() {
    let mut alloc = fragmented_10_30_20();
    alloc.allocate(FitStrategy::BestFit, 15).unwrap();
    let dump = alloc.dump();
    assert_eq!(free_sizes(&dump), vec![10, 30, 5]);
    let tail = dump.iter().find(|v| v.is_free() && v.size == 5).unwrap();
    assert_eq!(tail.start, HOLE_STARTS[2] + 15);
}

// ── Exhaustion ──────────────────────────────────────────────────────

#[test]
fn request_above_largest_hole_fails_cleanly() {
    for strategy in FitStrategy::ALL {
        let mut alloc = fragmented_10_30_20();
        let before = alloc.dump();
        let err = alloc.allocate(strategy, 31).unwrap_err();
        assert_eq!(
            err,
            AllocError::NoFit {
                requested: 31,
                largest_free: 30
            }
        );
        assert_eq!(alloc.dump(), before, "{strategy} mutated on failure");
        // 6 fixture allocations + 1 failed request.
        assert_eq!(alloc.counters().total_requests, 7);
        assert_eq!(alloc.counters().failed_allocations, 1);
    }
}

#[test]
fn total_free_is_not_enough_when_fragmented() {
    let mut alloc = fragmented_10_30_20();
    assert_eq!(alloc.metrics().free, 60);
    assert!(alloc.allocate(FitStrategy::FirstFit, 40).is_err());
}

// ── Coalescing ──────────────────────────────────────────────────────

#[test]
fn every_free_order_restores_the_region() {
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for order in orders {
        let (mut alloc, ids) = three_adjacent(24);
        for i in order {
            alloc.free(ids[i]).unwrap();
            assert_allocator_invariants(&alloc);
        }
        assert_eq!(block_sizes(&alloc.dump()), vec![72], "order {order:?}");
        assert!(alloc.dump()[0].is_free());
    }
}

#[test]
fn freeing_middle_between_allocations_stays_separate() {
    let (mut alloc, ids) = three_adjacent(8);
    alloc.free(ids[1]).unwrap();
    let dump = alloc.dump();
    assert_eq!(block_sizes(&dump), vec![8, 8, 8]);
    assert!(!dump[0].is_free() && dump[1].is_free() && !dump[2].is_free());
}

// ── Fragmentation accounting ────────────────────────────────────────

#[test]
fn aligned_allocation_accounts_internal_fragmentation() {
    let config = AllocatorConfig::new(64).with_alignment(16);
    let mut alloc = Allocator::with_config(config).unwrap();
    let a = alloc.allocate(FitStrategy::FirstFit, 10).unwrap();
    let b = alloc.allocate(FitStrategy::FirstFit, 20).unwrap();

    assert_eq!(alloc.metrics().internal_fragmentation, 6 + 12);
    assert_eq!(
        alloc.block_of(b).unwrap().state,
        BlockState::Allocated { id: b, requested: 20 }
    );

    alloc.free(a).unwrap();
    assert_eq!(alloc.metrics().internal_fragmentation, 12);
    assert_allocator_invariants(&alloc);
}

#[test]
fn external_fragmentation_of_fixture() {
    let m = fragmented_10_30_20().metrics();
    assert_eq!(m.largest_free_block, 30);
    assert!((m.external_fragmentation - 0.5).abs() < 1e-12);
    assert!((m.utilization - 3.0 / 63.0).abs() < 1e-12);
}

// ── Random workloads ────────────────────────────────────────────────

proptest! {
    #[test]
    fn invariants_hold_for_random_workloads(workload in ops(48, 120)) {
        let mut alloc = Allocator::new(512);
        let mut issued = Vec::new();
        for op in &workload {
            apply(&mut alloc, &mut issued, op);
            assert_allocator_invariants(&alloc);
        }
        let c = alloc.counters();
        prop_assert_eq!(c.total_requests, c.successful_allocations + c.failed_allocations);
    }

    #[test]
    fn workloads_are_deterministic(workload in ops(32, 60)) {
        let run = || {
            let mut alloc = Allocator::new(256);
            let mut issued = Vec::new();
            for op in &workload {
                apply(&mut alloc, &mut issued, op);
            }
            alloc.dump()
        };
        prop_assert_eq!(run(), run());
    }
}
