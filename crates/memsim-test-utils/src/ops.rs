//! Proptest strategies for random allocator workloads.

use memsim_alloc::Allocator;
use memsim_core::{AllocationId, FitStrategy};
use proptest::prelude::*;

/// One step of a generated workload.
#[derive(Clone, Debug)]
pub enum Op {
    /// Allocate `size` bytes with the given strategy.
    Alloc(FitStrategy, usize),
    /// Free the n-th id issued so far (modulo the number issued).
    Free(usize),
}

/// Any of the three strategies.
pub fn fit_strategy() -> impl Strategy<Value = FitStrategy> {
    prop_oneof![
        Just(FitStrategy::FirstFit),
        Just(FitStrategy::BestFit),
        Just(FitStrategy::WorstFit),
    ]
}

/// A single workload step with request sizes in `1..=max_size`.
pub fn op(max_size: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (fit_strategy(), 1..=max_size).prop_map(|(s, n)| Op::Alloc(s, n)),
        any::<usize>().prop_map(Op::Free),
    ]
}

/// A workload of up to `max_len` steps.
pub fn ops(max_size: usize, max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op(max_size), 1..max_len)
}

/// Apply one step to `alloc`.
///
/// `issued` accumulates every id handed out; `Free` picks from it, so
/// double frees are generated naturally once ids have been released.
pub fn apply(alloc: &mut Allocator, issued: &mut Vec<AllocationId>, op: &Op) {
    match *op {
        Op::Alloc(strategy, size) => {
            if let Ok(id) = alloc.allocate(strategy, size) {
                issued.push(id);
            }
        }
        Op::Free(n) => {
            if !issued.is_empty() {
                let _ = alloc.free(issued[n % issued.len()]);
            }
        }
    }
}
