//! Seeded workloads for benchmarking the memsim simulators.
//!
//! - [`churn_workload`]: interleaved allocate/free steps with random sizes
//! - [`replay`]: drive an [`Allocator`] through a workload
//! - [`address_stream`]: cache trace mixing sequential runs and random jumps
//!
//! Every generator takes a seed and is fully deterministic.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use memsim_alloc::Allocator;
use memsim_core::{Address, AllocationId, FitStrategy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of an allocator workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Request this many bytes.
    Alloc(usize),
    /// Free the live allocation at this position (modulo the live count).
    Free(usize),
}

/// Generate `len` steps, roughly 60% allocations, with sizes in `1..=max_size`.
pub fn churn_workload(seed: u64, len: usize, max_size: usize) -> Vec<Step> {
    assert!(max_size > 0, "max_size must be positive");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.6) {
                Step::Alloc(rng.gen_range(1..=max_size))
            } else {
                Step::Free(rng.gen_range(0..usize::MAX))
            }
        })
        .collect()
}

/// Apply `steps` to `alloc` with `strategy`. Returns the number of failed
/// allocations.
pub fn replay(alloc: &mut Allocator, strategy: FitStrategy, steps: &[Step]) -> usize {
    let mut live: Vec<AllocationId> = Vec::new();
    let mut failures = 0;
    for &step in steps {
        match step {
            Step::Alloc(size) => match alloc.allocate(strategy, size) {
                Ok(id) => live.push(id),
                Err(_) => failures += 1,
            },
            Step::Free(n) => {
                if !live.is_empty() {
                    let id = live.swap_remove(n % live.len());
                    // Every id in `live` is outstanding.
                    let _ = alloc.free(id);
                }
            }
        }
    }
    failures
}

/// Generate `len` addresses below `span`.
///
/// Three in four accesses continue a sequential 4-byte walk; the rest jump
/// to a random address.
pub fn address_stream(seed: u64, len: usize, span: Address) -> Vec<Address> {
    assert!(span > 0, "span must be positive");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut cursor = 0;
    (0..len)
        .map(|_| {
            cursor = if rng.gen_bool(0.75) {
                (cursor + 4) % span
            } else {
                rng.gen_range(0..span)
            };
            cursor
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workloads_are_deterministic() {
        assert_eq!(churn_workload(7, 200, 64), churn_workload(7, 200, 64));
        assert_ne!(churn_workload(7, 200, 64), churn_workload(8, 200, 64));
        assert_eq!(address_stream(3, 500, 4096), address_stream(3, 500, 4096));
    }

    #[test]
    fn sizes_and_addresses_in_range() {
        for step in churn_workload(1, 1000, 32) {
            if let Step::Alloc(n) = step {
                assert!((1..=32).contains(&n));
            }
        }
        assert!(address_stream(1, 1000, 256).iter().all(|&a| a < 256));
    }

    #[test]
    fn replay_counts_failures() {
        let steps = churn_workload(11, 500, 48);
        let mut alloc = Allocator::new(1024);
        let failures = replay(&mut alloc, FitStrategy::BestFit, &steps);
        let counters = alloc.counters();
        assert_eq!(counters.failed_allocations as usize, failures);
        let allocs = steps.iter().filter(|s| matches!(s, Step::Alloc(_))).count();
        assert_eq!(counters.total_requests as usize, allocs);
    }
}
