//! The direct-mapped cache simulator.

use memsim_core::{Address, ConfigError};

use crate::config::{AddressParts, CacheConfig};
use crate::line::CacheLine;
use crate::stats::CacheStats;

/// Result of one access, with the decomposition that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// Whether the block was already resident.
    pub hit: bool,
    /// Block number, line index, and tag of the address.
    pub parts: AddressParts,
    /// Tag displaced by the fill, if the miss overwrote a valid line.
    pub evicted_tag: Option<usize>,
}

/// Direct-mapped cache with per-line FIFO timestamps.
///
/// Counters and the access clock only grow for the lifetime of the value
/// (or until [`reset`](Self::reset)).
#[derive(Clone, Debug)]
pub struct DirectMappedCache {
    config: CacheConfig,
    lines: Vec<CacheLine>,
    /// Monotonic access clock, advanced on every access.
    clock: u64,
    hits: u64,
    misses: u64,
}

impl DirectMappedCache {
    /// Build a cache with all lines invalid.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`CacheConfig::validate`].
    pub fn new(config: CacheConfig) -> Self {
        match Self::try_new(config) {
            Ok(cache) => cache,
            Err(e) => panic!("invalid cache config: {e}"),
        }
    }

    /// Build a cache, rejecting invalid geometry.
    pub fn try_new(config: CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            lines: vec![CacheLine::default(); config.line_count()],
            config,
            clock: 0,
            hits: 0,
            misses: 0,
        })
    }

    /// The cache geometry.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines, indexed by line number.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// A single line.
    pub fn line(&self, index: usize) -> Option<&CacheLine> {
        self.lines.get(index)
    }

    /// Current value of the access clock.
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Access `address`; returns `true` on a hit.
    pub fn access(&mut self, address: Address) -> bool {
        self.access_outcome(address).hit
    }

    /// Access `address` and report the full outcome.
    pub fn access_outcome(&mut self, address: Address) -> AccessOutcome {
        let parts = self.config.decompose(address);
        self.clock += 1;

        let line = &mut self.lines[parts.line_index];
        if line.holds(parts.tag) {
            self.hits += 1;
            return AccessOutcome {
                hit: true,
                parts,
                evicted_tag: None,
            };
        }

        self.misses += 1;
        let evicted_tag = line.fill(parts.tag, self.clock);
        tracing::debug!(
            address,
            line = parts.line_index,
            tag = parts.tag,
            evicted = ?evicted_tag,
            "cache miss"
        );
        AccessOutcome {
            hit: false,
            parts,
            evicted_tag,
        }
    }

    /// Hit/miss counters and ratio.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(self.hits, self.misses)
    }

    /// Invalidate every line and zero the counters and clock.
    pub fn reset(&mut self) {
        self.lines.fill(CacheLine::default());
        self.clock = 0;
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_64_16() -> DirectMappedCache {
        DirectMappedCache::new(CacheConfig::new(64, 16))
    }

    #[test]
    fn starts_cold() {
        let cache = cache_64_16();
        assert_eq!(cache.line_count(), 4);
        assert!(cache.lines().iter().all(|l| !l.valid));
        assert_eq!(cache.stats(), CacheStats::new(0, 0));
    }

    #[test]
    fn conflicting_blocks_evict_each_other() {
        let mut cache = cache_64_16();
        assert!(!cache.access(0));

        let outcome = cache.access_outcome(64);
        assert!(!outcome.hit);
        assert_eq!(outcome.parts.block_number, 4);
        assert_eq!(outcome.parts.line_index, 0);
        assert_eq!(outcome.parts.tag, 1);
        assert_eq!(outcome.evicted_tag, Some(0));

        assert!(!cache.access(0), "address 0 was evicted by 64");
        assert_eq!(cache.stats().misses, 3);
    }

    #[test]
    fn same_block_hits() {
        let mut cache = cache_64_16();
        assert!(!cache.access(16));
        assert!(cache.access(17));
        assert!(cache.access(31));
        assert!(!cache.access(32));
        assert_eq!(cache.stats().hits, 2);
    }

    #[test]
    fn reference_trace_counts() {
        let mut cache = cache_64_16();
        for addr in [0, 4, 8, 16, 32, 0, 4, 64, 128, 0] {
            cache.access(addr);
        }
        let stats = cache.stats();
        assert_eq!(stats.hits, 4);
        assert_eq!(stats.misses, 6);
        assert!((stats.hit_ratio - 0.4).abs() < 1e-12);
    }

    #[test]
    fn fill_records_clock() {
        let mut cache = cache_64_16();
        cache.access(0);
        cache.access(0);
        cache.access(16);
        assert_eq!(cache.clock(), 3);
        assert_eq!(cache.line(0).unwrap().fifo_timestamp, 1);
        assert_eq!(cache.line(1).unwrap().fifo_timestamp, 3);
        assert!(cache.line(4).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut cache = cache_64_16();
        cache.access(0);
        cache.access(0);
        cache.reset();
        assert_eq!(cache.clock(), 0);
        assert_eq!(cache.stats().accesses(), 0);
        assert!(!cache.access(0));
    }

    #[test]
    fn try_new_rejects_bad_geometry() {
        assert_eq!(
            DirectMappedCache::try_new(CacheConfig::new(48, 32)).unwrap_err(),
            ConfigError::CacheNotMultiple {
                cache_size: 48,
                block_size: 32
            }
        );
    }

    #[test]
    #[should_panic(expected = "invalid cache config")]
    fn new_panics_on_zero_block() {
        DirectMappedCache::new(CacheConfig::new(64, 0));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn replay_is_deterministic(
                addrs in proptest::collection::vec(0usize..1024, 0..200),
            ) {
                let run = |addrs: &[usize]| {
                    let mut cache = cache_64_16();
                    let outcomes: Vec<bool> = addrs.iter().map(|&a| cache.access(a)).collect();
                    (outcomes, cache.stats())
                };
                prop_assert_eq!(run(&addrs), run(&addrs));
            }

            #[test]
            fn immediate_repeat_always_hits(addr in 0usize..1_000_000, lines in 1usize..32) {
                let mut cache = DirectMappedCache::new(CacheConfig::new(lines * 8, 8));
                cache.access(addr);
                prop_assert!(cache.access(addr));
            }

            #[test]
            fn counters_sum_to_accesses(
                addrs in proptest::collection::vec(0usize..4096, 0..100),
            ) {
                let mut cache = cache_64_16();
                for &a in &addrs {
                    cache.access(a);
                }
                let stats = cache.stats();
                prop_assert_eq!(stats.accesses(), addrs.len() as u64);
                prop_assert_eq!(cache.clock(), addrs.len() as u64);
            }

            #[test]
            fn line_holds_last_block_mapped_to_it(
                addrs in proptest::collection::vec(0usize..4096, 1..100),
            ) {
                let mut cache = cache_64_16();
                for &a in &addrs {
                    cache.access(a);
                }
                let last = *addrs.last().unwrap();
                let parts = cache.config().decompose(last);
                prop_assert!(cache.line(parts.line_index).unwrap().holds(parts.tag));
            }
        }
    }
}
