//! Two-level cache walkthrough.
//!
//! L1 is probed for every address; L2 only on an L1 miss.

use memsim_cache::{CacheConfig, CacheHierarchy};
use memsim_core::{Address, ConfigError};

use crate::render::render_cache_stats;

/// Addresses replayed by [`run`].
pub const DEMO_TRACE: [Address; 10] = [0, 4, 8, 16, 32, 0, 4, 64, 128, 0];

/// L1 geometry: 64-byte cache, 16-byte lines.
pub const L1: CacheConfig = CacheConfig {
    cache_size: 64,
    block_size: 16,
};

/// L2 geometry: 128-byte cache, 16-byte lines.
pub const L2: CacheConfig = CacheConfig {
    cache_size: 128,
    block_size: 16,
};

/// The L1/L2 hierarchy used by the walkthrough.
pub fn hierarchy() -> Result<CacheHierarchy, ConfigError> {
    CacheHierarchy::new()
        .with_level("L1", L1)?
        .with_level("L2", L2)
}

/// Replay `trace` through a fresh L1/L2 hierarchy and render per-level stats.
pub fn run(trace: &[Address]) -> Result<String, ConfigError> {
    let mut caches = hierarchy()?;
    for &address in trace {
        caches.access(address);
    }
    let mut out = String::new();
    for (name, stats) in caches.level_stats() {
        out.push_str(&render_cache_stats(name, &stats));
    }
    Ok(out)
}
