//! Multi-level cache lookup.
//!
//! Levels are independent [`DirectMappedCache`] instances consulted in
//! order. An access stops at the first level that hits; every level probed
//! before it records a miss and fills its line, so a block fetched from L2
//! (or memory) is also resident in L1 afterwards. Levels never share state.

use memsim_core::{Address, ConfigError};
use smallvec::SmallVec;

use crate::cache::DirectMappedCache;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// A named level of a [`CacheHierarchy`].
#[derive(Clone, Debug)]
pub struct CacheLevel {
    name: String,
    cache: DirectMappedCache,
}

impl CacheLevel {
    /// Display name (e.g. `"L1"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The level's cache.
    pub fn cache(&self) -> &DirectMappedCache {
        &self.cache
    }
}

/// Result of one hierarchy access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyOutcome {
    /// Index of the level that hit, or `None` if the access went to memory.
    pub hit_level: Option<usize>,
    /// Hit/miss result of each level consulted, in order.
    pub probes: SmallVec<[bool; 4]>,
}

impl HierarchyOutcome {
    /// Whether the access was served from memory.
    pub fn from_memory(&self) -> bool {
        self.hit_level.is_none()
    }
}

/// Ordered chain of cache levels.
#[derive(Clone, Debug, Default)]
pub struct CacheHierarchy {
    levels: Vec<CacheLevel>,
}

impl CacheHierarchy {
    /// An empty hierarchy. Every access goes to memory until a level is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a level below the existing ones.
    pub fn with_level(
        mut self,
        name: impl Into<String>,
        config: CacheConfig,
    ) -> Result<Self, ConfigError> {
        self.push_level(name, config)?;
        Ok(self)
    }

    /// Append a level below the existing ones.
    pub fn push_level(
        &mut self,
        name: impl Into<String>,
        config: CacheConfig,
    ) -> Result<(), ConfigError> {
        let cache = DirectMappedCache::try_new(config)?;
        self.levels.push(CacheLevel {
            name: name.into(),
            cache,
        });
        Ok(())
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the hierarchy has no levels.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The levels, fastest first.
    pub fn levels(&self) -> &[CacheLevel] {
        &self.levels
    }

    /// Access `address`, walking levels until one hits.
    pub fn access(&mut self, address: Address) -> HierarchyOutcome {
        let mut probes = SmallVec::new();
        for (index, level) in self.levels.iter_mut().enumerate() {
            let hit = level.cache.access(address);
            probes.push(hit);
            if hit {
                return HierarchyOutcome {
                    hit_level: Some(index),
                    probes,
                };
            }
        }
        tracing::trace!(address, "served from memory");
        HierarchyOutcome {
            hit_level: None,
            probes,
        }
    }

    /// Per-level statistics, fastest first.
    pub fn level_stats(&self) -> Vec<(&str, CacheStats)> {
        self.levels
            .iter()
            .map(|level| (level.name.as_str(), level.cache.stats()))
            .collect()
    }

    /// Reset every level.
    pub fn reset(&mut self) {
        for level in &mut self.levels {
            level.cache.reset();
        }
    }
}
