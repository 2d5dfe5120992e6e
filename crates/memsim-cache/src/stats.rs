//! Hit/miss statistics.

/// Snapshot of a cache's access counters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to fill a line.
    pub misses: u64,
    /// `hits / (hits + misses)`, or 0 before the first access.
    pub hit_ratio: f64,
}

impl CacheStats {
    /// Build a snapshot from raw counters.
    pub fn new(hits: u64, misses: u64) -> Self {
        let accesses = hits + misses;
        let hit_ratio = if accesses == 0 {
            0.0
        } else {
            hits as f64 / accesses as f64
        };
        Self {
            hits,
            misses,
            hit_ratio,
        }
    }

    /// Total accesses.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Hit ratio as a percentage in `[0, 100]`.
    pub fn hit_percent(&self) -> f64 {
        self.hit_ratio * 100.0
    }
}
