//! Text layouts for dumps, metrics, and cache statistics.

use std::fmt::Write;

use memsim_alloc::{BlockState, BlockView, MetricsSnapshot};
use memsim_cache::CacheStats;

/// One line per block: `[start - last] FREE` or `[start - last] USED (id=n)`.
pub fn render_dump(blocks: &[BlockView]) -> String {
    let mut out = String::from("----- Memory Dump -----\n");
    for view in blocks {
        let _ = write!(out, "[{} - {}] ", view.start, view.last());
        match view.state {
            BlockState::Free => out.push_str("FREE\n"),
            BlockState::Allocated { id, .. } => {
                let _ = writeln!(out, "USED (id={id})");
            }
        }
    }
    out
}

/// Allocator metrics, one per line.
pub fn render_metrics(m: &MetricsSnapshot) -> String {
    let mut out = String::from("--- Metrics ---\n");
    let _ = writeln!(out, "Total Memory: {}", m.total_size);
    let _ = writeln!(out, "Used Memory: {}", m.used);
    let _ = writeln!(out, "Free Memory: {}", m.free);
    let _ = writeln!(out, "Internal Fragmentation: {}", m.internal_fragmentation);
    let _ = writeln!(
        out,
        "External Fragmentation: {:.4}",
        m.external_fragmentation
    );
    let _ = writeln!(out, "Memory Utilization: {:.2}%", m.utilization_percent());
    let _ = writeln!(out, "Total Requests: {}", m.counters.total_requests);
    let _ = writeln!(
        out,
        "Successful Allocs: {}",
        m.counters.successful_allocations
    );
    let _ = writeln!(out, "Failed Allocs: {}", m.counters.failed_allocations);
    out
}

/// Hit/miss summary for a named cache.
pub fn render_cache_stats(name: &str, stats: &CacheStats) -> String {
    format!(
        "--- {name} Cache Stats ---\nHits: {}\nMisses: {}\nHit Ratio: {:.2}%\n",
        stats.hits,
        stats.misses,
        stats.hit_percent()
    )
}
