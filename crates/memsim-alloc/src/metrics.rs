//! Fragmentation and utilization metrics.
//!
//! [`MetricsSnapshot`] is a point-in-time summary computed by a single pass
//! over the block sequence. [`RequestCounters`] accumulate across requests
//! and are reset only when the allocator is re-initialized.

use crate::block::MemoryBlock;

/// Cumulative allocation request counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestCounters {
    /// Every allocation request, successful or not.
    pub total_requests: u64,
    /// Requests that produced an id.
    pub successful_allocations: u64,
    /// Requests that found no suitable free block.
    pub failed_allocations: u64,
}

impl RequestCounters {
    pub(crate) fn record_success(&mut self) {
        self.total_requests += 1;
        self.successful_allocations += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.total_requests += 1;
        self.failed_allocations += 1;
    }
}

/// Point-in-time allocator metrics.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsSnapshot {
    /// Size of the managed range in bytes.
    pub total_size: usize,
    /// Bytes held by allocated blocks.
    pub used: usize,
    /// Bytes held by free blocks.
    pub free: usize,
    /// Sum over allocated blocks of `size - requested_size`.
    pub internal_fragmentation: usize,
    /// `1 - largest_free_block / free`, or 0 when nothing is free.
    pub external_fragmentation: f64,
    /// `used / total_size`.
    pub utilization: f64,
    /// Size of the largest free block.
    pub largest_free_block: usize,
    /// Number of free blocks.
    pub free_block_count: usize,
    /// Number of allocated blocks.
    pub allocated_block_count: usize,
    /// Request counters at the time of the snapshot.
    pub counters: RequestCounters,
}

impl MetricsSnapshot {
    /// Summarize `blocks` (any order) for a range of `total_size` bytes.
    pub fn from_blocks<'a, I>(total_size: usize, blocks: I, counters: RequestCounters) -> Self
    where
        I: IntoIterator<Item = &'a MemoryBlock>,
    {
        let mut used = 0;
        let mut free = 0;
        let mut internal_fragmentation = 0;
        let mut largest_free_block = 0;
        let mut free_block_count = 0;
        let mut allocated_block_count = 0;

        for block in blocks {
            if block.is_free() {
                free += block.size;
                largest_free_block = largest_free_block.max(block.size);
                free_block_count += 1;
            } else {
                used += block.size;
                internal_fragmentation += block.slack();
                allocated_block_count += 1;
            }
        }

        let external_fragmentation = if free == 0 {
            0.0
        } else {
            1.0 - largest_free_block as f64 / free as f64
        };
        let utilization = if total_size == 0 {
            0.0
        } else {
            used as f64 / total_size as f64
        };

        Self {
            total_size,
            used,
            free,
            internal_fragmentation,
            external_fragmentation,
            utilization,
            largest_free_block,
            free_block_count,
            allocated_block_count,
            counters,
        }
    }

    /// Utilization as a percentage in `[0, 100]`.
    pub fn utilization_percent(&self) -> f64 {
        self.utilization * 100.0
    }
}
