//! The block allocator.
//!
//! [`Allocator`] owns a [`BlockList`] covering `[0, total_size)` and
//! services allocate/free requests against it. Placement is delegated to
//! [`strategy::select`](crate::strategy::select); the allocator only
//! performs the split, id assignment, and coalescing bookkeeping.

use indexmap::IndexMap;
use memsim_core::{AllocError, AllocationId, ConfigError, FitStrategy, FreeError};

use crate::block::{BlockIndex, BlockList, BlockView};
use crate::config::AllocatorConfig;
use crate::metrics::{MetricsSnapshot, RequestCounters};
use crate::strategy::select;

/// Simulated physical-memory allocator.
///
/// Ids are issued sequentially from 1 and never reused until the next
/// [`init`](Self::init). Allocation failure and invalid frees are ordinary
/// `Err` results and leave the block sequence untouched.
#[derive(Clone, Debug)]
pub struct Allocator {
    config: AllocatorConfig,
    blocks: BlockList,
    /// Live allocations in issue order.
    live: IndexMap<AllocationId, BlockIndex>,
    next_id: AllocationId,
    counters: RequestCounters,
}

impl Allocator {
    /// Create an allocator managing `total_size` bytes at byte granularity.
    ///
    /// # Panics
    ///
    /// Panics if `total_size` is zero.
    pub fn new(total_size: usize) -> Self {
        match Self::with_config(AllocatorConfig::new(total_size)) {
            Ok(allocator) => allocator,
            Err(e) => panic!("invalid allocator config: {e}"),
        }
    }

    /// Create an allocator from a validated config.
    pub fn with_config(config: AllocatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(
            total_size = config.total_size,
            alignment = config.alignment,
            "allocator initialized"
        );
        Ok(Self {
            blocks: BlockList::new(config.total_size),
            live: IndexMap::new(),
            next_id: AllocationId::FIRST,
            counters: RequestCounters::default(),
            config,
        })
    }

    /// Re-initialize to one free block of `total_size` bytes.
    ///
    /// Resets the request counters and the id generator; every previously
    /// issued id becomes invalid. The alignment is kept.
    ///
    /// # Panics
    ///
    /// Panics if `total_size` is zero.
    pub fn init(&mut self, total_size: usize) {
        assert!(total_size > 0, "memory size must be at least 1 byte");
        self.config.total_size = total_size;
        self.blocks.reset(total_size);
        self.live.clear();
        self.next_id = AllocationId::FIRST;
        self.counters = RequestCounters::default();
        tracing::info!(total_size, "allocator re-initialized");
    }

    /// Re-initialize with the current size.
    pub fn reset(&mut self) {
        self.init(self.config.total_size);
    }

    /// The active configuration.
    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Size of the managed range in bytes.
    pub fn total_size(&self) -> usize {
        self.config.total_size
    }

    /// The underlying block sequence.
    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    /// Number of blocks, free and allocated.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Live allocation ids in issue order.
    pub fn live_allocations(&self) -> impl Iterator<Item = AllocationId> + '_ {
        self.live.keys().copied()
    }

    /// Cumulative request counters.
    pub fn counters(&self) -> RequestCounters {
        self.counters
    }

    /// Allocate `request_size` bytes using `strategy`.
    ///
    /// The chosen free block is shrunk to the (aligned) request and the
    /// surplus becomes a new free block immediately after it.
    ///
    /// # Panics
    ///
    /// Panics if `request_size` is zero.
    pub fn allocate(
        &mut self,
        strategy: FitStrategy,
        request_size: usize,
    ) -> Result<AllocationId, AllocError> {
        assert!(request_size > 0, "allocation request must be at least 1 byte");

        let chosen = self
            .config
            .block_size_for(request_size)
            .and_then(|size| {
                select(strategy, self.blocks.iter(), size).map(|index| (index, size))
            });

        let Some((index, size)) = chosen else {
            self.counters.record_failure();
            let largest_free = self.largest_free_block();
            tracing::warn!(
                %strategy,
                requested = request_size,
                largest_free,
                "allocation failed"
            );
            return Err(AllocError::NoFit {
                requested: request_size,
                largest_free,
            });
        };

        if self.blocks.get(index).size > size {
            self.blocks.split(index, size);
        }

        let id = self.next_id;
        self.next_id = id.successor();
        self.blocks.mark_allocated(index, id, request_size);
        self.live.insert(id, index);
        self.counters.record_success();

        tracing::debug!(
            %id,
            %strategy,
            start = self.blocks.get(index).start,
            size,
            requested = request_size,
            "allocated block"
        );
        Ok(id)
    }

    /// Free the block owned by `id` and coalesce it with free neighbours.
    pub fn free(&mut self, id: AllocationId) -> Result<(), FreeError> {
        let Some(mut index) = self.live.shift_remove(&id) else {
            let err = if id < self.next_id {
                FreeError::AlreadyFree { id }
            } else {
                FreeError::UnknownId { id }
            };
            tracing::warn!(%id, "{err}");
            return Err(err);
        };

        self.blocks.mark_free(index);
        tracing::debug!(%id, start = self.blocks.get(index).start, "freed block");

        if let Some(prev) = self.blocks.get(index).prev {
            if self.blocks.get(prev).is_free() {
                self.blocks.merge_next(prev);
                index = prev;
            }
        }
        if let Some(next) = self.blocks.get(index).next {
            if self.blocks.get(next).is_free() {
                self.blocks.merge_next(index);
            }
        }
        Ok(())
    }

    /// Locate the block owned by `id`.
    pub fn block_of(&self, id: AllocationId) -> Option<BlockView> {
        self.live
            .get(&id)
            .map(|&index| BlockView::from(self.blocks.get(index)))
    }

    /// Describe every block in address order.
    pub fn dump(&self) -> Vec<BlockView> {
        self.blocks
            .iter()
            .map(|(_, block)| BlockView::from(block))
            .collect()
    }

    /// Compute a metrics snapshot.
    pub fn metrics(&self) -> MetricsSnapshot {
        MetricsSnapshot::from_blocks(
            self.config.total_size,
            self.blocks.iter().map(|(_, block)| block),
            self.counters,
        )
    }

    fn largest_free_block(&self) -> usize {
        self.blocks
            .iter()
            .filter(|(_, block)| block.is_free())
            .map(|(_, block)| block.size)
            .max()
            .unwrap_or(0)
    }
}
