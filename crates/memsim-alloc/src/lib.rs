//! Simulated physical-memory allocator.
//!
//! Manages one contiguous address range `[0, total_size)` as an ordered
//! sequence of variable-size blocks. Requests are placed by a pluggable
//! [`FitStrategy`](memsim_core::FitStrategy); frees coalesce with free
//! neighbours so that two free blocks are never adjacent.
//!
//! # Architecture
//!
//! ```text
//! Allocator (orchestrator)
//! ├── BlockList: arena of MemoryBlock slots linked by prev/next BlockIndex
//! │   └── recycled slot list (merged-away blocks release their slot)
//! ├── IndexMap<AllocationId, BlockIndex> (live allocations, issue order)
//! ├── strategy::select (pure search over the block sequence)
//! └── RequestCounters (reset only by init)
//! ```
//!
//! # Invariants
//!
//! After every operation the block sequence, read in address order, tiles
//! `[0, total_size)` with no gaps and no overlaps, and no two consecutive
//! blocks are both free.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod block;
pub mod config;
pub mod metrics;
pub mod strategy;

// Public re-exports for the primary API surface.
pub use allocator::Allocator;
pub use block::{BlockIndex, BlockList, BlockState, BlockView, MemoryBlock};
pub use config::AllocatorConfig;
pub use metrics::{MetricsSnapshot, RequestCounters};
pub use memsim_core::{AllocError, AllocationId, FitStrategy, FreeError};
