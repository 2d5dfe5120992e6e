//! Memsim: an educational simulator for heap placement and cache behaviour.
//!
//! This facade re-exports the public API of the memsim sub-crates. Adding
//! `memsim` as a single dependency is enough for most uses.
//!
//! # Quick start
//!
//! ```rust
//! use memsim::prelude::*;
//!
//! let mut heap = Allocator::new(100);
//! let a = heap.allocate(FitStrategy::FirstFit, 30).unwrap();
//! let _b = heap.allocate(FitStrategy::BestFit, 20).unwrap();
//! heap.free(a).unwrap();
//!
//! let m = heap.metrics();
//! assert_eq!(m.used, 20);
//! assert_eq!(m.largest_free_block, 50);
//!
//! let mut l1 = DirectMappedCache::new(CacheConfig::new(64, 16));
//! assert!(!l1.access(0));
//! assert!(l1.access(4));
//! assert_eq!(l1.stats().hits, 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `memsim-core` | Ids, addresses, `FitStrategy`, error types |
//! | [`alloc`] | `memsim-alloc` | Block list, placement strategies, metrics |
//! | [`cache`] | `memsim-cache` | Direct-mapped cache, statistics, hierarchies |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Shared vocabulary (`memsim-core`).
///
/// [`types::AllocationId`], [`types::Address`], [`types::FitStrategy`] and
/// the error enums.
pub use memsim_core as types;

/// Heap simulation (`memsim-alloc`).
///
/// [`alloc::Allocator`] manages one contiguous range split into an
/// address-ordered list of blocks.
pub use memsim_alloc as alloc;

/// Cache simulation (`memsim-cache`).
///
/// [`cache::DirectMappedCache`] for a single level and
/// [`cache::CacheHierarchy`] for L1/L2-style chains.
pub use memsim_cache as cache;

/// Common imports.
///
/// ```rust
/// use memsim::prelude::*;
/// ```
pub mod prelude {
    pub use memsim_alloc::{Allocator, AllocatorConfig, BlockState, BlockView, MetricsSnapshot};

    pub use memsim_cache::{CacheConfig, CacheHierarchy, CacheStats, DirectMappedCache};

    pub use memsim_core::{
        Address, AllocError, AllocationId, ConfigError, FitStrategy, FreeError,
    };
}
