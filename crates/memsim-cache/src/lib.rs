//! Direct-mapped cache simulation.
//!
//! A [`DirectMappedCache`] maps every address to exactly one line:
//!
//! ```text
//! address ──/ block_size──▶ block_number ──┬── mod lines ──▶ line_index
//!                                          └── / lines  ──▶ tag
//! ```
//!
//! A hit requires the line to be valid and to hold the same tag. On a miss
//! the line is refilled unconditionally: with one resident per line there
//! is no victim to choose, so FIFO replacement reduces to overwrite. Each
//! fill still records an insertion timestamp so that line state matches
//! what a set-associative FIFO cache would keep.
//!
//! [`CacheHierarchy`] chains several independent caches (L1, L2, ...) and
//! consults each level in turn until one hits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod config;
pub mod hierarchy;
pub mod line;
pub mod stats;

pub use cache::{AccessOutcome, DirectMappedCache};
pub use config::{AddressParts, CacheConfig};
pub use hierarchy::{CacheHierarchy, CacheLevel, HierarchyOutcome};
pub use line::CacheLine;
pub use stats::CacheStats;
