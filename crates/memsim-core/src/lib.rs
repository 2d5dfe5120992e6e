//! Core types for the memsim allocation and cache simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the allocator and cache crates: allocation
//! identifiers, the fit-strategy selector, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod strategy;

pub use error::{AllocError, ConfigError, FreeError};
pub use id::{Address, AllocationId};
pub use strategy::{FitStrategy, ParseStrategyError};
