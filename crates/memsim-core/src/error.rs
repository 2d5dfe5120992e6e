//! Error types for the memsim simulator.
//!
//! Two of these are expected, recoverable outcomes rather than faults:
//! [`AllocError`] (no free block is large enough) and [`FreeError`]
//! (the id does not name a live allocation). Neither mutates simulator
//! state. [`ConfigError`] reports an invalid geometry before a component
//! is built.

use std::error::Error;
use std::fmt;

use crate::AllocationId;

/// An allocation request could not be satisfied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// No free block is at least `requested` bytes.
    NoFit {
        /// Number of bytes requested.
        requested: usize,
        /// Size of the largest free block at the time of the request.
        largest_free: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFit {
                requested,
                largest_free,
            } => write!(
                f,
                "allocation failed: requested {requested} bytes, largest free block is {largest_free} bytes"
            ),
        }
    }
}

impl Error for AllocError {}

/// A free request named an id that owns no allocated block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FreeError {
    /// The id was never issued since the allocator was last initialized.
    UnknownId {
        /// The offending id.
        id: AllocationId,
    },
    /// The id was issued, but its block has already been freed.
    AlreadyFree {
        /// The offending id.
        id: AllocationId,
    },
}

impl FreeError {
    /// The id named by the failed request.
    pub fn id(&self) -> AllocationId {
        match self {
            Self::UnknownId { id } | Self::AlreadyFree { id } => *id,
        }
    }
}

impl fmt::Display for FreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId { id } => write!(f, "invalid block id {id}: never allocated"),
            Self::AlreadyFree { id } => write!(f, "invalid block id {id}: already freed"),
        }
    }
}

impl Error for FreeError {}

/// Invalid component geometry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The allocator's managed range must be at least one byte.
    ZeroMemory,
    /// Allocation alignment must be a non-zero power of two.
    InvalidAlignment {
        /// The configured alignment.
        alignment: usize,
    },
    /// Cache capacity must be positive.
    ZeroCacheSize,
    /// Cache block size must be positive.
    ZeroBlockSize,
    /// Cache capacity must be a whole number of blocks.
    CacheNotMultiple {
        /// Configured cache capacity in bytes.
        cache_size: usize,
        /// Configured block size in bytes.
        block_size: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMemory => write!(f, "memory size must be at least 1 byte"),
            Self::InvalidAlignment { alignment } => {
                write!(f, "alignment {alignment} is not a power of two")
            }
            Self::ZeroCacheSize => write!(f, "cache size must be at least 1 byte"),
            Self::ZeroBlockSize => write!(f, "cache block size must be at least 1 byte"),
            Self::CacheNotMultiple {
                cache_size,
                block_size,
            } => write!(
                f,
                "cache size {cache_size} is not a multiple of block size {block_size}"
            ),
        }
    }
}

impl Error for ConfigError {}
