//! Cache geometry and address decomposition.

use memsim_core::{Address, ConfigError};

/// Geometry of a direct-mapped cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    /// Total capacity in bytes. Must be a positive multiple of `block_size`.
    pub cache_size: usize,
    /// Bytes per line. Must be positive.
    pub block_size: usize,
}

/// How an address splits into block number, line index, and tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressParts {
    /// `address / block_size`.
    pub block_number: usize,
    /// `block_number % line_count`.
    pub line_index: usize,
    /// `block_number / line_count`.
    pub tag: usize,
}

impl CacheConfig {
    /// Default capacity: 64 bytes.
    pub const DEFAULT_CACHE_SIZE: usize = 64;

    /// Default line size: 16 bytes.
    pub const DEFAULT_BLOCK_SIZE: usize = 16;

    /// Create a config. Call [`validate`](Self::validate) before use.
    pub fn new(cache_size: usize, block_size: usize) -> Self {
        Self {
            cache_size,
            block_size,
        }
    }

    /// Check that the geometry describes at least one whole line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.cache_size == 0 {
            return Err(ConfigError::ZeroCacheSize);
        }
        if self.cache_size % self.block_size != 0 {
            return Err(ConfigError::CacheNotMultiple {
                cache_size: self.cache_size,
                block_size: self.block_size,
            });
        }
        Ok(())
    }

    /// Number of lines: `cache_size / block_size`.
    pub fn line_count(&self) -> usize {
        self.cache_size / self.block_size
    }

    /// Split `address` into its block number, line index, and tag.
    pub fn decompose(&self, address: Address) -> AddressParts {
        let lines = self.line_count();
        let block_number = address / self.block_size;
        AddressParts {
            block_number,
            line_index: block_number % lines,
            tag: block_number / lines,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CACHE_SIZE, Self::DEFAULT_BLOCK_SIZE)
    }
}
