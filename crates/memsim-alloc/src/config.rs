//! Allocator configuration parameters.

use memsim_core::ConfigError;

/// Configuration for the block allocator.
///
/// Validated at construction; the managed range cannot be resized except
/// by re-initializing the allocator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Size of the managed address range in bytes.
    ///
    /// Default: 1024. Must be at least 1.
    pub total_size: usize,

    /// Granularity that every request is rounded up to before placement.
    ///
    /// Default: 1 (exact-size blocks). Must be a power of two. The bytes
    /// added by rounding are reported as internal fragmentation.
    pub alignment: usize,
}

impl AllocatorConfig {
    /// Default managed range: 1KB.
    pub const DEFAULT_TOTAL_SIZE: usize = 1024;

    /// Default alignment: byte granularity.
    pub const DEFAULT_ALIGNMENT: usize = 1;

    /// Create a config managing `total_size` bytes at byte granularity.
    pub fn new(total_size: usize) -> Self {
        Self {
            total_size,
            alignment: Self::DEFAULT_ALIGNMENT,
        }
    }

    /// Set the request alignment.
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_size == 0 {
            return Err(ConfigError::ZeroMemory);
        }
        if !self.alignment.is_power_of_two() {
            return Err(ConfigError::InvalidAlignment {
                alignment: self.alignment,
            });
        }
        Ok(())
    }

    /// Round `request` up to the configured alignment.
    ///
    /// Returns `None` if rounding overflows `usize`.
    pub fn block_size_for(&self, request: usize) -> Option<usize> {
        let mask = self.alignment - 1;
        request.checked_add(mask).map(|n| n & !mask)
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOTAL_SIZE)
    }
}
