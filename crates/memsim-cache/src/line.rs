//! Per-line cache state.

/// One line of a direct-mapped cache.
///
/// `fifo_timestamp` is the access-clock value at the most recent fill. A
/// direct-mapped line never has to choose a victim, so the timestamp does
/// not influence replacement; it is kept so that line state carries the
/// same insertion order a set-associative FIFO policy would consult.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line has ever been filled.
    pub valid: bool,
    /// Tag of the resident block. Meaningless while invalid.
    pub tag: usize,
    /// Access-clock value at the last fill.
    pub fifo_timestamp: u64,
}

impl CacheLine {
    /// Whether this line currently holds the block with `tag`.
    pub fn holds(&self, tag: usize) -> bool {
        self.valid && self.tag == tag
    }

    /// Overwrite the line with a new resident. Returns the evicted tag, if any.
    pub(crate) fn fill(&mut self, tag: usize, now: u64) -> Option<usize> {
        let evicted = self.valid.then_some(self.tag);
        self.valid = true;
        self.tag = tag;
        self.fifo_timestamp = now;
        evicted
    }
}
