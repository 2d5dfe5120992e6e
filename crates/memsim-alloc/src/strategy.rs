//! Placement search for the three fit strategies.
//!
//! [`select`] is a pure function of the block sequence and the request
//! size. It never mutates the list, so the allocator can log or count a
//! failed search before touching any state.

use memsim_core::FitStrategy;

use crate::block::{BlockIndex, MemoryBlock};

/// Choose the free block that `strategy` would place a `request`-byte
/// allocation in.
///
/// `blocks` must yield blocks in ascending address order. Only free blocks
/// with `size >= request` are candidates. Ties under best-fit and worst-fit
/// go to the candidate seen first, i.e. the lowest address.
pub fn select<'a, I>(strategy: FitStrategy, blocks: I, request: usize) -> Option<BlockIndex>
where
    I: IntoIterator<Item = (BlockIndex, &'a MemoryBlock)>,
{
    let mut candidates = blocks
        .into_iter()
        .filter(|(_, block)| block.is_free() && block.size >= request)
        .map(|(index, block)| (index, block.size));

    match strategy {
        FitStrategy::FirstFit => candidates.next().map(|(index, _)| index),
        FitStrategy::BestFit => pick(candidates, |size, best| size < best),
        FitStrategy::WorstFit => pick(candidates, |size, best| size > best),
    }
}

/// Keep the first candidate for which no later one `beats` it strictly.
fn pick<I, F>(candidates: I, beats: F) -> Option<BlockIndex>
where
    I: Iterator<Item = (BlockIndex, usize)>,
    F: Fn(usize, usize) -> bool,
{
    candidates
        .fold(None, |chosen: Option<(BlockIndex, usize)>, (index, size)| {
            match chosen {
                Some((_, best)) if !beats(size, best) => chosen,
                _ => Some((index, size)),
            }
        })
        .map(|(index, _)| index)
}
