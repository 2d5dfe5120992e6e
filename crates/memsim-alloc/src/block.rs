//! Memory blocks and the address-ordered block list.
//!
//! A [`BlockList`] stores [`MemoryBlock`]s in an arena of slots addressed
//! by stable [`BlockIndex`] values. Blocks are doubly linked through their
//! `prev`/`next` indices in ascending address order. Splitting a block
//! takes a slot (reusing a released one when available); merging releases
//! the absorbed block's slot. The list owns every block, so no block can
//! outlive its removal from the sequence.

use std::fmt;

use memsim_core::{Address, AllocationId};

/// Stable reference to a slot in a [`BlockList`].
///
/// An index stays valid for as long as its block is part of the sequence.
/// Once the block is merged away the slot may be reused by a later split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockIndex(u32);

impl BlockIndex {
    fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A contiguous run of simulated memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryBlock {
    /// Offset of the first byte.
    pub start: Address,
    /// Current size in bytes.
    pub size: usize,
    /// Bytes asked for by the owning allocation; 0 while free.
    pub requested_size: usize,
    /// Owning allocation, or `None` while free.
    pub id: Option<AllocationId>,
    /// Neighbour at the next-lower address.
    pub prev: Option<BlockIndex>,
    /// Neighbour at the next-higher address.
    pub next: Option<BlockIndex>,
}

impl MemoryBlock {
    fn free(start: Address, size: usize) -> Self {
        Self {
            start,
            size,
            requested_size: 0,
            id: None,
            prev: None,
            next: None,
        }
    }

    /// Whether no allocation owns this block.
    pub fn is_free(&self) -> bool {
        self.id.is_none()
    }

    /// One past the last byte.
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    /// Internal fragmentation attributable to this block.
    pub fn slack(&self) -> usize {
        if self.is_free() {
            0
        } else {
            self.size - self.requested_size
        }
    }
}

/// Allocation state of a block as reported by [`BlockView`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockState {
    /// Available for allocation.
    Free,
    /// Owned by a live allocation.
    Allocated {
        /// The owning allocation.
        id: AllocationId,
        /// Bytes actually requested.
        requested: usize,
    },
}

/// Read-only descriptor of one block, as produced by a dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockView {
    /// Offset of the first byte.
    pub start: Address,
    /// Size in bytes.
    pub size: usize,
    /// Free or allocated.
    pub state: BlockState,
}

impl BlockView {
    /// One past the last byte.
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    /// Address of the last byte (inclusive), as shown in memory dumps.
    pub fn last(&self) -> Address {
        self.end().saturating_sub(1)
    }

    /// Whether the block is free.
    pub fn is_free(&self) -> bool {
        matches!(self.state, BlockState::Free)
    }

    /// The owning id, if allocated.
    pub fn id(&self) -> Option<AllocationId> {
        match self.state {
            BlockState::Free => None,
            BlockState::Allocated { id, .. } => Some(id),
        }
    }
}

impl From<&MemoryBlock> for BlockView {
    fn from(block: &MemoryBlock) -> Self {
        let state = match block.id {
            None => BlockState::Free,
            Some(id) => BlockState::Allocated {
                id,
                requested: block.requested_size,
            },
        };
        Self {
            start: block.start,
            size: block.size,
            state,
        }
    }
}

/// Arena-backed, address-ordered, doubly linked sequence of blocks.
#[derive(Clone, Debug)]
pub struct BlockList {
    /// Slot storage; `None` marks a released slot.
    slots: Vec<Option<MemoryBlock>>,
    /// Released slots available for reuse.
    free_slots: Vec<BlockIndex>,
    /// Block at address 0.
    head: BlockIndex,
    /// Number of blocks currently in the sequence.
    len: usize,
}

impl BlockList {
    /// Create a list holding one free block spanning `[0, total_size)`.
    pub fn new(total_size: usize) -> Self {
        Self {
            slots: vec![Some(MemoryBlock::free(0, total_size))],
            free_slots: Vec::new(),
            head: BlockIndex(0),
            len: 1,
        }
    }

    /// Drop every block and start over with a single free block.
    pub fn reset(&mut self, total_size: usize) {
        self.slots.clear();
        self.slots.push(Some(MemoryBlock::free(0, total_size)));
        self.free_slots.clear();
        self.head = BlockIndex(0);
        self.len = 1;
    }

    /// Index of the block at address 0.
    pub fn head(&self) -> BlockIndex {
        self.head
    }

    /// Number of blocks in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: the sequence covers the whole range with at least one block.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots ever created (live + released).
    pub fn slot_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Borrow a block.
    ///
    /// # Panics
    ///
    /// Panics if `index` refers to a released slot.
    pub fn get(&self, index: BlockIndex) -> &MemoryBlock {
        self.slots[index.slot()]
            .as_ref()
            .expect("block index refers to a released slot")
    }

    fn get_mut(&mut self, index: BlockIndex) -> &mut MemoryBlock {
        self.slots[index.slot()]
            .as_mut()
            .expect("block index refers to a released slot")
    }

    /// Iterate blocks in ascending address order.
    pub fn iter(&self) -> Blocks<'_> {
        Blocks {
            list: self,
            cursor: Some(self.head),
        }
    }

    /// Split `index` so that it keeps its first `at` bytes.
    ///
    /// A new free block owning the remainder is linked immediately after it
    /// and its index is returned.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < at < size` and the block is free.
    pub fn split(&mut self, index: BlockIndex, at: usize) -> BlockIndex {
        let block = self.get(index);
        assert!(block.is_free(), "only free blocks can be split");
        assert!(
            at > 0 && at < block.size,
            "split point {at} outside block of {} bytes",
            block.size
        );

        let mut remainder = MemoryBlock::free(block.start + at, block.size - at);
        remainder.prev = Some(index);
        remainder.next = block.next;
        let old_next = block.next;

        let new_index = self.insert_slot(remainder);
        if let Some(next) = old_next {
            self.get_mut(next).prev = Some(new_index);
        }
        let block = self.get_mut(index);
        block.size = at;
        block.next = Some(new_index);
        self.len += 1;

        tracing::debug!(
            block = %index,
            remainder = %new_index,
            at,
            "split block"
        );
        new_index
    }

    /// Absorb the successor of `index` into it and release the successor's slot.
    ///
    /// Returns the number of bytes absorbed, or `None` if `index` is the
    /// last block.
    pub fn merge_next(&mut self, index: BlockIndex) -> Option<usize> {
        let next = self.get(index).next?;
        let absorbed = self.slots[next.slot()]
            .take()
            .expect("next link refers to a released slot");
        self.free_slots.push(next);
        self.len -= 1;

        if let Some(after) = absorbed.next {
            self.get_mut(after).prev = Some(index);
        }
        let block = self.get_mut(index);
        block.size += absorbed.size;
        block.next = absorbed.next;

        tracing::debug!(
            block = %index,
            absorbed = %next,
            bytes = absorbed.size,
            "merged blocks"
        );
        Some(absorbed.size)
    }

    /// Hand `index` to allocation `id`.
    pub(crate) fn mark_allocated(&mut self, index: BlockIndex, id: AllocationId, requested: usize) {
        let block = self.get_mut(index);
        debug_assert!(block.is_free());
        block.id = Some(id);
        block.requested_size = requested;
    }

    /// Return `index` to the free state without coalescing.
    pub(crate) fn mark_free(&mut self, index: BlockIndex) {
        let block = self.get_mut(index);
        block.id = None;
        block.requested_size = 0;
    }

    fn insert_slot(&mut self, block: MemoryBlock) -> BlockIndex {
        if let Some(reuse) = self.free_slots.pop() {
            self.slots[reuse.slot()] = Some(block);
            reuse
        } else {
            let index = BlockIndex(
                u32::try_from(self.slots.len()).expect("block arena exceeds u32::MAX slots"),
            );
            self.slots.push(Some(block));
            index
        }
    }
}

/// Address-order iterator over a [`BlockList`].
pub struct Blocks<'a> {
    list: &'a BlockList,
    cursor: Option<BlockIndex>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = (BlockIndex, &'a MemoryBlock);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let block = self.list.get(index);
        self.cursor = block.next;
        Some((index, block))
    }
}
