//! Ordered block list over one memory region.
//!
//! Blocks stay sorted by address and tile `[0, total)` without gaps or
//! overlap. The only mutation is [`BlockList::claim`], which hands the front
//! of a free block to an owner and leaves the rest free. Nothing is ever
//! released or coalesced.

use log::trace;

use crate::models::MemoryBlock;

#[derive(Debug, Clone)]
pub(crate) struct BlockList {
    blocks: Vec<MemoryBlock>,
}

impl BlockList {
    /// One free block spanning the region (none when `total` is 0).
    pub(crate) fn new(total: i64) -> Self {
        let blocks = if total > 0 {
            vec![MemoryBlock::free(0, total)]
        } else {
            Vec::new()
        };
        Self { blocks }
    }

    fn fitting(&self, size: i64) -> impl Iterator<Item = (usize, &MemoryBlock)> {
        self.blocks
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.is_free() && b.size >= size)
    }

    /// Lowest-addressed free block that holds `size`.
    pub(crate) fn first_fit(&self, size: i64) -> Option<usize> {
        self.fitting(size).map(|(i, _)| i).next()
    }

    /// Smallest free block that holds `size`; lowest address on ties.
    pub(crate) fn best_fit(&self, size: i64) -> Option<usize> {
        let mut best: Option<(usize, i64)> = None;
        for (i, block) in self.fitting(size) {
            if best.map_or(true, |(_, s)| block.size < s) {
                best = Some((i, block.size));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Largest free block that holds `size`; lowest address on ties.
    pub(crate) fn worst_fit(&self, size: i64) -> Option<usize> {
        let mut worst: Option<(usize, i64)> = None;
        for (i, block) in self.fitting(size) {
            if worst.map_or(true, |(_, s)| block.size > s) {
                worst = Some((i, block.size));
            }
        }
        worst.map(|(i, _)| i)
    }

    /// Index of the free block starting exactly at `address`.
    pub(crate) fn free_at(&self, address: i64) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.is_free() && b.start_address == address)
    }

    /// Size of the largest free block (0 when none).
    pub(crate) fn largest_free(&self) -> i64 {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }

    /// Assigns the first `size` units of free block `index` to `owner`,
    /// splitting off the remainder as a new free block right after it.
    /// Returns the start address of the claimed span.
    ///
    /// The caller guarantees the block is free and at least `size` long.
    pub(crate) fn claim(&mut self, index: usize, size: i64, owner: &str) -> i64 {
        let block = &mut self.blocks[index];
        debug_assert!(block.is_free() && block.size >= size);

        let start = block.start_address;
        let remainder = block.size - size;
        block.size = size;
        block.owner = Some(owner.to_string());

        if remainder > 0 {
            trace!("split [{}, {}) at {}", start, start + size + remainder, start + size);
            self.blocks
                .insert(index + 1, MemoryBlock::free(start + size, remainder));
        }
        start
    }

    pub(crate) fn into_blocks(self) -> Vec<MemoryBlock> {
        self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Free list with holes of 10 @0, 40 @20, 10 @70, 20 @80.
    fn fragmented() -> BlockList {
        BlockList {
            blocks: vec![
                MemoryBlock::free(0, 10),
                MemoryBlock::owned(10, 10, "b"),
                MemoryBlock::free(20, 40),
                MemoryBlock::owned(60, 10, "d"),
                MemoryBlock::free(70, 10),
                MemoryBlock::free(80, 20),
            ],
        }
    }

    #[test]
    fn test_new_region() {
        assert_eq!(BlockList::new(64).into_blocks(), vec![MemoryBlock::free(0, 64)]);
        assert!(BlockList::new(0).into_blocks().is_empty());
    }

    #[test]
    fn test_claim_splits() {
        let mut list = BlockList::new(100);
        assert_eq!(list.claim(0, 30, "P1"), 0);
        assert_eq!(
            list.clone().into_blocks(),
            vec![MemoryBlock::owned(0, 30, "P1"), MemoryBlock::free(30, 70)]
        );
        assert_eq!(list.largest_free(), 70);
    }

    #[test]
    fn test_claim_exact_no_remainder() {
        let mut list = BlockList::new(50);
        list.claim(0, 50, "P1");
        assert_eq!(list.clone().into_blocks(), vec![MemoryBlock::owned(0, 50, "P1")]);
        assert_eq!(list.largest_free(), 0);
        assert_eq!(list.first_fit(1), None);
    }

    #[test]
    fn test_fit_selection() {
        let list = fragmented();
        assert_eq!(list.first_fit(10), Some(0));
        assert_eq!(list.first_fit(15), Some(2));
        assert_eq!(list.best_fit(10), Some(0)); // 10 @0 before 10 @70
        assert_eq!(list.best_fit(15), Some(5)); // 20 @80
        assert_eq!(list.worst_fit(5), Some(2)); // 40 @20
        assert_eq!(list.worst_fit(50), None);
    }

    #[test]
    fn test_free_at() {
        let list = fragmented();
        assert_eq!(list.free_at(20), Some(2));
        assert_eq!(list.free_at(10), None); // owned
        assert_eq!(list.free_at(25), None); // not a block start
    }
}
