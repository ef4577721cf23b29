//! Allocation strategies.
//!
//! Each strategy makes one forward pass over the requests against a fresh
//! region. A request that cannot be satisfied is recorded as failed and the
//! pass continues with the next one.

use log::{trace, warn};

use super::blocks::BlockList;
use super::{fragmentation, AllocationOutcome, AllocationRecord, FailureReason};
use super::{MemoryAlgorithm, MemoryAllocationResult};
use crate::config::{FragmentationAccounting, DEFAULT_PAGE_SIZE};
use crate::models::MemoryRequest;

/// Allocation state for one run.
struct Allocation {
    algorithm: MemoryAlgorithm,
    total_memory: i64,
    blocks: BlockList,
    records: Vec<AllocationRecord>,
    outcomes: Vec<AllocationOutcome>,
}

impl Allocation {
    fn new(algorithm: MemoryAlgorithm, total_memory: i64) -> Self {
        let total_memory = if total_memory < 0 {
            warn!("{}: negative total memory {} floored to 0", algorithm.name(), total_memory);
            0
        } else {
            total_memory
        };
        Self {
            algorithm,
            total_memory,
            blocks: BlockList::new(total_memory),
            records: Vec::new(),
            outcomes: Vec::new(),
        }
    }

    fn succeed(&mut self, request: &MemoryRequest, start_address: i64, size: i64, requested: i64) {
        trace!(
            "{}: {} -> [{}, {})",
            self.algorithm.name(),
            request.process_id,
            start_address,
            start_address + size
        );
        let record = AllocationRecord {
            process_id: request.process_id.clone(),
            start_address,
            size,
            requested,
        };
        self.records.push(record.clone());
        self.outcomes.push(AllocationOutcome::Allocated(record));
    }

    fn fail(&mut self, request: &MemoryRequest, requested: i64, reason: FailureReason) {
        warn!(
            "{}: {} ({} units) not allocated: {:?}",
            self.algorithm.name(),
            request.process_id,
            requested,
            reason
        );
        self.outcomes.push(AllocationOutcome::Failed {
            process_id: request.process_id.clone(),
            requested,
            reason,
        });
    }

    /// Claims `size` units in the block chosen by `pick`, or fails.
    fn place(
        &mut self,
        request: &MemoryRequest,
        requested: i64,
        size: i64,
        pick: fn(&BlockList, i64) -> Option<usize>,
    ) {
        match pick(&self.blocks, size) {
            Some(index) => {
                let start = self.blocks.claim(index, size, &request.process_id);
                self.succeed(request, start, size, requested);
            }
            None => self.reject(request, requested),
        }
    }

    /// Fails the request because no free block can hold it.
    fn reject(&mut self, request: &MemoryRequest, requested: i64) {
        let reason = FailureReason::NoFitBlock {
            largest_free: self.blocks.largest_free(),
        };
        self.fail(request, requested, reason);
    }

    fn finish(self, accounting: FragmentationAccounting) -> MemoryAllocationResult {
        let blocks = self.blocks.into_blocks();
        let external_fragmentation = fragmentation::external(&blocks);
        let internal_fragmentation = fragmentation::internal(&blocks, &self.records, accounting);
        let memory_utilization = fragmentation::utilization(&self.records, self.total_memory);

        MemoryAllocationResult {
            algorithm: self.algorithm,
            total_memory: self.total_memory,
            allocated: !self.records.is_empty(),
            blocks,
            external_fragmentation,
            internal_fragmentation,
            memory_utilization,
            allocated_blocks: self.records,
            outcomes: self.outcomes,
        }
    }
}

fn fit(
    algorithm: MemoryAlgorithm,
    pick: fn(&BlockList, i64) -> Option<usize>,
    total_memory: i64,
    requests: &[MemoryRequest],
    accounting: FragmentationAccounting,
) -> MemoryAllocationResult {
    let mut state = Allocation::new(algorithm, total_memory);
    for request in requests {
        let size = request.effective_size();
        state.place(request, size, size, pick);
    }
    state.finish(accounting)
}

pub(crate) fn run_first_fit(
    total_memory: i64,
    requests: &[MemoryRequest],
    accounting: FragmentationAccounting,
) -> MemoryAllocationResult {
    fit(MemoryAlgorithm::FirstFit, BlockList::first_fit, total_memory, requests, accounting)
}

pub(crate) fn run_best_fit(
    total_memory: i64,
    requests: &[MemoryRequest],
    accounting: FragmentationAccounting,
) -> MemoryAllocationResult {
    fit(MemoryAlgorithm::BestFit, BlockList::best_fit, total_memory, requests, accounting)
}

pub(crate) fn run_worst_fit(
    total_memory: i64,
    requests: &[MemoryRequest],
    accounting: FragmentationAccounting,
) -> MemoryAllocationResult {
    fit(MemoryAlgorithm::WorstFit, BlockList::worst_fit, total_memory, requests, accounting)
}

/// Smallest power of two holding `requested`, or `None` past `i64::MAX`.
fn buddy_size(requested: i64) -> Option<i64> {
    u64::try_from(requested)
        .ok()
        .and_then(u64::checked_next_power_of_two)
        .and_then(|size| i64::try_from(size).ok())
}

pub(crate) fn run_buddy(
    total_memory: i64,
    requests: &[MemoryRequest],
    accounting: FragmentationAccounting,
) -> MemoryAllocationResult {
    let mut state = Allocation::new(MemoryAlgorithm::Buddy, total_memory);
    for request in requests {
        let requested = request.effective_size();
        match buddy_size(requested) {
            Some(rounded) => state.place(request, requested, rounded, BlockList::first_fit),
            None => state.reject(request, requested),
        }
    }
    state.finish(accounting)
}

pub(crate) fn run_paging(
    total_memory: i64,
    page_size: i64,
    requests: &[MemoryRequest],
    accounting: FragmentationAccounting,
) -> MemoryAllocationResult {
    let page_size = if page_size < 1 {
        warn!("paging: page size {} replaced by {}", page_size, DEFAULT_PAGE_SIZE);
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };

    let mut state = Allocation::new(MemoryAlgorithm::Paging, total_memory);
    let mut cursor = 0;

    for request in requests {
        let requested = request.effective_size();
        // requested >= 1, so this rounds up without overflowing.
        let needed = (requested - 1) / page_size + 1;
        let mut allocated = 0;

        while allocated < needed && page_size <= state.total_memory - cursor {
            let Some(index) = state.blocks.free_at(cursor) else {
                break;
            };
            cursor = state.blocks.claim(index, page_size, &request.process_id) + page_size;
            allocated += 1;
        }

        if allocated == needed {
            let size = needed * page_size;
            state.succeed(request, cursor - size, size, requested);
        } else {
            // Pages already handed out stay with the process.
            state.fail(request, requested, FailureReason::InsufficientPages { allocated, needed });
        }
    }

    state.finish(accounting)
}
