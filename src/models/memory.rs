//! Memory workload and block models.

use log::warn;
use serde::{Deserialize, Serialize};

/// A request to reserve `size` units of memory for a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRequest {
    /// Requesting process (unique per workload).
    pub process_id: String,
    /// Units requested.
    pub size: i64,
}

impl MemoryRequest {
    /// Creates a request.
    pub fn new(process_id: impl Into<String>, size: i64) -> Self {
        Self {
            process_id: process_id.into(),
            size,
        }
    }

    /// Request size floored at 1.
    pub(crate) fn effective_size(&self) -> i64 {
        if self.size < 1 {
            warn!(
                "memory request '{}': size {} raised to 1",
                self.process_id, self.size
            );
            1
        } else {
            self.size
        }
    }
}

/// A memory region and the allocation requests made against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryWorkload {
    /// Size of the region `[0, total_memory)`.
    pub total_memory: i64,
    /// Requests in processing order.
    pub requests: Vec<MemoryRequest>,
    /// Page size for Paging. `None` = configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl MemoryWorkload {
    /// Creates a workload without a page size.
    pub fn new(total_memory: i64, requests: Vec<MemoryRequest>) -> Self {
        Self {
            total_memory,
            requests,
            page_size: None,
        }
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// A contiguous span of memory, free or owned by one process.
///
/// A block without an owner is free. Serialized with an explicit `isFree`
/// flag next to the optional `processId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BlockRecord", from = "BlockRecord")]
pub struct MemoryBlock {
    /// First address of the block.
    pub start_address: i64,
    /// Length of the block.
    pub size: i64,
    /// Owning process, `None` when free.
    pub owner: Option<String>,
}

/// Wire form of [`MemoryBlock`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockRecord {
    start_address: i64,
    size: i64,
    #[serde(default)]
    is_free: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    process_id: Option<String>,
}

impl From<MemoryBlock> for BlockRecord {
    fn from(block: MemoryBlock) -> Self {
        Self {
            start_address: block.start_address,
            size: block.size,
            is_free: block.owner.is_none(),
            process_id: block.owner,
        }
    }
}

impl From<BlockRecord> for MemoryBlock {
    fn from(record: BlockRecord) -> Self {
        // An explicit free flag wins over a stale owner id.
        let owner = if record.is_free { None } else { record.process_id };
        Self {
            start_address: record.start_address,
            size: record.size,
            owner,
        }
    }
}

impl MemoryBlock {
    /// Creates a free block.
    pub fn free(start_address: i64, size: i64) -> Self {
        Self {
            start_address,
            size,
            owner: None,
        }
    }

    /// Creates a block owned by `owner`.
    pub fn owned(start_address: i64, size: i64, owner: impl Into<String>) -> Self {
        Self {
            start_address,
            size,
            owner: Some(owner.into()),
        }
    }

    /// Whether the block is unowned.
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// One past the last address of the block.
    pub fn end_address(&self) -> i64 {
        self.start_address + self.size
    }
}
