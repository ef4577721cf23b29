//! Memory-block allocation.
//!
//! Simulates placing a sequence of allocation requests into one contiguous
//! region and reports the final block layout with fragmentation metrics.
//!
//! The operation set is **allocate-only**: there is no free primitive, so
//! blocks are split but never released or coalesced. Each run starts from a
//! single free block spanning `[0, total_memory)`.
//!
//! # Algorithms
//!
//! | Algorithm | Block choice | Reserved size |
//! |-----------|--------------|---------------|
//! | First Fit | lowest address that fits | request |
//! | Best Fit | smallest that fits | request |
//! | Worst Fit | largest that fits | request |
//! | Buddy | lowest address that fits | next power of two |
//! | Paging | next pages after a bump cursor | whole pages |
//!
//! Failed requests never abort a run. They are reported in
//! [`MemoryAllocationResult::outcomes`] and left out of
//! [`MemoryAllocationResult::allocated_blocks`].
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 9

mod blocks;
mod fragmentation;
mod strategies;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{FragmentationAccounting, SimulationConfig};
use crate::error::ParseAlgorithmError;
use crate::models::{MemoryBlock, MemoryRequest, MemoryWorkload};

/// Memory allocation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoryAlgorithm {
    #[serde(rename = "First Fit")]
    FirstFit,
    #[serde(rename = "Best Fit")]
    BestFit,
    #[serde(rename = "Worst Fit")]
    WorstFit,
    #[serde(rename = "Buddy System")]
    Buddy,
    Paging,
}

impl MemoryAlgorithm {
    /// Every variant, in display order.
    pub const ALL: [MemoryAlgorithm; 5] = [
        MemoryAlgorithm::FirstFit,
        MemoryAlgorithm::BestFit,
        MemoryAlgorithm::WorstFit,
        MemoryAlgorithm::Buddy,
        MemoryAlgorithm::Paging,
    ];

    /// Display label.
    pub fn name(&self) -> &'static str {
        match self {
            MemoryAlgorithm::FirstFit => "First Fit",
            MemoryAlgorithm::BestFit => "Best Fit",
            MemoryAlgorithm::WorstFit => "Worst Fit",
            MemoryAlgorithm::Buddy => "Buddy System",
            MemoryAlgorithm::Paging => "Paging",
        }
    }

    /// Runs this algorithm on `workload`.
    ///
    /// Paging uses the workload's page size, falling back to
    /// `config.page_size`.
    pub fn run(&self, workload: &MemoryWorkload, config: &SimulationConfig) -> MemoryAllocationResult {
        let total = workload.total_memory;
        let requests = &workload.requests;
        let accounting = config.fragmentation_accounting;

        let result = match self {
            MemoryAlgorithm::FirstFit => strategies::run_first_fit(total, requests, accounting),
            MemoryAlgorithm::BestFit => strategies::run_best_fit(total, requests, accounting),
            MemoryAlgorithm::WorstFit => strategies::run_worst_fit(total, requests, accounting),
            MemoryAlgorithm::Buddy => strategies::run_buddy(total, requests, accounting),
            MemoryAlgorithm::Paging => {
                let page_size = workload
                    .page_size
                    .unwrap_or_else(|| config.effective_page_size());
                strategies::run_paging(total, page_size, requests, accounting)
            }
        };
        log::debug!(
            "memory {}: {}/{} requests satisfied, external {}, utilization {:.1}%",
            self.name(),
            result.allocated_blocks.len(),
            requests.len(),
            result.external_fragmentation,
            result.memory_utilization
        );
        result
    }
}

impl fmt::Display for MemoryAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MemoryAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "firstfit" => Ok(MemoryAlgorithm::FirstFit),
            "bestfit" => Ok(MemoryAlgorithm::BestFit),
            "worstfit" => Ok(MemoryAlgorithm::WorstFit),
            "buddy" | "buddysystem" => Ok(MemoryAlgorithm::Buddy),
            "paging" => Ok(MemoryAlgorithm::Paging),
            _ => Err(ParseAlgorithmError::new("memory", s)),
        }
    }
}

/// A fully satisfied request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    /// Requesting process.
    pub process_id: String,
    /// Start of the reserved span.
    pub start_address: i64,
    /// Units reserved (after rounding to a power of two or whole pages).
    pub size: i64,
    /// Units requested.
    pub requested: i64,
}

/// Why a request was not satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    /// No free block was large enough.
    #[serde(rename_all = "camelCase")]
    NoFitBlock {
        /// Largest free block at the time of the request.
        largest_free: i64,
    },
    /// The region ran out of pages part-way. Pages already assigned remain
    /// owned by the process.
    InsufficientPages { allocated: i64, needed: i64 },
}

/// Result of one request, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AllocationOutcome {
    Allocated(AllocationRecord),
    #[serde(rename_all = "camelCase")]
    Failed {
        process_id: String,
        requested: i64,
        reason: FailureReason,
    },
}

impl AllocationOutcome {
    /// Process the outcome belongs to.
    pub fn process_id(&self) -> &str {
        match self {
            AllocationOutcome::Allocated(record) => &record.process_id,
            AllocationOutcome::Failed { process_id, .. } => process_id,
        }
    }

    /// Whether the request was fully satisfied.
    pub fn is_allocated(&self) -> bool {
        matches!(self, AllocationOutcome::Allocated(_))
    }
}

/// Final layout and metrics for one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryAllocationResult {
    /// Algorithm that produced this result.
    pub algorithm: MemoryAlgorithm,
    /// Region size after normalization.
    pub total_memory: i64,
    /// Blocks in address order, tiling `[0, total_memory)`.
    pub blocks: Vec<MemoryBlock>,
    /// Whether at least one request was satisfied.
    pub allocated: bool,
    /// Sum of free block sizes.
    pub external_fragmentation: i64,
    /// Reserved but unrequested space.
    pub internal_fragmentation: i64,
    /// Percentage of the region reserved by satisfied requests.
    pub memory_utilization: f64,
    /// Satisfied requests, in request order.
    pub allocated_blocks: Vec<AllocationRecord>,
    /// One entry per request, in request order.
    pub outcomes: Vec<AllocationOutcome>,
}

impl MemoryAllocationResult {
    /// Requests that were not satisfied.
    pub fn failures(&self) -> impl Iterator<Item = &AllocationOutcome> {
        self.outcomes.iter().filter(|o| !o.is_allocated())
    }

    /// Number of free blocks.
    pub fn free_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_free()).count()
    }

    /// Size of the largest free block (0 when none).
    pub fn largest_free_block(&self) -> i64 {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }
}

/// First Fit with per-owner fragmentation accounting.
pub fn first_fit(total_memory: i64, requests: &[MemoryRequest]) -> MemoryAllocationResult {
    strategies::run_first_fit(total_memory, requests, FragmentationAccounting::PerOwner)
}

/// Best Fit with per-owner fragmentation accounting.
pub fn best_fit(total_memory: i64, requests: &[MemoryRequest]) -> MemoryAllocationResult {
    strategies::run_best_fit(total_memory, requests, FragmentationAccounting::PerOwner)
}

/// Worst Fit with per-owner fragmentation accounting.
pub fn worst_fit(total_memory: i64, requests: &[MemoryRequest]) -> MemoryAllocationResult {
    strategies::run_worst_fit(total_memory, requests, FragmentationAccounting::PerOwner)
}

/// Simplified buddy allocation: power-of-two rounding and splitting only.
pub fn buddy(total_memory: i64, requests: &[MemoryRequest]) -> MemoryAllocationResult {
    strategies::run_buddy(total_memory, requests, FragmentationAccounting::PerOwner)
}

/// Fixed-size paging with per-owner fragmentation accounting.
pub fn paging(
    total_memory: i64,
    page_size: i64,
    requests: &[MemoryRequest],
) -> MemoryAllocationResult {
    strategies::run_paging(total_memory, page_size, requests, FragmentationAccounting::PerOwner)
}
