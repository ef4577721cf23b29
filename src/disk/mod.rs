//! Disk-head scheduling.
//!
//! Orders a set of pending track requests for a single read/write head and
//! measures the total head travel (seek time).
//!
//! # Algorithms
//!
//! | Algorithm | Order | Boundary |
//! |-----------|-------|----------|
//! | FCFS | arrival | - |
//! | SSTF | nearest pending track | - |
//! | SCAN | up, then down | visits `DISK_SIZE - 1` |
//! | C-SCAN | up, wrap, up | visits `DISK_SIZE - 1` and `0` |
//! | LOOK | up, then down | furthest request only |
//! | C-LOOK | up, jump to lowest, up | furthest request only |
//!
//! The sweep algorithms always move toward higher tracks first.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 11.2

mod algorithms;

pub use algorithms::{clook, cscan, fcfs, look, scan, sstf};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseAlgorithmError;
use crate::models::DiskRequestSet;

/// Disk scheduling algorithm.
///
/// Serializes as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiskAlgorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SSTF")]
    Sstf,
    #[serde(rename = "SCAN")]
    Scan,
    #[serde(rename = "C-SCAN")]
    CScan,
    #[serde(rename = "LOOK")]
    Look,
    #[serde(rename = "C-LOOK")]
    CLook,
}

impl DiskAlgorithm {
    /// Every variant, in display order.
    pub const ALL: [DiskAlgorithm; 6] = [
        DiskAlgorithm::Fcfs,
        DiskAlgorithm::Sstf,
        DiskAlgorithm::Scan,
        DiskAlgorithm::CScan,
        DiskAlgorithm::Look,
        DiskAlgorithm::CLook,
    ];

    /// Display label.
    pub fn name(&self) -> &'static str {
        match self {
            DiskAlgorithm::Fcfs => "FCFS",
            DiskAlgorithm::Sstf => "SSTF",
            DiskAlgorithm::Scan => "SCAN",
            DiskAlgorithm::CScan => "C-SCAN",
            DiskAlgorithm::Look => "LOOK",
            DiskAlgorithm::CLook => "C-LOOK",
        }
    }

    /// Runs this algorithm on `workload`.
    pub fn run(&self, workload: &DiskRequestSet) -> DiskScheduleResult {
        let result = match self {
            DiskAlgorithm::Fcfs => fcfs(workload),
            DiskAlgorithm::Sstf => sstf(workload),
            DiskAlgorithm::Scan => scan(workload),
            DiskAlgorithm::CScan => cscan(workload),
            DiskAlgorithm::Look => look(workload),
            DiskAlgorithm::CLook => clook(workload),
        };
        log::debug!(
            "disk {}: {} requests, seek {}",
            self.name(),
            workload.requests.len(),
            result.total_seek_time
        );
        result
    }
}

impl fmt::Display for DiskAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiskAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "fcfs" => Ok(DiskAlgorithm::Fcfs),
            "sstf" => Ok(DiskAlgorithm::Sstf),
            "scan" => Ok(DiskAlgorithm::Scan),
            "cscan" => Ok(DiskAlgorithm::CScan),
            "look" => Ok(DiskAlgorithm::Look),
            "clook" => Ok(DiskAlgorithm::CLook),
            _ => Err(ParseAlgorithmError::new("disk", s)),
        }
    }
}

/// Service order and head travel for one disk scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskScheduleResult {
    /// Algorithm that produced this result.
    pub algorithm: DiskAlgorithm,
    /// Head positions: the starting head, then every track visited.
    pub sequence: Vec<i64>,
    /// Sum of absolute distances between consecutive positions.
    pub total_seek_time: i64,
}

impl DiskScheduleResult {
    /// Number of head movements.
    pub fn movement_count(&self) -> usize {
        self.sequence.len().saturating_sub(1)
    }

    /// Mean seek distance per movement (0 when the head never moves).
    pub fn average_seek_time(&self) -> f64 {
        self.total_seek_time as f64 / self.movement_count().max(1) as f64
    }
}
