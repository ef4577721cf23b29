//! CPU process scheduling.
//!
//! Simulates a single CPU serving a set of processes and reports the
//! resulting Gantt schedule with waiting, turnaround and utilization metrics.
//!
//! # Algorithms
//!
//! | Algorithm | Preemptive | Selection |
//! |-----------|------------|-----------|
//! | FCFS | no | arrival order |
//! | SJF | no | shortest burst ([`rules::ShortestBurst`]) |
//! | Priority | no | lowest priority value ([`rules::HighestPriority`]) |
//! | Round Robin | on quantum expiry | FIFO ready queue |
//! | SRTF | every tick | shortest remaining ([`rules::ShortestRemaining`]) |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

mod kpi;
pub mod rules;
mod schedulers;

pub use kpi::CpuMetrics;
pub use schedulers::{fcfs, priority, round_robin, sjf, srtf};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseAlgorithmError;
use crate::models::{Process, ScheduleSlot};

/// CPU scheduling algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpuAlgorithm {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF")]
    Sjf,
    Priority,
    #[serde(rename = "Round Robin")]
    RoundRobin,
    #[serde(rename = "SRTF")]
    Srtf,
}

impl CpuAlgorithm {
    /// Every variant, in display order.
    pub const ALL: [CpuAlgorithm; 5] = [
        CpuAlgorithm::Fcfs,
        CpuAlgorithm::Sjf,
        CpuAlgorithm::Priority,
        CpuAlgorithm::RoundRobin,
        CpuAlgorithm::Srtf,
    ];

    /// Display label.
    pub fn name(&self) -> &'static str {
        match self {
            CpuAlgorithm::Fcfs => "FCFS",
            CpuAlgorithm::Sjf => "SJF",
            CpuAlgorithm::Priority => "Priority",
            CpuAlgorithm::RoundRobin => "Round Robin",
            CpuAlgorithm::Srtf => "SRTF",
        }
    }

    /// Whether the algorithm can take the CPU away from a running process.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, CpuAlgorithm::RoundRobin | CpuAlgorithm::Srtf)
    }

    /// Runs this algorithm. `time_quantum` is only read by Round Robin.
    pub fn run(&self, processes: &[Process], time_quantum: i64) -> CpuScheduleResult {
        let result = match self {
            CpuAlgorithm::Fcfs => fcfs(processes),
            CpuAlgorithm::Sjf => sjf(processes),
            CpuAlgorithm::Priority => priority(processes),
            CpuAlgorithm::RoundRobin => round_robin(processes, time_quantum),
            CpuAlgorithm::Srtf => srtf(processes),
        };
        log::debug!(
            "cpu {}: {} processes, {} slots, avg wait {:.2}",
            self.name(),
            processes.len(),
            result.schedule.len(),
            result.metrics.avg_waiting_time
        );
        result
    }
}

impl fmt::Display for CpuAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CpuAlgorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "fcfs" => Ok(CpuAlgorithm::Fcfs),
            "sjf" => Ok(CpuAlgorithm::Sjf),
            "priority" => Ok(CpuAlgorithm::Priority),
            "roundrobin" | "rr" => Ok(CpuAlgorithm::RoundRobin),
            "srtf" => Ok(CpuAlgorithm::Srtf),
            _ => Err(ParseAlgorithmError::new("cpu", s)),
        }
    }
}

/// Schedule and metrics for one CPU scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuScheduleResult {
    /// Algorithm that produced this result.
    pub algorithm: CpuAlgorithm,
    /// Slots in time order.
    pub schedule: Vec<ScheduleSlot>,
    /// Derived metrics.
    #[serde(flatten)]
    pub metrics: CpuMetrics,
}
