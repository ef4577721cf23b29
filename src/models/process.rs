//! Process model for CPU scheduling.

use log::warn;
use serde::{Deserialize, Serialize};

/// Priority assumed for a process that carries none (lowest urgency).
pub const LOWEST_PRIORITY: i64 = 999;

/// A process competing for the CPU.
///
/// Times are abstract integer ticks relative to t=0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Unique process identifier.
    pub id: String,
    /// Tick at which the process becomes ready.
    pub arrival_time: i64,
    /// CPU ticks needed to complete.
    pub burst_time: i64,
    /// Scheduling priority (lower = more urgent). `None` = lowest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl Process {
    /// Creates a process without a priority.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: None,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Priority used for comparisons, [`LOWEST_PRIORITY`] when unset.
    pub fn effective_priority(&self) -> i64 {
        self.priority.unwrap_or(LOWEST_PRIORITY)
    }

    /// Returns a copy with arrival floored at 0 and burst floored at 1.
    pub fn normalized(&self) -> Self {
        let mut p = self.clone();
        if p.arrival_time < 0 {
            warn!("process '{}': negative arrival {} floored to 0", p.id, p.arrival_time);
            p.arrival_time = 0;
        }
        if p.burst_time < 1 {
            warn!("process '{}': burst {} raised to 1", p.id, p.burst_time);
            p.burst_time = 1;
        }
        p
    }
}
