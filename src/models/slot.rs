//! CPU schedule interval.

use serde::{Deserialize, Serialize};

/// A contiguous interval `[start_time, end_time)` during which one process
/// holds the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    /// Process holding the CPU.
    #[serde(rename = "process")]
    pub process_id: String,
    /// Start tick (inclusive).
    pub start_time: i64,
    /// End tick (exclusive).
    pub end_time: i64,
}

impl ScheduleSlot {
    /// Creates a slot.
    pub fn new(process_id: impl Into<String>, start_time: i64, end_time: i64) -> Self {
        Self {
            process_id: process_id.into(),
            start_time,
            end_time,
        }
    }

    /// Slot length in ticks.
    pub fn duration(&self) -> i64 {
        self.end_time - self.start_time
    }
}
