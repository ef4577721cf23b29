//! Disk workload model.

use log::warn;
use serde::{Deserialize, Serialize};

/// Number of tracks on the simulated disk. Boundary sweeps (SCAN, C-SCAN)
/// travel to track `DISK_SIZE - 1`.
pub const DISK_SIZE: i64 = 200;

/// Pending track requests and the current head position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskRequestSet {
    /// Requested tracks in arrival order. Duplicates allowed.
    pub requests: Vec<i64>,
    /// Track under the head before the first request is serviced.
    pub head_position: i64,
}

impl DiskRequestSet {
    /// Creates a request set.
    pub fn new(requests: Vec<i64>, head_position: i64) -> Self {
        Self {
            requests,
            head_position,
        }
    }

    /// Copy with the head and every request clamped into
    /// `[0, DISK_SIZE - 1]`.
    pub fn normalized(&self) -> Self {
        let clamp = |what: &str, track: i64| {
            let clamped = track.clamp(0, DISK_SIZE - 1);
            if clamped != track {
                warn!("disk: {} {} clamped to {}", what, track, clamped);
            }
            clamped
        };
        Self {
            requests: self.requests.iter().map(|&r| clamp("request", r)).collect(),
            head_position: clamp("head", self.head_position),
        }
    }

    /// Requests sorted ascending, split at the head:
    /// `(below, at_or_above)`, both ascending.
    pub(crate) fn split_at_head(&self) -> (Vec<i64>, Vec<i64>) {
        let mut sorted = self.requests.clone();
        sorted.sort_unstable();
        let pivot = sorted.partition_point(|&r| r < self.head_position);
        let right = sorted.split_off(pivot);
        (sorted, right)
    }
}
