//! Disk scheduling algorithms.
//!
//! Every function returns a sequence starting at the head position and
//! accumulates seek time as the absolute distance of each head move, so
//! `total_seek_time` always equals the travel implied by `sequence`.
//! An empty request list leaves the head in place. Tracks outside
//! `[0, DISK_SIZE - 1]` are clamped first, so `sequence[0]` is the clamped
//! head.

use log::trace;

use super::{DiskAlgorithm, DiskScheduleResult};
use crate::models::{DiskRequestSet, DISK_SIZE};

/// Highest addressable track.
const LAST_TRACK: i64 = DISK_SIZE - 1;

/// Records head movement for one run.
struct HeadTrace {
    algorithm: DiskAlgorithm,
    sequence: Vec<i64>,
    total_seek_time: i64,
}

impl HeadTrace {
    fn start(algorithm: DiskAlgorithm, head: i64, capacity: usize) -> Self {
        let mut sequence = Vec::with_capacity(capacity + 3);
        sequence.push(head);
        Self {
            algorithm,
            sequence,
            total_seek_time: 0,
        }
    }

    fn position(&self) -> i64 {
        // Never empty: `start` pushes the head.
        self.sequence[self.sequence.len() - 1]
    }

    fn visit(&mut self, track: i64) {
        let distance = (track - self.position()).abs();
        trace!("{}: {} -> {} (+{})", self.algorithm.name(), self.position(), track, distance);
        self.total_seek_time += distance;
        self.sequence.push(track);
    }

    fn visit_all(&mut self, tracks: impl IntoIterator<Item = i64>) {
        for track in tracks {
            self.visit(track);
        }
    }

    fn finish(self) -> DiskScheduleResult {
        DiskScheduleResult {
            algorithm: self.algorithm,
            sequence: self.sequence,
            total_seek_time: self.total_seek_time,
        }
    }
}

/// First Come First Served: requests in input order.
pub fn fcfs(workload: &DiskRequestSet) -> DiskScheduleResult {
    let workload = workload.normalized();
    let mut head = HeadTrace::start(
        DiskAlgorithm::Fcfs,
        workload.head_position,
        workload.requests.len(),
    );
    head.visit_all(workload.requests.iter().copied());
    head.finish()
}

/// Shortest Seek Time First.
///
/// Repeatedly services the pending request nearest to the head. On equal
/// distance the request earliest in the remaining list wins.
pub fn sstf(workload: &DiskRequestSet) -> DiskScheduleResult {
    let workload = workload.normalized();
    let mut head = HeadTrace::start(
        DiskAlgorithm::Sstf,
        workload.head_position,
        workload.requests.len(),
    );
    let mut remaining = workload.requests.clone();

    while !remaining.is_empty() {
        let current = head.position();
        let mut closest = 0;
        let mut closest_distance = (remaining[0] - current).abs();
        for (i, &track) in remaining.iter().enumerate().skip(1) {
            let distance = (track - current).abs();
            if distance < closest_distance {
                closest = i;
                closest_distance = distance;
            }
        }
        head.visit(remaining.remove(closest));
    }

    head.finish()
}

/// SCAN (elevator).
///
/// Sweeps up through every request at or above the head, continues to the
/// last track, then reverses and services the lower requests descending.
pub fn scan(workload: &DiskRequestSet) -> DiskScheduleResult {
    let workload = workload.normalized();
    let mut head = HeadTrace::start(
        DiskAlgorithm::Scan,
        workload.head_position,
        workload.requests.len(),
    );
    if workload.requests.is_empty() {
        return head.finish();
    }

    let (left, right) = workload.split_at_head();
    head.visit_all(right);
    head.visit(LAST_TRACK);
    head.visit_all(left.into_iter().rev());
    head.finish()
}

/// Circular SCAN.
///
/// Sweeps up through the upper requests. If lower requests remain, travels
/// to the last track, wraps to track 0 (both moves count as seek time) and
/// sweeps up again.
pub fn cscan(workload: &DiskRequestSet) -> DiskScheduleResult {
    let workload = workload.normalized();
    let mut head = HeadTrace::start(
        DiskAlgorithm::CScan,
        workload.head_position,
        workload.requests.len(),
    );
    let (left, right) = workload.split_at_head();
    head.visit_all(right);

    if !left.is_empty() {
        head.visit(LAST_TRACK);
        head.visit(0);
        head.visit_all(left);
    }
    head.finish()
}

/// LOOK: SCAN that reverses at the furthest request instead of the edge.
pub fn look(workload: &DiskRequestSet) -> DiskScheduleResult {
    let workload = workload.normalized();
    let mut head = HeadTrace::start(
        DiskAlgorithm::Look,
        workload.head_position,
        workload.requests.len(),
    );
    let (left, right) = workload.split_at_head();
    head.visit_all(right);
    head.visit_all(left.into_iter().rev());
    head.finish()
}

/// Circular LOOK.
///
/// Sweeps up through the upper requests, then jumps straight to the lowest
/// pending request and sweeps up again. No edge or wrap cost.
pub fn clook(workload: &DiskRequestSet) -> DiskScheduleResult {
    let workload = workload.normalized();
    let mut head = HeadTrace::start(
        DiskAlgorithm::CLook,
        workload.head_position,
        workload.requests.len(),
    );
    let (left, right) = workload.split_at_head();
    head.visit_all(right);
    head.visit_all(left);
    head.finish()
}
