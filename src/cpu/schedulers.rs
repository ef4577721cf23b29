//! CPU scheduling algorithms.
//!
//! Every scheduler works on a normalized copy of its input (arrival >= 0,
//! burst >= 1), advances an integer clock, and emits slots in time order.
//! An idle CPU jumps straight to the next arrival.
//!
//! # Tie-breaking
//! Non-preemptive selection (SJF, Priority) walks candidates in arrival
//! order, stable with respect to input order. SRTF walks candidates in input
//! order. The first candidate with the lowest score wins.

use std::collections::VecDeque;

use log::trace;

use super::kpi::CpuMetrics;
use super::rules::{self, HighestPriority, SelectionRule, ShortestBurst, ShortestRemaining};
use super::{CpuAlgorithm, CpuScheduleResult};
use crate::models::{Process, ScheduleSlot};

/// Slot recorder for one run.
struct Timeline<'a> {
    algorithm: CpuAlgorithm,
    processes: &'a [Process],
    slots: Vec<ScheduleSlot>,
    last_owner: Option<usize>,
}

impl<'a> Timeline<'a> {
    fn new(algorithm: CpuAlgorithm, processes: &'a [Process]) -> Self {
        Self {
            algorithm,
            processes,
            slots: Vec::new(),
            last_owner: None,
        }
    }

    /// Appends `[start, end)` for process `idx`.
    fn run(&mut self, idx: usize, start: i64, end: i64) {
        trace!(
            "{}: {} runs [{}, {})",
            self.algorithm.name(),
            self.processes[idx].id,
            start,
            end
        );
        self.slots
            .push(ScheduleSlot::new(self.processes[idx].id.clone(), start, end));
        self.last_owner = Some(idx);
    }

    /// Like [`run`](Self::run), but extends the previous slot when the same
    /// process continues without a gap.
    fn run_merged(&mut self, idx: usize, start: i64, end: i64) {
        if self.last_owner == Some(idx) {
            if let Some(last) = self.slots.last_mut() {
                if last.end_time == start {
                    last.end_time = end;
                    return;
                }
            }
        }
        self.run(idx, start, end);
    }

    fn finish(self) -> CpuScheduleResult {
        let metrics = CpuMetrics::calculate(&self.slots, self.processes);
        CpuScheduleResult {
            algorithm: self.algorithm,
            schedule: self.slots,
            metrics,
        }
    }
}

fn normalize(processes: &[Process]) -> Vec<Process> {
    processes.iter().map(Process::normalized).collect()
}

/// Process indices sorted by arrival, stable in input order.
fn arrival_order(processes: &[Process]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    order.sort_by_key(|&i| processes[i].arrival_time);
    order
}

/// First Come First Served.
pub fn fcfs(processes: &[Process]) -> CpuScheduleResult {
    let procs = normalize(processes);
    let mut timeline = Timeline::new(CpuAlgorithm::Fcfs, &procs);
    let mut clock: i64 = 0;

    for idx in arrival_order(&procs) {
        let start = clock.max(procs[idx].arrival_time);
        let end = start + procs[idx].burst_time;
        timeline.run(idx, start, end);
        clock = end;
    }

    timeline.finish()
}

/// Shortest Job First (non-preemptive).
pub fn sjf(processes: &[Process]) -> CpuScheduleResult {
    non_preemptive(CpuAlgorithm::Sjf, &ShortestBurst, processes)
}

/// Priority scheduling (non-preemptive). Lower value runs first.
pub fn priority(processes: &[Process]) -> CpuScheduleResult {
    non_preemptive(CpuAlgorithm::Priority, &HighestPriority, processes)
}

/// Runs ready processes to completion, picking each by `rule`.
fn non_preemptive(
    algorithm: CpuAlgorithm,
    rule: &dyn SelectionRule,
    processes: &[Process],
) -> CpuScheduleResult {
    let procs = normalize(processes);
    let order = arrival_order(&procs);
    let remaining: Vec<i64> = procs.iter().map(|p| p.burst_time).collect();
    let mut done = vec![false; procs.len()];
    let mut timeline = Timeline::new(algorithm, &procs);
    let mut clock: i64 = 0;

    loop {
        let ready = order
            .iter()
            .copied()
            .filter(|&i| !done[i] && procs[i].arrival_time <= clock);

        let choice = rules::select(rule, ready, &procs, &remaining);
        match choice {
            Some(idx) => {
                let end = clock + procs[idx].burst_time;
                timeline.run(idx, clock, end);
                done[idx] = true;
                clock = end;
            }
            None => match order.iter().find(|&&i| !done[i]) {
                // Sorted by arrival, so the first pending one arrives next.
                Some(&next) => clock = procs[next].arrival_time,
                None => break,
            },
        }
    }

    timeline.finish()
}

/// Round Robin with a fixed time quantum (clamped to at least 1).
///
/// A preempted process rejoins the ready queue ahead of processes that
/// arrived during its slice.
pub fn round_robin(processes: &[Process], time_quantum: i64) -> CpuScheduleResult {
    let quantum = time_quantum.max(1);
    let procs = normalize(processes);
    let order = arrival_order(&procs);
    let mut remaining: Vec<i64> = procs.iter().map(|p| p.burst_time).collect();
    let mut ready: VecDeque<usize> = VecDeque::new();
    let mut next_arrival = 0;
    let mut timeline = Timeline::new(CpuAlgorithm::RoundRobin, &procs);
    let mut clock: i64 = 0;

    loop {
        while next_arrival < order.len() && procs[order[next_arrival]].arrival_time <= clock {
            ready.push_back(order[next_arrival]);
            next_arrival += 1;
        }

        let Some(idx) = ready.pop_front() else {
            match order.get(next_arrival) {
                Some(&next) => {
                    clock = procs[next].arrival_time;
                    continue;
                }
                None => break,
            }
        };

        let slice = quantum.min(remaining[idx]);
        timeline.run(idx, clock, clock + slice);
        clock += slice;
        remaining[idx] -= slice;

        if remaining[idx] > 0 {
            ready.push_back(idx);
        }
    }

    timeline.finish()
}

/// Shortest Remaining Time First (preemptive), simulated in unit ticks.
///
/// Consecutive ticks of the same process merge into one slot. When nothing
/// is ready the clock jumps to the earliest pending arrival, whatever the
/// input order.
pub fn srtf(processes: &[Process]) -> CpuScheduleResult {
    let procs = normalize(processes);
    let mut remaining: Vec<i64> = procs.iter().map(|p| p.burst_time).collect();
    let mut timeline = Timeline::new(CpuAlgorithm::Srtf, &procs);
    let mut clock: i64 = 0;

    loop {
        let ready = (0..procs.len())
            .filter(|&i| remaining[i] > 0 && procs[i].arrival_time <= clock);
        let choice = rules::select(&ShortestRemaining, ready, &procs, &remaining);

        match choice {
            Some(idx) => {
                timeline.run_merged(idx, clock, clock + 1);
                remaining[idx] -= 1;
                clock += 1;
            }
            None => {
                let next = (0..procs.len())
                    .filter(|&i| remaining[i] > 0)
                    .map(|i| procs[i].arrival_time)
                    .min();
                match next {
                    Some(arrival) => clock = arrival,
                    None => break,
                }
            }
        }
    }

    timeline.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> Vec<Process> {
        vec![
            Process::new("P1", 0, 8),
            Process::new("P2", 1, 4),
            Process::new("P3", 2, 2),
        ]
    }

    fn slots(result: &CpuScheduleResult) -> Vec<(&str, i64, i64)> {
        result
            .schedule
            .iter()
            .map(|s| (s.process_id.as_str(), s.start_time, s.end_time))
            .collect()
    }

    #[test]
    fn test_fcfs_textbook() {
        let result = fcfs(&textbook());
        assert_eq!(
            slots(&result),
            vec![("P1", 0, 8), ("P2", 8, 12), ("P3", 12, 14)]
        );
        assert!((result.metrics.avg_waiting_time - 17.0 / 3.0).abs() < 1e-10);
        assert!((result.metrics.avg_turnaround_time - 31.0 / 3.0).abs() < 1e-10);
        assert!((result.metrics.cpu_utilization - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_fcfs_sorts_by_arrival_stably() {
        let procs = vec![
            Process::new("late", 5, 1),
            Process::new("A", 0, 2),
            Process::new("B", 0, 2),
        ];
        let result = fcfs(&procs);
        assert_eq!(
            slots(&result),
            vec![("A", 0, 2), ("B", 2, 4), ("late", 5, 6)]
        );
    }

    #[test]
    fn test_sjf_textbook() {
        let result = sjf(&textbook());
        // P1 is alone at t=0; then P3 (2) beats P2 (4).
        assert_eq!(
            slots(&result),
            vec![("P1", 0, 8), ("P3", 8, 10), ("P2", 10, 14)]
        );
        assert_eq!(result.metrics.waiting_times["P3"], 6);
        assert_eq!(result.metrics.waiting_times["P2"], 9);
    }

    #[test]
    fn test_sjf_tie_prefers_earlier_arrival() {
        let procs = vec![
            Process::new("X", 0, 1),
            Process::new("B", 1, 3),
            Process::new("A", 0, 3),
        ];
        // At t=1 both A and B have burst 3; A arrived earlier.
        let result = sjf(&procs);
        assert_eq!(
            slots(&result),
            vec![("X", 0, 1), ("A", 1, 4), ("B", 4, 7)]
        );
    }

    #[test]
    fn test_sjf_idle_jump() {
        let procs = vec![Process::new("P1", 3, 2), Process::new("P2", 10, 1)];
        let result = sjf(&procs);
        assert_eq!(slots(&result), vec![("P1", 3, 5), ("P2", 10, 11)]);
        assert!((result.metrics.cpu_utilization - 300.0 / 11.0).abs() < 1e-10);
    }

    #[test]
    fn test_priority_order() {
        let procs = vec![
            Process::new("P1", 0, 3).with_priority(2),
            Process::new("P2", 0, 3),
            Process::new("P3", 0, 3).with_priority(1),
        ];
        let result = priority(&procs);
        assert_eq!(
            slots(&result),
            vec![("P3", 0, 3), ("P1", 3, 6), ("P2", 6, 9)]
        );
    }

    #[test]
    fn test_priority_is_non_preemptive() {
        let procs = vec![
            Process::new("low", 0, 5).with_priority(9),
            Process::new("high", 1, 1).with_priority(0),
        ];
        let result = priority(&procs);
        assert_eq!(slots(&result), vec![("low", 0, 5), ("high", 5, 6)]);
    }

    #[test]
    fn test_round_robin_preempted_rejoins_before_new_arrivals() {
        let result = round_robin(&textbook(), 4);
        assert_eq!(
            slots(&result),
            vec![("P1", 0, 4), ("P1", 4, 8), ("P2", 8, 12), ("P3", 12, 14)]
        );
        assert_eq!(result.metrics.waiting_times["P1"], 0);
        assert_eq!(result.metrics.waiting_times["P2"], 7);
        assert_eq!(result.metrics.waiting_times["P3"], 10);
    }

    #[test]
    fn test_round_robin_small_quantum() {
        let result = round_robin(&textbook(), 2);
        assert_eq!(
            slots(&result),
            vec![
                ("P1", 0, 2),
                ("P1", 2, 4),
                ("P2", 4, 6),
                ("P3", 6, 8),
                ("P1", 8, 10),
                ("P2", 10, 12),
                ("P1", 12, 14),
            ]
        );
        assert_eq!(result.metrics.turnaround_times["P3"], 6);
        assert_eq!(result.metrics.response_times["P2"], 3);
    }

    #[test]
    fn test_round_robin_zero_quantum_clamped() {
        let result = round_robin(&[Process::new("P1", 0, 2)], 0);
        assert_eq!(slots(&result), vec![("P1", 0, 1), ("P1", 1, 2)]);
    }

    #[test]
    fn test_round_robin_idle_gap() {
        let procs = vec![Process::new("P1", 0, 1), Process::new("P2", 5, 1)];
        let result = round_robin(&procs, 4);
        assert_eq!(slots(&result), vec![("P1", 0, 1), ("P2", 5, 6)]);
    }

    #[test]
    fn test_srtf_textbook() {
        let result = srtf(&textbook());
        assert_eq!(
            slots(&result),
            vec![("P1", 0, 1), ("P2", 1, 2), ("P3", 2, 4), ("P2", 4, 7), ("P1", 7, 14)]
        );
        assert_eq!(result.metrics.waiting_times["P1"], 6);
        assert_eq!(result.metrics.waiting_times["P2"], 2);
        assert_eq!(result.metrics.waiting_times["P3"], 0);
    }

    #[test]
    fn test_srtf_tie_prefers_input_order() {
        let procs = vec![Process::new("B", 0, 2), Process::new("A", 0, 2)];
        let result = srtf(&procs);
        assert_eq!(slots(&result), vec![("B", 0, 2), ("A", 2, 4)]);
    }

    #[test]
    fn test_srtf_idle_jumps_to_earliest_arrival() {
        let procs = vec![Process::new("late", 10, 1), Process::new("early", 5, 1)];
        let result = srtf(&procs);
        assert_eq!(slots(&result), vec![("early", 5, 6), ("late", 10, 11)]);
    }

    #[test]
    fn test_empty_input_all_zero() {
        for algorithm in CpuAlgorithm::ALL {
            let result = algorithm.run(&[], 4);
            assert!(result.schedule.is_empty());
            assert!(result.metrics.waiting_times.is_empty());
            assert!((result.metrics.avg_waiting_time - 0.0).abs() < 1e-10);
            assert!((result.metrics.cpu_utilization - 0.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_invalid_values_normalized() {
        let procs = vec![Process::new("P1", -4, 0)];
        let result = fcfs(&procs);
        assert_eq!(slots(&result), vec![("P1", 0, 1)]);
        assert_eq!(result.metrics.waiting_times["P1"], 0);
    }

    #[test]
    fn test_every_algorithm_serves_full_burst() {
        let procs = vec![
            Process::new("P1", 0, 7).with_priority(3),
            Process::new("P2", 2, 4).with_priority(1),
            Process::new("P3", 4, 1),
            Process::new("P4", 5, 4).with_priority(2),
            Process::new("P5", 20, 3),
        ];
        for algorithm in CpuAlgorithm::ALL {
            let result = algorithm.run(&procs, 3);
            for p in &procs {
                let served: i64 = result
                    .schedule
                    .iter()
                    .filter(|s| s.process_id == p.id)
                    .map(ScheduleSlot::duration)
                    .sum();
                assert_eq!(served, p.burst_time, "{algorithm} {}", p.id);
                let first = result.schedule.iter().find(|s| s.process_id == p.id).unwrap();
                assert!(first.start_time >= p.arrival_time, "{algorithm} {}", p.id);
            }
            assert!(result
                .schedule
                .windows(2)
                .all(|w| w[0].end_time <= w[1].start_time));
            assert_eq!(result, algorithm.run(&procs, 3));
        }
    }
}
