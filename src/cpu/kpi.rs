//! CPU schedule metrics.
//!
//! Derived entirely from the finished schedule and the input processes.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first dispatch - arrival |
//! | CPU Utilization | 100 * total burst / makespan |
//!
//! A process's completion time is the end of its last slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Process, ScheduleSlot};

/// Aggregate CPU scheduling metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuMetrics {
    /// Waiting time per process id.
    pub waiting_times: BTreeMap<String, i64>,
    /// Turnaround time per process id.
    pub turnaround_times: BTreeMap<String, i64>,
    /// Response time per process id.
    pub response_times: BTreeMap<String, i64>,
    /// Mean waiting time over all input processes.
    pub avg_waiting_time: f64,
    /// Mean turnaround time over all input processes.
    pub avg_turnaround_time: f64,
    /// Busy share of the makespan, in percent.
    pub cpu_utilization: f64,
    /// End of the last slot.
    pub makespan: i64,
}

impl CpuMetrics {
    /// Computes metrics from a schedule and its (normalized) processes.
    pub fn calculate(schedule: &[ScheduleSlot], processes: &[Process]) -> Self {
        let mut metrics = Self {
            makespan: schedule.last().map(|s| s.end_time).unwrap_or(0),
            ..Self::default()
        };
        if processes.is_empty() {
            return metrics;
        }

        let mut total_waiting: i64 = 0;
        let mut total_turnaround: i64 = 0;

        for process in processes {
            let mut slots = schedule.iter().filter(|s| s.process_id == process.id);
            let Some(first) = slots.next() else {
                continue;
            };
            let completion = slots.last().unwrap_or(first).end_time;

            let turnaround = completion - process.arrival_time;
            let waiting = turnaround - process.burst_time;
            total_turnaround += turnaround;
            total_waiting += waiting;

            metrics.turnaround_times.insert(process.id.clone(), turnaround);
            metrics.waiting_times.insert(process.id.clone(), waiting);
            metrics
                .response_times
                .insert(process.id.clone(), first.start_time - process.arrival_time);
        }

        let count = processes.len() as f64;
        metrics.avg_waiting_time = total_waiting as f64 / count;
        metrics.avg_turnaround_time = total_turnaround as f64 / count;

        let total_burst: i64 = processes.iter().map(|p| p.burst_time).sum();
        if metrics.makespan > 0 {
            metrics.cpu_utilization = total_burst as f64 / metrics.makespan as f64 * 100.0;
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_basic() {
        let processes = vec![Process::new("P1", 0, 4), Process::new("P2", 1, 2)];
        let schedule = vec![ScheduleSlot::new("P1", 0, 4), ScheduleSlot::new("P2", 4, 6)];

        let m = CpuMetrics::calculate(&schedule, &processes);
        assert_eq!(m.waiting_times["P1"], 0);
        assert_eq!(m.waiting_times["P2"], 3);
        assert_eq!(m.turnaround_times["P2"], 5);
        assert_eq!(m.makespan, 6);
        assert!((m.avg_waiting_time - 1.5).abs() < 1e-10);
        assert!((m.avg_turnaround_time - 4.5).abs() < 1e-10);
        assert!((m.cpu_utilization - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_preempted_process() {
        let processes = vec![Process::new("P1", 0, 3), Process::new("P2", 1, 1)];
        let schedule = vec![
            ScheduleSlot::new("P1", 0, 1),
            ScheduleSlot::new("P2", 1, 2),
            ScheduleSlot::new("P1", 2, 4),
        ];

        let m = CpuMetrics::calculate(&schedule, &processes);
        assert_eq!(m.turnaround_times["P1"], 4);
        assert_eq!(m.waiting_times["P1"], 1);
        assert_eq!(m.response_times["P1"], 0);
        assert_eq!(m.response_times["P2"], 0);
    }

    #[test]
    fn test_metrics_idle_gap_lowers_utilization() {
        let processes = vec![Process::new("P1", 0, 2), Process::new("P2", 6, 2)];
        let schedule = vec![ScheduleSlot::new("P1", 0, 2), ScheduleSlot::new("P2", 6, 8)];

        let m = CpuMetrics::calculate(&schedule, &processes);
        assert!((m.cpu_utilization - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_empty() {
        let m = CpuMetrics::calculate(&[], &[]);
        assert_eq!(m, CpuMetrics::default());
    }
}
