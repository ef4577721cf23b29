//! Side-by-side comparison of every algorithm in a family.
//!
//! Runs all variants on the same input and ranks them by the family's
//! headline metric:
//!
//! | Family | Primary (lower wins) | Tie-breaker (lower wins) |
//! |--------|----------------------|--------------------------|
//! | Disk | total seek time | - |
//! | CPU | average waiting time | average turnaround time |
//! | Memory | external fragmentation | negated utilization |
//!
//! Ranks use competition numbering: equal keys share a rank and the next
//! rank skips accordingly. Every entry ranked 1 is flagged best.

use std::cmp::Ordering;

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::cpu::{CpuAlgorithm, CpuScheduleResult};
use crate::disk::{DiskAlgorithm, DiskScheduleResult};
use crate::memory::{MemoryAlgorithm, MemoryAllocationResult};
use crate::models::{DiskRequestSet, MemoryWorkload, Process};

const EPSILON: f64 = 1e-9;

/// A simulation result that can be ranked against its siblings.
///
/// # Score Convention
/// **Lower score = better.**
pub trait Ranked {
    /// Display label of the algorithm that produced the result.
    fn label(&self) -> &'static str;

    /// Primary ranking score.
    fn score(&self) -> f64;

    /// Secondary score, consulted only when primary scores tie.
    fn tie_score(&self) -> f64 {
        0.0
    }
}

impl Ranked for DiskScheduleResult {
    fn label(&self) -> &'static str {
        self.algorithm.name()
    }

    fn score(&self) -> f64 {
        self.total_seek_time as f64
    }
}

impl Ranked for CpuScheduleResult {
    fn label(&self) -> &'static str {
        self.algorithm.name()
    }

    fn score(&self) -> f64 {
        self.metrics.avg_waiting_time
    }

    fn tie_score(&self) -> f64 {
        self.metrics.avg_turnaround_time
    }
}

impl Ranked for MemoryAllocationResult {
    fn label(&self) -> &'static str {
        self.algorithm.name()
    }

    fn score(&self) -> f64 {
        self.external_fragmentation as f64
    }

    fn tie_score(&self) -> f64 {
        -self.memory_utilization
    }
}

/// Whether smaller or larger metric values are preferable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Goal {
    Minimize,
    Maximize,
}

/// One algorithm's result with its standing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry<R> {
    /// 1-based competition rank.
    pub rank: usize,
    /// Whether the entry shares the top rank.
    pub is_best: bool,
    /// `100 * (worst - score) / (worst - best)` on the primary score;
    /// 0 when every entry scores the same.
    pub relative_performance: f64,
    /// The simulation result.
    pub result: R,
}

/// Ranked results for one family, kept in the family's display order.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison<R> {
    pub entries: Vec<RankedEntry<R>>,
}

fn compare_keys<R: Ranked>(a: &R, b: &R) -> Ordering {
    for (x, y) in [(a.score(), b.score()), (a.tie_score(), b.tie_score())] {
        if (x - y).abs() > EPSILON {
            return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
        }
    }
    Ordering::Equal
}

impl<R: Ranked> Comparison<R> {
    /// Ranks `results`, preserving their order.
    pub fn from_results(results: Vec<R>) -> Self {
        let scores: Vec<f64> = results.iter().map(Ranked::score).collect();
        let best = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let worst = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let spread = worst - best;

        let ranks: Vec<usize> = results
            .iter()
            .map(|r| {
                1 + results
                    .iter()
                    .filter(|other| compare_keys(*other, r) == Ordering::Less)
                    .count()
            })
            .collect();

        let entries = results
            .into_iter()
            .zip(ranks)
            .zip(scores)
            .map(|((result, rank), score)| RankedEntry {
                rank,
                is_best: rank == 1,
                relative_performance: if spread > EPSILON {
                    (worst - score) / spread * 100.0
                } else {
                    0.0
                },
                result,
            })
            .collect();

        Self { entries }
    }

    /// Entries sharing the top rank.
    pub fn best(&self) -> impl Iterator<Item = &RankedEntry<R>> {
        self.entries.iter().filter(|e| e.is_best)
    }

    /// Entries ordered by rank; ties keep display order.
    pub fn ranked(&self) -> Vec<&RankedEntry<R>> {
        let mut sorted: Vec<&RankedEntry<R>> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.rank);
        sorted
    }

    /// Entries that attain the optimum of an arbitrary `metric`.
    ///
    /// Used for secondary highlights such as best turnaround or best
    /// utilization.
    pub fn best_by(&self, metric: impl Fn(&R) -> f64, goal: Goal) -> Vec<&RankedEntry<R>> {
        let values: Vec<f64> = self.entries.iter().map(|e| metric(&e.result)).collect();
        let target = match goal {
            Goal::Minimize => values.iter().copied().fold(f64::INFINITY, f64::min),
            Goal::Maximize => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        };
        self.entries
            .iter()
            .zip(values)
            .filter(|(_, v)| (v - target).abs() <= EPSILON)
            .map(|(e, _)| e)
            .collect()
    }

    /// Labels of the entries flagged best.
    pub fn best_labels(&self) -> Vec<&'static str> {
        self.best().map(|e| e.result.label()).collect()
    }
}

/// Runs every disk algorithm on `workload`.
pub fn compare_disk(workload: &DiskRequestSet) -> Comparison<DiskScheduleResult> {
    let comparison = Comparison::from_results(
        DiskAlgorithm::ALL
            .iter()
            .map(|a| a.run(workload))
            .collect(),
    );
    log::debug!("disk comparison: best {:?}", comparison.best_labels());
    comparison
}

/// Runs every CPU algorithm on `processes`. Round Robin uses
/// `config.time_quantum`.
pub fn compare_cpu(processes: &[Process], config: &SimulationConfig) -> Comparison<CpuScheduleResult> {
    let quantum = config.effective_time_quantum();
    let comparison = Comparison::from_results(
        CpuAlgorithm::ALL
            .iter()
            .map(|a| a.run(processes, quantum))
            .collect(),
    );
    log::debug!("cpu comparison: best {:?}", comparison.best_labels());
    comparison
}

/// Runs every memory algorithm on `workload`.
pub fn compare_memory(
    workload: &MemoryWorkload,
    config: &SimulationConfig,
) -> Comparison<MemoryAllocationResult> {
    let comparison = Comparison::from_results(
        MemoryAlgorithm::ALL
            .iter()
            .map(|a| a.run(workload, config))
            .collect(),
    );
    log::debug!("memory comparison: best {:?}", comparison.best_labels());
    comparison
}
