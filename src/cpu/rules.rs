//! Ready-queue selection rules.
//!
//! # Score Convention
//! **Lower score = selected first.** Ties go to the candidate offered first,
//! so callers control tie-breaking through candidate order.
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.3

use std::fmt::Debug;

use crate::models::Process;

/// Score returned by a selection rule.
pub type RuleScore = i64;

/// Picks the next process from a set of ready candidates.
pub trait SelectionRule: Debug {
    /// Rule name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Scores a ready process. `remaining` is its unserved burst.
    fn evaluate(&self, process: &Process, remaining: i64) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Shortest total burst first.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl SelectionRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &Process, _remaining: i64) -> RuleScore {
        process.burst_time
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Most urgent priority first (lowest value). Unset priority is least urgent.
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl SelectionRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process, _remaining: i64) -> RuleScore {
        process.effective_priority()
    }

    fn description(&self) -> &'static str {
        "Highest Priority First"
    }
}

/// Shortest remaining burst first.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, _process: &Process, remaining: i64) -> RuleScore {
        remaining
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Returns the candidate index with the lowest score, keeping the first on
/// ties.
pub(crate) fn select(
    rule: &dyn SelectionRule,
    candidates: impl IntoIterator<Item = usize>,
    processes: &[Process],
    remaining: &[i64],
) -> Option<usize> {
    let mut best: Option<(usize, RuleScore)> = None;
    for idx in candidates {
        let score = rule.evaluate(&processes[idx], remaining[idx]);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}
