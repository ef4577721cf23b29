//! Simulation configuration.
//!
//! Holds the knobs a caller may omit from a workload: the Round Robin time
//! quantum, the Paging page size, and how internal fragmentation is
//! attributed. Defaults match the values the input forms start with.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default Round Robin time quantum.
pub const DEFAULT_TIME_QUANTUM: i64 = 4;

/// Default Paging page (frame) size.
pub const DEFAULT_PAGE_SIZE: i64 = 16;

/// How internal fragmentation is attributed to allocated blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentationAccounting {
    /// Once per successful allocation: `reserved - requested`.
    #[default]
    PerOwner,
    /// Once per allocated block: `block.size - reserved` of the first
    /// allocation record carrying the block's owner id.
    ///
    /// Zero for single-block allocations, since the block is the
    /// reservation. Negative when one owner spans several blocks, as Paging
    /// does. Kept for output compatibility.
    PerBlock,
}

/// Simulation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Round Robin time quantum.
    pub time_quantum: i64,
    /// Paging page size.
    pub page_size: i64,
    /// Internal fragmentation attribution.
    pub fragmentation_accounting: FragmentationAccounting,
}

impl SimulationConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            time_quantum: DEFAULT_TIME_QUANTUM,
            page_size: DEFAULT_PAGE_SIZE,
            fragmentation_accounting: FragmentationAccounting::PerOwner,
        }
    }

    /// Sets the Round Robin time quantum.
    pub fn with_time_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = quantum;
        self
    }

    /// Sets the Paging page size.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the fragmentation accounting mode.
    pub fn with_fragmentation_accounting(mut self, accounting: FragmentationAccounting) -> Self {
        self.fragmentation_accounting = accounting;
        self
    }

    /// Time quantum clamped to at least 1.
    pub fn effective_time_quantum(&self) -> i64 {
        self.time_quantum.max(1)
    }

    /// Page size, falling back to [`DEFAULT_PAGE_SIZE`] when not positive.
    pub fn effective_page_size(&self) -> i64 {
        if self.page_size >= 1 {
            self.page_size
        } else {
            DEFAULT_PAGE_SIZE
        }
    }

    /// Strict check for callers that prefer rejecting over clamping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_quantum < 1 {
            return Err(ConfigError::InvalidTimeQuantum(self.time_quantum));
        }
        if self.page_size < 1 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.time_quantum, 4);
        assert_eq!(config.page_size, 16);
        assert_eq!(
            config.fragmentation_accounting,
            FragmentationAccounting::PerOwner
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_effective_values_clamp() {
        let config = SimulationConfig::new()
            .with_time_quantum(0)
            .with_page_size(-8);
        assert_eq!(config.effective_time_quantum(), 1);
        assert_eq!(config.effective_page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTimeQuantum(0))
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"pageSize": 32, "fragmentationAccounting": "perBlock"}"#)
                .unwrap();
        assert_eq!(config.page_size, 32);
        assert_eq!(config.time_quantum, DEFAULT_TIME_QUANTUM);
        assert_eq!(
            config.fragmentation_accounting,
            FragmentationAccounting::PerBlock
        );
    }

    #[test]
    fn test_validate_page_size() {
        let config = SimulationConfig::new().with_page_size(0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidPageSize(0)));
    }
}
