//! Deterministic simulation of classical OS resource scheduling.
//!
//! Computes the exact decision sequence and performance metrics of textbook
//! scheduling algorithms for a given workload. Every simulation is a pure
//! function of its input: no state survives between calls, and the same
//! input always yields the same result.
//!
//! # Modules
//!
//! - **`models`**: Workload and trace types: `Process`, `DiskRequestSet`,
//!   `MemoryWorkload`, `MemoryBlock`, `ScheduleSlot`
//! - **`disk`**: FCFS, SSTF, SCAN, C-SCAN, LOOK, C-LOOK over track requests
//! - **`cpu`**: FCFS, SJF, Priority, Round Robin, SRTF over processes
//! - **`memory`**: First/Best/Worst Fit, Buddy, Paging over one region
//! - **`compare`**: Run every algorithm of a family and rank the results
//! - **`config`**: Time quantum, page size, fragmentation accounting
//! - **`validation`**: Advisory input checks (simulations only clamp)
//!
//! # Example
//!
//! ```
//! use os_sched_sim::disk::DiskAlgorithm;
//! use os_sched_sim::models::DiskRequestSet;
//!
//! let workload = DiskRequestSet::new(vec![10, 20, 30, 40, 50, 60], 0);
//! let result = DiskAlgorithm::Fcfs.run(&workload);
//! assert_eq!(result.sequence, vec![0, 10, 20, 30, 40, 50, 60]);
//! assert_eq!(result.total_seek_time, 60);
//! ```
//!
//! # Logging
//!
//! Emits through the `log` facade; install any logger to see per-run
//! summaries (`debug`), per-decision traces (`trace`) and input clamping or
//! allocation failures (`warn`).
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts"
//! - Tanenbaum & Bos (2014), "Modern Operating Systems"

pub mod compare;
pub mod config;
pub mod cpu;
pub mod disk;
pub mod error;
pub mod memory;
pub mod models;
pub mod validation;

pub use config::SimulationConfig;
pub use error::{ConfigError, ParseAlgorithmError};
