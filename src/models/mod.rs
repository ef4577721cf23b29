//! Workload and result building blocks.
//!
//! Plain data types shared by the three simulation families. Workloads arrive
//! already typed from the input layer; every simulation call builds its own
//! state from them and discards it afterwards.
//!
//! # Family Mappings
//!
//! | Family | Workload | Trace unit |
//! |--------|----------|------------|
//! | Disk | `DiskRequestSet` | visited track |
//! | CPU | `Process` list | `ScheduleSlot` |
//! | Memory | `MemoryWorkload` | `MemoryBlock` |

mod disk;
mod memory;
mod process;
mod slot;

pub use disk::{DiskRequestSet, DISK_SIZE};
pub use memory::{MemoryBlock, MemoryRequest, MemoryWorkload};
pub use process::{Process, LOWEST_PRIORITY};
pub use slot::ScheduleSlot;
