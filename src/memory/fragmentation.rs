//! Fragmentation and utilization accounting.
//!
//! Evaluated once, after every request has been processed.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | External | sum of free block sizes |
//! | Internal | reserved but unrequested space (see [`FragmentationAccounting`]) |
//! | Utilization | 100 * reserved by satisfied requests / total |

use crate::config::FragmentationAccounting;
use crate::models::MemoryBlock;

use super::AllocationRecord;

/// Sum of free block sizes.
pub(crate) fn external(blocks: &[MemoryBlock]) -> i64 {
    blocks.iter().filter(|b| b.is_free()).map(|b| b.size).sum()
}

/// Internal fragmentation under the given accounting mode.
///
/// Blocks whose owner has no allocation record (partially paged requests)
/// contribute nothing.
pub(crate) fn internal(
    blocks: &[MemoryBlock],
    records: &[AllocationRecord],
    accounting: FragmentationAccounting,
) -> i64 {
    match accounting {
        FragmentationAccounting::PerOwner => records.iter().map(|r| r.size - r.requested).sum(),
        FragmentationAccounting::PerBlock => blocks
            .iter()
            .filter_map(|b| {
                let owner = b.owner.as_deref()?;
                let record = records.iter().find(|r| r.process_id == owner)?;
                Some(b.size - record.size)
            })
            .sum(),
    }
}

/// Percentage of the region reserved by satisfied requests.
pub(crate) fn utilization(records: &[AllocationRecord], total_memory: i64) -> f64 {
    if total_memory <= 0 {
        return 0.0;
    }
    let reserved: i64 = records.iter().map(|r| r.size).sum();
    reserved as f64 / total_memory as f64 * 100.0
}
