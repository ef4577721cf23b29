//! Advisory input validation for workloads.
//!
//! Simulations never reject input; they clamp it. These checks let a
//! workload producer surface the issues that clamping would paper over.
//! Detects:
//! - Duplicate process IDs
//! - Negative arrival times, non-positive bursts and sizes
//! - Track requests or head positions outside the disk
//! - Non-positive memory region or page size

use std::collections::HashSet;

use crate::models::{DiskRequestSet, MemoryWorkload, Process, DISK_SIZE};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes or requests share the same ID.
    DuplicateId,
    /// A time, burst, size or position is outside its valid range.
    OutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn out_of_range(message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::OutOfRange, message)
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a CPU workload.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. Arrival times are non-negative
/// 3. Burst times are at least 1
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
        if p.arrival_time < 0 {
            errors.push(ValidationError::out_of_range(format!(
                "Process '{}' has negative arrival time {}",
                p.id, p.arrival_time
            )));
        }
        if p.burst_time < 1 {
            errors.push(ValidationError::out_of_range(format!(
                "Process '{}' has burst time {} (minimum 1)",
                p.id, p.burst_time
            )));
        }
    }

    finish(errors)
}

/// Validates a disk workload against the `[0, DISK_SIZE)` track range.
pub fn validate_disk_requests(workload: &DiskRequestSet) -> ValidationResult {
    let mut errors = Vec::new();
    let in_range = |track: i64| (0..DISK_SIZE).contains(&track);

    if !in_range(workload.head_position) {
        errors.push(ValidationError::out_of_range(format!(
            "Head position {} is outside 0..{}",
            workload.head_position, DISK_SIZE
        )));
    }
    for (i, &track) in workload.requests.iter().enumerate() {
        if !in_range(track) {
            errors.push(ValidationError::out_of_range(format!(
                "Request #{i} for track {track} is outside 0..{DISK_SIZE}"
            )));
        }
    }

    finish(errors)
}

/// Validates a memory workload.
///
/// Checks:
/// 1. Total memory is positive
/// 2. Page size, when given, is positive
/// 3. No duplicate process IDs among requests
/// 4. Request sizes are positive
pub fn validate_memory_workload(workload: &MemoryWorkload) -> ValidationResult {
    let mut errors = Vec::new();

    if workload.total_memory <= 0 {
        errors.push(ValidationError::out_of_range(format!(
            "Total memory must be positive, got {}",
            workload.total_memory
        )));
    }
    if let Some(page_size) = workload.page_size.filter(|&s| s <= 0) {
        errors.push(ValidationError::out_of_range(format!(
            "Page size must be positive, got {page_size}"
        )));
    }

    let mut ids = HashSet::new();
    for r in &workload.requests {
        if !ids.insert(r.process_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate request process ID: {}", r.process_id),
            ));
        }
        if r.size <= 0 {
            errors.push(ValidationError::out_of_range(format!(
                "Request '{}' has non-positive size {}",
                r.process_id, r.size
            )));
        }
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MemoryRequest;

    #[test]
    fn test_valid_processes() {
        let processes = vec![Process::new("P1", 0, 5), Process::new("P2", 3, 1)];
        assert!(validate_processes(&processes).is_ok());
    }

    #[test]
    fn test_duplicate_process_id() {
        let processes = vec![Process::new("P1", 0, 5), Process::new("P1", 1, 2)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("P1"));
    }

    #[test]
    fn test_process_ranges_all_reported() {
        let processes = vec![Process::new("P1", -1, 0)];
        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::OutOfRange));
    }

    #[test]
    fn test_disk_out_of_range() {
        assert!(validate_disk_requests(&DiskRequestSet::new(vec![0, 199], 53)).is_ok());

        let errors = validate_disk_requests(&DiskRequestSet::new(vec![200, -1, 50], 250)).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[1].message.contains("track 200"));
    }

    #[test]
    fn test_memory_workload() {
        let ok = MemoryWorkload::new(100, vec![MemoryRequest::new("P1", 10)]).with_page_size(16);
        assert!(validate_memory_workload(&ok).is_ok());

        let bad = MemoryWorkload::new(
            0,
            vec![MemoryRequest::new("P1", 10), MemoryRequest::new("P1", 0)],
        )
        .with_page_size(0);
        let errors = validate_memory_workload(&bad).unwrap_err();
        let kinds: Vec<&ValidationErrorKind> = errors.iter().map(|e| &e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &ValidationErrorKind::OutOfRange,
                &ValidationErrorKind::OutOfRange,
                &ValidationErrorKind::DuplicateId,
                &ValidationErrorKind::OutOfRange,
            ]
        );
    }

    #[test]
    fn test_empty_workloads_are_valid() {
        assert!(validate_processes(&[]).is_ok());
        assert!(validate_disk_requests(&DiskRequestSet::default()).is_ok());
    }
}
