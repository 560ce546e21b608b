//! Input validation for simulation requests.
//!
//! Checks a process set and its policy parameters before any simulation
//! work begins. Detects:
//! - Empty input
//! - Duplicate or reserved process names
//! - Negative arrival times
//! - Non-positive burst times
//! - A non-positive quantum for Round Robin
//! - A run whose end time would not fit in an `i64` tick
//!
//! All problems are collected, so a caller can report them in one pass.

use std::collections::HashSet;

use crate::dispatching::PolicyKind;
use crate::models::{Process, IDLE};

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
    /// No processes were supplied.
    EmptyInput,
    /// Two processes share the same name.
    DuplicateName,
    /// A process uses the name reserved for idle segments.
    ReservedName,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process needs no CPU time (or a negative amount).
    NonPositiveBurst,
    /// Round Robin quantum is zero or negative.
    InvalidQuantum,
    /// The latest arrival plus the total burst exceeds the tick range.
    TimeOverflow,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a process set for the given policy.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate names, and none named `"Idle"`
/// 3. `arrival_time >= 0`
/// 4. `burst_time > 0`
/// 5. `quantum > 0` when the policy is Round Robin (ignored otherwise)
/// 6. The latest arrival plus the sum of all bursts fits in an `i64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[Process], policy: PolicyKind, quantum: i64) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "At least one process is required",
        ));
    }

    let mut names = HashSet::new();
    for p in processes {
        if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate process name: {}", p.name),
            ));
        }

        if p.name == IDLE {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedName,
                format!("Process name '{IDLE}' is reserved for idle segments"),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process '{}' has negative arrival time {}", p.name, p.arrival_time),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process '{}' has non-positive burst time {}", p.name, p.burst_time),
            ));
        }
    }

    if policy.requires_quantum() && quantum <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Round Robin quantum must be positive, got {quantum}"),
        ));
    }

    if run_horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            "Latest arrival plus total burst time overflows the tick range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Upper bound on the last completion tick: the latest arrival plus every
/// burst. `None` if that does not fit in an `i64`.
///
/// Out-of-range values are reported by the other checks, so they count as 0.
fn run_horizon(processes: &[Process]) -> Option<i64> {
    let latest_arrival = processes.iter().map(|p| p.arrival_time.max(0)).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst_time.max(0)))
}

/// Coerces a raw numeric text field the way a form input does.
///
/// Leading zeros are stripped (`"007"` → 7). Text that does not parse as a
/// number, or parses to a negative one, becomes 0. Fractional input is
/// truncated toward zero.
pub fn coerce_field(raw: &str) -> i64 {
    parse_signed(raw).max(0)
}

/// Coerces a raw priority field. Same parsing as [`coerce_field`], except a
/// leading minus is kept (`"-2"` → -2). Out-of-range values saturate.
pub fn coerce_priority(raw: &str) -> i32 {
    parse_signed(raw).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Lenient signed parse: optional `-`, leading zeros, fractional truncation.
/// Anything else is 0.
fn parse_signed(raw: &str) -> i64 {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = unsigned.trim_start_matches('0');
    let candidate = if digits.is_empty() { "0" } else { digits };

    let magnitude = candidate
        .parse::<i64>()
        .ok()
        .or_else(|| {
            candidate
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        })
        // "--3" and friends
        .filter(|&v| v >= 0)
        .unwrap_or(0);

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
