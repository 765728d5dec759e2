//! Caller-contract violations.
//!
//! Domain outcomes ("no block fits", "tenant not found") are never errors;
//! they travel in the engines' return values. The variants here describe
//! input that a correct caller must not produce. Engines check for them up
//! front and refuse to build a trace from such input.

use crate::models::Cylinder;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    /// A process id is empty or whitespace only.
    EmptyProcessId,
    /// Two processes share the same id.
    DuplicateProcessId(String),
    /// A process needs zero CPU time.
    ZeroBurst(String),
    /// Round robin with a zero time quantum.
    ZeroQuantum,
    /// Initial head position lies past the last cylinder.
    HeadOutOfRange { head: Cylinder, max: Cylinder },
    /// A request targets a cylinder past the last cylinder.
    CylinderOutOfRange {
        request: u64,
        cylinder: Cylinder,
        max: Cylinder,
    },
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::EmptyProcessId => write!(f, "invariant violated: empty process id"),
            WorkloadError::DuplicateProcessId(id) => {
                write!(f, "invariant violated: duplicate process id '{id}'")
            }
            WorkloadError::ZeroBurst(id) => {
                write!(f, "invariant violated: process '{id}' has zero burst time")
            }
            WorkloadError::ZeroQuantum => {
                write!(f, "invariant violated: round-robin quantum must be positive")
            }
            WorkloadError::HeadOutOfRange { head, max } => write!(
                f,
                "invariant violated: head position {head} outside 0..={max}"
            ),
            WorkloadError::CylinderOutOfRange {
                request,
                cylinder,
                max,
            } => write!(
                f,
                "invariant violated: request {request} targets cylinder {cylinder} outside 0..={max}"
            ),
        }
    }
}

impl Error for WorkloadError {}

