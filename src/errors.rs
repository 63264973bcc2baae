// ABOUTME: Error types for structural pipeline failures
// ABOUTME: Only preconditions raise; numeric and reference problems are surfaced as data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Pipeline Error Types
//!
//! The pipeline distinguishes three kinds of irregularity and only the first
//! one is an error in the Rust sense:
//!
//! - **Structural precondition failure** — raised as [`PlanError`]. There is
//!   no reasonable output to produce (e.g. a fallback plan from an empty
//!   exercise catalog).
//! - **Unresolvable reference** — recorded in resolution metadata and the
//!   pipeline continues; a partially-resolved plan is still useful.
//! - **Numeric constraint violation** — returned as a
//!   [`ValidationIssue`](crate::models::ValidationIssue), never raised;
//!   validation failure is the expected input to the retry loop.

use thiserror::Error;

/// Result alias for pipeline operations that can fail structurally
pub type PlanResult<T> = Result<T, PlanError>;

/// Structural failures that leave the pipeline with nothing to build on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The exercise catalog supplied for fallback plan assembly has no entries
    #[error("exercise catalog is empty; cannot assemble a fallback plan")]
    EmptyExerciseCatalog,
}

impl PlanError {
    /// Stable machine-readable code for logging and client dispatch
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyExerciseCatalog => "EXERCISE_CATALOG_EMPTY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_is_stable() {
        assert_eq!(PlanError::EmptyExerciseCatalog.code(), "EXERCISE_CATALOG_EMPTY");
    }
}
