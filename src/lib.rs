// ABOUTME: Library entry point for the Vitaplan plan pipeline
// ABOUTME: Validates, repairs, and deterministically rebuilds AI-generated fitness plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitaplan Plan Pipeline
//!
//! Takes a structurally-plausible but numerically-unreliable multi-day
//! training or nutrition plan produced by a generative model and makes it
//! trustworthy:
//!
//! - **Resolve**: reconcile free-text exercise names and recipe ids against
//!   canonical catalogs, with deterministic fallback substitution and a
//!   weekly recipe variety guard.
//! - **Normalize**: round macros and re-derive every calorie figure so the
//!   numbers in a plan are internally consistent before they are judged.
//! - **Validate**: check the normalized plan against calorie and macro
//!   targets with explicit tolerances, returning the first violation as data.
//! - **Feed back**: turn a violation into a short correction instruction for
//!   the next generation attempt.
//! - **Fall back**: assemble a complete training plan from catalog data and
//!   seeded selection alone when generation keeps failing.
//!
//! Every operation is a pure function of its inputs: no I/O, no shared
//! state, no mutation of the caller's plan or catalog. The orchestrator that
//! talks to the generative model and to storage lives outside this crate.
//!
//! ## Example
//!
//! ```rust
//! use vitaplan_pipeline::models::{NutritionPlan, NutritionTargets};
//! use vitaplan_pipeline::planning::normalizer::normalize_nutrition_plan;
//! use vitaplan_pipeline::planning::validator::validate_nutrition_plan;
//!
//! let plan = NutritionPlan::default();
//! let targets = NutritionTargets::new(2000.0, 3);
//! let normalized = normalize_nutrition_plan(&plan);
//! assert!(validate_nutrition_plan(&normalized, &targets).is_some());
//! ```

/// Numeric policy constants: energy factors, tolerances, precisions
pub mod constants;

/// Error types for structural pipeline failures
pub mod errors;

/// Plan, catalog, and diagnostic data models
pub mod models;

/// The validation, repair, and fallback pipeline itself
pub mod planning;

pub use errors::{PlanError, PlanResult};
