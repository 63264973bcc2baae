// ABOUTME: Data models for plans, catalogs, and validation diagnostics
// ABOUTME: Plain serde-serializable value types; the pipeline never mutates inputs in place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Data Models
//!
//! The documents the pipeline consumes and produces. Plans arrive as the
//! generative-model caller shaped them (numbers untrusted), catalogs arrive
//! from the persistence layer (read-only), and diagnostics go back to the
//! orchestrator as plain data.

/// Canonical exercise and recipe catalogs
pub mod catalog;
/// Validation diagnostics: reason codes, diffs, issues
pub mod issue;
/// Nutrition and training plan documents
pub mod plan;

pub use catalog::{CatalogEntry, CatalogExercise, CatalogRecipe};
pub use issue::{Diff, ReasonCode, ValidationIssue};
pub use plan::{
    MacroRecord, MacroTargets, Meal, MealType, NutritionDay, NutritionPlan, NutritionTargets,
    TrainingDay, TrainingExercise, TrainingPlan,
};
