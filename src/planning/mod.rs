// ABOUTME: The plan validation, repair, and fallback pipeline
// ABOUTME: Seeded selection, catalog resolution, normalization, validation, feedback, fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Planning Pipeline
//!
//! Components in dependency order, leaves first:
//!
//! 1. [`selector`] — seeded, hash-based ranking over a catalog.
//! 2. [`resolver`] — reconciles plan references against catalogs, using the
//!    selector's normalization and deterministic fallback choices.
//! 3. [`normalizer`] — rounds and re-derives every numeric field.
//! 4. [`validator`] — judges a normalized plan against its targets.
//! 5. [`feedback`] — turns one finding into a retry instruction.
//! 6. [`fallback`] — assembles a plan from catalog data alone.
//!
//! The orchestrator (outside this crate) wires them together: generate →
//! resolve → normalize → validate → retry with feedback → fall back.

/// Deterministic plan assembly from catalog data (no model involved)
pub mod fallback;
/// Retry-feedback and guidance string builders
pub mod feedback;
/// Numeric normalization: rounding and derived-field recomputation
pub mod normalizer;
/// Catalog reference resolution and the recipe variety guard
pub mod resolver;
/// Seeded deterministic ranking over catalog entries
pub mod selector;
/// Numeric constraint validation against generation targets
pub mod validator;

pub use fallback::{
    build_fallback_training_plan, pick_exercises_for_focus, FallbackPlanRequest, TrainingGoal,
    TrainingLevel, TrainingLocation, WorkoutPolicy,
};
pub use feedback::{
    build_correction_feedback, build_per_meal_guidance, build_two_meal_correction, FeedbackContext,
};
pub use normalizer::normalize_nutrition_plan;
pub use resolver::{
    find_invalid_training_plan_exercise_ids, resolve_nutrition_plan_recipes,
    resolve_training_plan_exercise_ids, ExerciseIdIssue, ExerciseResolution, RecipeResolution,
    UnresolvedExercise, VarietyGuardReport,
};
pub use selector::{normalize_name, rank, seeded_hash};
pub use validator::validate_nutrition_plan;
