// ABOUTME: Numeric policy constants for plan normalization and validation
// ABOUTME: Atwater energy factors, tolerance formulas, rounding precisions, schedule spacing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Pipeline Constants
//!
//! Every tolerance and precision the pipeline applies lives here so the
//! normalizer, validator, and feedback builder agree on the same numbers.
//! All values are immutable constants; none are configurable at runtime.

/// Atwater general factors for macronutrient energy
///
/// Reference: Atwater, W.O. & Bryant, A.P. (1900). The availability and
/// fuel value of food materials. USDA 12th Annual Report.
pub mod macro_energy {
    /// Energy per gram of protein (kcal)
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Energy per gram of carbohydrate (kcal)
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Energy per gram of fat (kcal)
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Validation tolerances
pub mod tolerance {
    /// Minimum absolute daily-calorie tolerance (kcal)
    pub const DAILY_KCAL_FLOOR: f64 = 120.0;
    /// Relative daily-calorie tolerance as a fraction of the target
    pub const DAILY_KCAL_RATIO: f64 = 0.06;
    /// Absolute tolerance for protein/carbs/fat targets (grams)
    pub const MACRO_GRAMS: f64 = 12.0;
    /// Per-meal calorie tolerance for the two-meal split check (kcal)
    pub const TWO_MEAL_SPLIT_KCAL: f64 = 80.0;
}

/// Declared decimal precision per numeric field
///
/// Both sides of every comparison are rounded to these precisions before
/// subtracting, so floating-point noise from earlier rounding can never
/// produce a false violation.
pub mod precision {
    /// Calories are whole numbers
    pub const KCAL_DECIMALS: u32 = 0;
    /// Macro grams carry one decimal
    pub const GRAM_DECIMALS: u32 = 1;
}

/// Fallback plan scheduling policy
pub mod schedule {
    /// Calendar-day spacing between consecutive fallback training days
    pub const TRAINING_DAY_SPACING_DAYS: i64 = 2;
}
