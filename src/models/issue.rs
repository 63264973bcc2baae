// ABOUTME: Validation diagnostics returned to the orchestrator as plain data
// ABOUTME: ReasonCode wire labels, precision-rounded Diff, and ValidationIssue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

use crate::planning::normalizer::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason codes for validation and audit findings
///
/// The serialized form is the stable wire label; retry-feedback strings use
/// the same label so prompts and telemetry agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// Plan-level average daily calories outside tolerance
    DailyCaloriesOutOfRange,
    /// Protein grams outside tolerance (plan or day level; see `day` label)
    ProteinOutOfRange,
    /// Carbohydrate grams outside tolerance (plan or day level)
    CarbsOutOfRange,
    /// Fat grams outside tolerance (plan or day level)
    FatOutOfRange,
    /// A day does not contain exactly the requested number of meals
    MealCountMismatch,
    /// A single day's calorie total outside tolerance
    DayCaloriesOutOfRange,
    /// One meal of a two-meal day strays from half the daily target
    TwoMealSplitMismatch,
    /// Exercise row carries no catalog id
    MissingExerciseId,
    /// Exercise row carries an id absent from the catalog
    UnknownExerciseId,
}

impl ReasonCode {
    /// Stable wire label, identical to the serde form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DailyCaloriesOutOfRange => "DAILY_CALORIES_OUT_OF_RANGE",
            Self::ProteinOutOfRange => "PROTEIN_OUT_OF_RANGE",
            Self::CarbsOutOfRange => "CARBS_OUT_OF_RANGE",
            Self::FatOutOfRange => "FAT_OUT_OF_RANGE",
            Self::MealCountMismatch => "MEAL_COUNT_MISMATCH",
            Self::DayCaloriesOutOfRange => "DAY_CALORIES_OUT_OF_RANGE",
            Self::TwoMealSplitMismatch => "TWO_MEAL_SPLIT_MISMATCH",
            Self::MissingExerciseId => "MISSING_EXERCISE_ID",
            Self::UnknownExerciseId => "UNKNOWN_EXERCISE_ID",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected/actual comparison at a declared decimal precision
///
/// Both sides are rounded to the field's precision before subtracting, so
/// floating-point noise from earlier rounding never flips the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    /// Target value, rounded to the field precision
    pub expected: f64,
    /// Observed value, rounded to the field precision
    pub actual: f64,
    /// `actual - expected` over the rounded values
    pub delta: f64,
    /// Absolute tolerance the delta is judged against
    pub tolerance: f64,
    /// Whether `|delta| <= tolerance`
    pub within_tolerance: bool,
}

impl Diff {
    /// Build a diff, rounding both sides to `decimals` before comparing
    #[must_use]
    pub fn new(expected: f64, actual: f64, tolerance: f64, decimals: u32) -> Self {
        let expected = round_to(expected, decimals);
        let actual = round_to(actual, decimals);
        let delta = round_to(actual - expected, decimals);
        Self {
            expected,
            actual,
            delta,
            tolerance,
            within_tolerance: delta.abs() <= tolerance,
        }
    }
}

/// First violated constraint found by a validation pass
///
/// At most one issue is surfaced per pass; the retry loop consumes one
/// correction at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// What was violated
    pub reason: ReasonCode,
    /// Offending day label, when the check is day-scoped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    /// Offending meal label, when the check is meal-scoped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal: Option<String>,
    /// Expected/actual comparison backing the finding
    pub diff: Diff,
}

impl ValidationIssue {
    /// Issue scoped to the whole plan
    #[must_use]
    pub const fn for_plan(reason: ReasonCode, diff: Diff) -> Self {
        Self {
            reason,
            day: None,
            meal: None,
            diff,
        }
    }

    /// Issue scoped to one day
    #[must_use]
    pub fn for_day(reason: ReasonCode, day: &str, diff: Diff) -> Self {
        Self {
            reason,
            day: Some(day.to_owned()),
            meal: None,
            diff,
        }
    }

    /// Issue scoped to one meal of one day
    #[must_use]
    pub fn for_meal(reason: ReasonCode, day: &str, meal: &str, diff: Diff) -> Self {
        Self {
            reason,
            day: Some(day.to_owned()),
            meal: Some(meal.to_owned()),
            diff,
        }
    }
}
