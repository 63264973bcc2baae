// ABOUTME: Retry-feedback and guidance string builders for regeneration prompts
// ABOUTME: Defensive consumers of loosely-typed context; return empty strings instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Retry-Feedback Builder
//!
//! Turns one validation finding into a short correction instruction for the
//! next generation attempt, without leaking the internal data model. The
//! builders consume telemetry-shaped context that may be partial or
//! oddly-typed (numbers as strings, missing fields); they coerce what they
//! can and return an empty string rather than raising when the essentials
//! are absent.

use crate::constants::tolerance::TWO_MEAL_SPLIT_KCAL;
use crate::models::ValidationIssue;
use crate::planning::normalizer::round_to;
use serde_json::Value;

/// Known context fields for feedback building, all optional
///
/// A typed bag instead of dynamic property probing: partial and legacy
/// payloads simply leave fields unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackContext {
    /// Violation label, e.g. "`DAY_CALORIES_OUT_OF_RANGE`"
    pub reason: Option<String>,
    /// Offending day label
    pub day: Option<String>,
    /// Offending meal label
    pub meal: Option<String>,
    /// Target value of the failed comparison
    pub expected: Option<f64>,
    /// Observed value of the failed comparison
    pub actual: Option<f64>,
    /// Tolerance of the failed comparison
    pub tolerance: Option<f64>,
    /// Daily calorie target, for proactive guidance
    pub target_kcal: Option<f64>,
    /// Requested meals per day, for proactive guidance
    pub meals_per_day: Option<f64>,
}

impl FeedbackContext {
    /// Read a context out of arbitrary JSON
    ///
    /// Accepts both `snake_case` and the legacy `camelCase` field names, and
    /// coerces numeric fields from either JSON numbers or numeric strings.
    /// Anything that is not an object yields an empty context.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let field = |names: &[&str]| names.iter().find_map(|name| map.get(*name));
        Self {
            reason: field(&["reason"]).and_then(coerce_string),
            day: field(&["day"]).and_then(coerce_string),
            meal: field(&["meal"]).and_then(coerce_string),
            expected: field(&["expected"]).and_then(coerce_f64),
            actual: field(&["actual"]).and_then(coerce_f64),
            tolerance: field(&["tolerance"]).and_then(coerce_f64),
            target_kcal: field(&["target_kcal", "targetKcal"]).and_then(coerce_f64),
            meals_per_day: field(&["meals_per_day", "mealsPerDay"]).and_then(coerce_f64),
        }
    }
}

impl From<&ValidationIssue> for FeedbackContext {
    fn from(issue: &ValidationIssue) -> Self {
        Self {
            reason: Some(issue.reason.as_str().to_owned()),
            day: issue.day.clone(),
            meal: issue.meal.clone(),
            expected: Some(issue.diff.expected),
            actual: Some(issue.diff.actual),
            tolerance: Some(issue.diff.tolerance),
            target_kcal: None,
            meals_per_day: None,
        }
    }
}

/// Number from a JSON number or a numeric string
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Non-empty string from a JSON string or a number
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Format a value the way it reads in a prompt: whole numbers bare,
/// fractional values with one decimal
fn format_value(value: f64) -> String {
    if (value - value.round()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// General correction feedback for a failed check
///
/// Shape: `"<reason> en <day>: expected=<e>, actual=<a>, tolerance=±<t>"`.
/// The day and tolerance segments are omitted when absent from the context;
/// a context missing the reason or either number yields an empty string.
#[must_use]
pub fn build_correction_feedback(context: &FeedbackContext) -> String {
    let (Some(reason), Some(expected), Some(actual)) =
        (&context.reason, context.expected, context.actual)
    else {
        return String::new();
    };

    let mut feedback = context.day.as_ref().map_or_else(
        || format!("{reason}: "),
        |day| format!("{reason} en {day}: "),
    );
    feedback.push_str(&format!(
        "expected={}, actual={}",
        format_value(expected),
        format_value(actual)
    ));
    if let Some(tolerance) = context.tolerance {
        feedback.push_str(&format!(", tolerance=±{}", format_value(tolerance)));
    }
    feedback
}

/// Correction feedback for the two-meal split case
///
/// Naive re-prompting tends to regenerate the whole plan and drift
/// elsewhere, so this instruction pins the change to the one offending
/// meal.
#[must_use]
pub fn build_two_meal_correction(context: &FeedbackContext) -> String {
    let (Some(meal), Some(expected), Some(actual)) =
        (&context.meal, context.expected, context.actual)
    else {
        return String::new();
    };

    let scope = context.day.as_ref().map_or_else(
        || format!("la comida \"{meal}\""),
        |day| format!("la comida \"{meal}\" en {day}"),
    );
    let tolerance = context.tolerance.unwrap_or(TWO_MEAL_SPLIT_KCAL);
    format!(
        "Ajusta únicamente {scope}: expected={}, actual={}, tolerance=±{}. \
         Mantén el resto del plan exactamente igual.",
        format_value(expected),
        format_value(actual),
        format_value(tolerance)
    )
}

/// Proactive per-meal calorie guidance for the next generation prompt
///
/// Not tied to a specific failure: states the expected per-meal calorie
/// target (`round(target_kcal / meals_per_day)`) and the per-meal
/// tolerance, for inclusion up front.
#[must_use]
pub fn build_per_meal_guidance(context: &FeedbackContext) -> String {
    let (Some(target_kcal), Some(meals_per_day)) = (context.target_kcal, context.meals_per_day)
    else {
        return String::new();
    };
    if meals_per_day < 1.0 {
        return String::new();
    }

    let per_meal = round_to(target_kcal / meals_per_day, 0);
    format!(
        "Cada una de las {} comidas debe aportar {} kcal, tolerance=±{} kcal.",
        format_value(meals_per_day),
        format_value(per_meal),
        format_value(TWO_MEAL_SPLIT_KCAL)
    )
}
