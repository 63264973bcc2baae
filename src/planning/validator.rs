// ABOUTME: Numeric constraint validation for normalized nutrition plans
// ABOUTME: Fixed-order short-circuit checks returning the first violated invariant as data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Math Validator
//!
//! Decides whether a normalized plan satisfies its generation constraints.
//! Returns the first failing check rather than a full report, mirroring how
//! the retry loop consumes one correction at a time. The checking order is
//! fixed:
//!
//! 1. Plan-level daily calories against the target.
//! 2. Plan-level protein, carbs, fat against macro targets, if supplied.
//! 3. Per day, exact meal count (fatal, tolerance zero).
//! 4. Per day, calorie total against the target.
//! 5. Per day, protein, carbs, fat against macro targets.
//! 6. For two-meal plans, each meal against half the daily target.
//!
//! Every comparison rounds both sides to the field's declared precision
//! first, so the verdict is deterministic regardless of upstream
//! floating-point noise.

use crate::constants::precision::{GRAM_DECIMALS, KCAL_DECIMALS};
use crate::constants::tolerance::{
    DAILY_KCAL_FLOOR, DAILY_KCAL_RATIO, MACRO_GRAMS, TWO_MEAL_SPLIT_KCAL,
};
use crate::models::{Diff, NutritionPlan, NutritionTargets, ReasonCode, ValidationIssue};

/// Absolute tolerance for a daily calorie comparison
///
/// The greater of 120 kcal and 6% of the target, so small targets keep a
/// workable band and large targets scale proportionally.
#[must_use]
pub fn kcal_tolerance(target_kcal: f64) -> f64 {
    (target_kcal.abs() * DAILY_KCAL_RATIO).max(DAILY_KCAL_FLOOR)
}

/// Validate a normalized plan against its targets
///
/// Returns `None` when every check passes, otherwise the first violation in
/// the fixed checking order.
#[must_use]
pub fn validate_nutrition_plan(
    plan: &NutritionPlan,
    targets: &NutritionTargets,
) -> Option<ValidationIssue> {
    // 1. Plan-level daily calories
    let diff = Diff::new(
        targets.target_kcal,
        plan.daily_calories,
        kcal_tolerance(targets.target_kcal),
        KCAL_DECIMALS,
    );
    if !diff.within_tolerance {
        return Some(ValidationIssue::for_plan(
            ReasonCode::DailyCaloriesOutOfRange,
            diff,
        ));
    }

    // 2. Plan-level macros, in protein/carbs/fat order
    if let Some(macros) = &targets.macros {
        let checks = [
            (ReasonCode::ProteinOutOfRange, macros.protein_g, plan.protein_g),
            (ReasonCode::CarbsOutOfRange, macros.carbs_g, plan.carbs_g),
            (ReasonCode::FatOutOfRange, macros.fat_g, plan.fat_g),
        ];
        for (reason, expected, actual) in checks {
            let diff = Diff::new(expected, actual, MACRO_GRAMS, GRAM_DECIMALS);
            if !diff.within_tolerance {
                return Some(ValidationIssue::for_plan(reason, diff));
            }
        }
    }

    // 3. Meal counts; any mismatch is fatal
    for day in &plan.days {
        if day.meals.len() != targets.meals_per_day {
            let diff = Diff::new(
                targets.meals_per_day as f64,
                day.meals.len() as f64,
                0.0,
                KCAL_DECIMALS,
            );
            return Some(ValidationIssue::for_day(
                ReasonCode::MealCountMismatch,
                &day.label,
                diff,
            ));
        }
    }

    // 4. Day calorie totals
    for day in &plan.days {
        let diff = Diff::new(
            targets.target_kcal,
            day.totals.calories,
            kcal_tolerance(targets.target_kcal),
            KCAL_DECIMALS,
        );
        if !diff.within_tolerance {
            return Some(ValidationIssue::for_day(
                ReasonCode::DayCaloriesOutOfRange,
                &day.label,
                diff,
            ));
        }
    }

    // 5. Day macros, in protein/carbs/fat order
    if let Some(macros) = &targets.macros {
        for day in &plan.days {
            let checks = [
                (ReasonCode::ProteinOutOfRange, macros.protein_g, day.totals.protein_g),
                (ReasonCode::CarbsOutOfRange, macros.carbs_g, day.totals.carbs_g),
                (ReasonCode::FatOutOfRange, macros.fat_g, day.totals.fat_g),
            ];
            for (reason, expected, actual) in checks {
                let diff = Diff::new(expected, actual, MACRO_GRAMS, GRAM_DECIMALS);
                if !diff.within_tolerance {
                    return Some(ValidationIssue::for_day(reason, &day.label, diff));
                }
            }
        }
    }

    // 6. Two-meal split: the case most prone to lopsided generation
    if targets.meals_per_day == 2 {
        let per_meal = targets.target_kcal / 2.0;
        for day in &plan.days {
            for meal in &day.meals {
                let diff = Diff::new(
                    per_meal,
                    meal.macros.calories,
                    TWO_MEAL_SPLIT_KCAL,
                    KCAL_DECIMALS,
                );
                if !diff.within_tolerance {
                    let label = if meal.title.is_empty() {
                        meal.meal_type.as_str().to_owned()
                    } else {
                        meal.title.clone()
                    };
                    return Some(ValidationIssue::for_meal(
                        ReasonCode::TwoMealSplitMismatch,
                        &day.label,
                        &label,
                        diff,
                    ));
                }
            }
        }
    }

    None
}
