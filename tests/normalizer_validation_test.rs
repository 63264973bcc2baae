// ABOUTME: Integration tests for plan normalization and math validation
// ABOUTME: Covers the macro-calorie identity, idempotence, tolerances, and check ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use vitaplan_pipeline::models::{
    MacroRecord, MacroTargets, Meal, MealType, NutritionDay, NutritionPlan, NutritionTargets,
    ReasonCode,
};
use vitaplan_pipeline::planning::normalizer::normalize_nutrition_plan;
use vitaplan_pipeline::planning::validator::{kcal_tolerance, validate_nutrition_plan};

fn meal(meal_type: MealType, title: &str, protein_g: f64, carbs_g: f64, fat_g: f64) -> Meal {
    Meal {
        meal_type,
        title: title.to_owned(),
        description: None,
        recipe_id: None,
        macros: MacroRecord {
            calories: -1.0, // reported value is never trusted
            protein_g,
            carbs_g,
            fat_g,
        },
    }
}

fn day(label: &str, meals: Vec<Meal>) -> NutritionDay {
    NutritionDay {
        label: label.to_owned(),
        date: None,
        meals,
        totals: MacroRecord::default(),
    }
}

fn plan(days: Vec<NutritionDay>) -> NutritionPlan {
    NutritionPlan {
        days,
        daily_calories: 0.0,
        protein_g: 0.0,
        carbs_g: 0.0,
        fat_g: 0.0,
    }
}

/// A day whose meals sum to roughly 2000 kcal
fn balanced_day(label: &str) -> NutritionDay {
    day(
        label,
        vec![
            meal(MealType::Breakfast, "Oats", 30.0, 80.0, 15.0),   // 575
            meal(MealType::Lunch, "Chicken rice", 45.0, 70.0, 20.0), // 640
            meal(MealType::Dinner, "Salmon pasta", 40.0, 75.0, 25.0), // 685
        ],
    )
}

// === Normalization ===

#[test]
fn every_meal_satisfies_the_macro_calorie_identity() {
    let normalized = normalize_nutrition_plan(&plan(vec![
        day(
            "Day 1",
            vec![
                meal(MealType::Breakfast, "A", 31.27, 44.93, 12.08),
                meal(MealType::Lunch, "B", 28.04, 51.55, 9.96),
            ],
        ),
        balanced_day("Day 2"),
    ]));

    for normalized_day in &normalized.days {
        for normalized_meal in &normalized_day.meals {
            let expected = (normalized_meal.macros.protein_g * 4.0
                + normalized_meal.macros.carbs_g * 4.0
                + normalized_meal.macros.fat_g * 9.0)
                .round();
            assert!(
                (normalized_meal.macros.calories - expected).abs() < f64::EPSILON,
                "calorie identity broken for {}",
                normalized_meal.title
            );
        }
    }
}

#[test]
fn normalizing_twice_is_byte_identical() {
    let once = normalize_nutrition_plan(&plan(vec![
        day(
            "Day 1",
            vec![
                meal(MealType::Breakfast, "A", 31.27, 44.93, 12.08),
                meal(MealType::Lunch, "B", 27.999, 51.501, 10.049),
            ],
        ),
        balanced_day("Day 2"),
    ]));
    let twice = normalize_nutrition_plan(&once);

    let first = serde_json::to_string(&once).unwrap();
    let second = serde_json::to_string(&twice).unwrap();
    assert_eq!(first, second);
}

#[test]
fn day_totals_sum_the_normalized_meals() {
    let normalized = normalize_nutrition_plan(&plan(vec![balanced_day("Day 1")]));
    let totals = normalized.days[0].totals;
    assert!((totals.calories - 1900.0).abs() < f64::EPSILON);
    assert!((totals.protein_g - 115.0).abs() < f64::EPSILON);
    assert!((totals.carbs_g - 225.0).abs() < f64::EPSILON);
    assert!((totals.fat_g - 60.0).abs() < f64::EPSILON);
}

#[test]
fn plan_fields_average_over_days() {
    let normalized = normalize_nutrition_plan(&plan(vec![
        day("Day 1", vec![meal(MealType::Lunch, "A", 50.0, 50.0, 10.0)]), // 490
        day("Day 2", vec![meal(MealType::Lunch, "B", 50.0, 100.0, 10.0)]), // 690
    ]));
    assert!((normalized.daily_calories - 590.0).abs() < f64::EPSILON);
    assert!((normalized.protein_g - 50.0).abs() < f64::EPSILON);
    assert!((normalized.carbs_g - 75.0).abs() < f64::EPSILON);
}

#[test]
fn empty_plan_averages_do_not_divide_by_zero() {
    let normalized = normalize_nutrition_plan(&NutritionPlan::default());
    assert!(normalized.daily_calories.abs() < f64::EPSILON);
}

// === Validation ===

#[test]
fn a_plan_on_target_returns_no_issue() {
    let normalized = normalize_nutrition_plan(&plan(vec![
        balanced_day("Day 1"),
        balanced_day("Day 2"),
    ]));
    // Day totals land on 1900 kcal; tolerance for 2000 is 120
    let targets = NutritionTargets::new(2000.0, 3);
    assert_eq!(validate_nutrition_plan(&normalized, &targets), None);
}

#[test]
fn plan_level_calorie_drift_is_reported_first() {
    let normalized = normalize_nutrition_plan(&plan(vec![day(
        "Day 1",
        vec![meal(MealType::Lunch, "Tiny", 10.0, 10.0, 2.0)], // 98 kcal
    )]));
    let targets = NutritionTargets::new(2000.0, 3);

    let issue = validate_nutrition_plan(&normalized, &targets).unwrap();
    // Daily average fails before the day's meal-count mismatch is reached
    assert_eq!(issue.reason, ReasonCode::DailyCaloriesOutOfRange);
    assert_eq!(issue.day, None);
    assert!((issue.diff.expected - 2000.0).abs() < f64::EPSILON);
    assert!((issue.diff.actual - 98.0).abs() < f64::EPSILON);
    assert!((issue.diff.tolerance - 120.0).abs() < f64::EPSILON);
    assert!(!issue.diff.within_tolerance);
}

#[test]
fn calorie_tolerance_scales_with_the_target() {
    assert!((kcal_tolerance(2000.0) - 120.0).abs() < f64::EPSILON);
    assert!((kcal_tolerance(4000.0) - 240.0).abs() < f64::EPSILON);
}

#[test]
fn macro_targets_are_checked_in_protein_carbs_fat_order() {
    // Protein and carbs both drift beyond 12 g; protein must win
    let normalized = normalize_nutrition_plan(&plan(vec![day(
        "Day 1",
        vec![
            meal(MealType::Breakfast, "A", 40.0, 90.0, 20.0),
            meal(MealType::Lunch, "B", 40.0, 90.0, 20.0),
            meal(MealType::Dinner, "C", 40.0, 90.0, 20.0),
        ],
    )]));
    let targets = NutritionTargets::new(normalized.daily_calories, 3).with_macros(MacroTargets {
        protein_g: 160.0, // actual 120
        carbs_g: 230.0,   // actual 270
        fat_g: 60.0,      // actual 60
    });

    let issue = validate_nutrition_plan(&normalized, &targets).unwrap();
    assert_eq!(issue.reason, ReasonCode::ProteinOutOfRange);
    assert!((issue.diff.delta - -40.0).abs() < f64::EPSILON);
}

#[test]
fn meal_count_mismatch_is_fatal_and_names_the_day() {
    let normalized = normalize_nutrition_plan(&plan(vec![
        balanced_day("Day 1"),
        day("Day 2", vec![meal(MealType::Lunch, "Only", 45.0, 70.0, 20.0)]),
    ]));
    // Keep plan-level kcal within tolerance so the count check is reached:
    // days average (1900 + 640) / 2 = 1270
    let targets = NutritionTargets::new(1300.0, 3);

    let issue = validate_nutrition_plan(&normalized, &targets).unwrap();
    assert_eq!(issue.reason, ReasonCode::MealCountMismatch);
    assert_eq!(issue.day.as_deref(), Some("Day 2"));
    assert!((issue.diff.expected - 3.0).abs() < f64::EPSILON);
    assert!((issue.diff.actual - 1.0).abs() < f64::EPSILON);
    assert!((issue.diff.tolerance).abs() < f64::EPSILON);
}

#[test]
fn two_meal_split_reports_the_lopsided_meal() {
    // targetKcal=2000, meals A=1200/B=800: per-meal expectation is 1000 ± 80
    let normalized = normalize_nutrition_plan(&plan(vec![
        day(
            "Day 1",
            vec![
                meal(MealType::Lunch, "Meal A", 75.0, 75.0, 66.7), // 1200 kcal
                meal(MealType::Dinner, "Meal B", 50.0, 50.0, 44.4), // 800 kcal
            ],
        ),
        day(
            "Day 2",
            vec![
                meal(MealType::Lunch, "Meal C", 68.8, 68.8, 61.1), // 1100 kcal, would also fail
                meal(MealType::Dinner, "Meal D", 56.3, 56.3, 50.0), // 900 kcal
            ],
        ),
    ]));
    let targets = NutritionTargets::new(2000.0, 2);

    let issue = validate_nutrition_plan(&normalized, &targets).unwrap();
    assert_eq!(issue.reason, ReasonCode::TwoMealSplitMismatch);
    assert_eq!(issue.day.as_deref(), Some("Day 1"));
    assert_eq!(issue.meal.as_deref(), Some("Meal A"));
    assert!((issue.diff.expected - 1000.0).abs() < f64::EPSILON);
    assert!((issue.diff.delta - 200.0).abs() < f64::EPSILON);
    assert!((issue.diff.tolerance - 80.0).abs() < f64::EPSILON);
}

#[test]
fn three_meal_plans_skip_the_split_check() {
    let normalized = normalize_nutrition_plan(&plan(vec![balanced_day("Day 1")]));
    // Meals are 575/640/685 — far from an even three-way split, still valid
    let targets = NutritionTargets::new(1900.0, 3);
    assert_eq!(validate_nutrition_plan(&normalized, &targets), None);
}
