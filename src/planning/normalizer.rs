// ABOUTME: Numeric normalization for nutrition plans
// ABOUTME: Rounds macros, re-derives calories, and recomputes day and plan aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Numeric Normalizer
//!
//! Makes a plan's numbers internally consistent after any model or fallback
//! generation, before validation. The model's reported calorie values are
//! never trusted: every calorie figure is re-derived from the macros via the
//! Atwater 4/4/9 factors. Normalization is idempotent — running it on an
//! already-normalized plan reproduces the numbers bit for bit.

use crate::constants::precision::{GRAM_DECIMALS, KCAL_DECIMALS};
use crate::models::{MacroRecord, Meal, NutritionDay, NutritionPlan};

/// Round half away from zero at a decimal precision
///
/// `round_to(v, d) == round(v * 10^d) / 10^d`, bit-for-bit reproducible for
/// the same inputs on every host.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Normalize one macro record: grams to one decimal, calories derived
#[must_use]
pub fn normalize_meal_macros(macros: &MacroRecord) -> MacroRecord {
    let mut normalized = MacroRecord {
        calories: 0.0,
        protein_g: round_to(macros.protein_g, GRAM_DECIMALS),
        carbs_g: round_to(macros.carbs_g, GRAM_DECIMALS),
        fat_g: round_to(macros.fat_g, GRAM_DECIMALS),
    };
    normalized.calories = round_to(normalized.energy_kcal(), KCAL_DECIMALS);
    normalized
}

/// Normalize a whole nutrition plan
///
/// Produces a new plan; the input is never mutated. Meals are rounded and
/// re-derived first, day totals are sums of the normalized meals, and the
/// plan-level fields are per-day averages over `max(1, day_count)` so an
/// empty plan normalizes to zeros instead of dividing by zero.
#[must_use]
pub fn normalize_nutrition_plan(plan: &NutritionPlan) -> NutritionPlan {
    let days: Vec<NutritionDay> = plan.days.iter().map(normalize_day).collect();

    let mut week = MacroRecord::default();
    for day in &days {
        week.accumulate(&day.totals);
    }
    let divisor = days.len().max(1) as f64;

    NutritionPlan {
        days,
        daily_calories: round_to(week.calories / divisor, KCAL_DECIMALS),
        protein_g: round_to(week.protein_g / divisor, GRAM_DECIMALS),
        carbs_g: round_to(week.carbs_g / divisor, GRAM_DECIMALS),
        fat_g: round_to(week.fat_g / divisor, GRAM_DECIMALS),
    }
}

fn normalize_day(day: &NutritionDay) -> NutritionDay {
    let meals: Vec<Meal> = day
        .meals
        .iter()
        .map(|meal| Meal {
            meal_type: meal.meal_type,
            title: meal.title.clone(),
            description: meal.description.clone(),
            recipe_id: meal.recipe_id.clone(),
            macros: normalize_meal_macros(&meal.macros),
        })
        .collect();

    let mut totals = MacroRecord::default();
    for meal in &meals {
        totals.accumulate(&meal.macros);
    }
    totals.calories = round_to(totals.calories, KCAL_DECIMALS);
    totals.protein_g = round_to(totals.protein_g, GRAM_DECIMALS);
    totals.carbs_g = round_to(totals.carbs_g, GRAM_DECIMALS);
    totals.fat_g = round_to(totals.fat_g, GRAM_DECIMALS);

    NutritionDay {
        label: day.label.clone(),
        date: day.date,
        meals,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    fn meal(protein_g: f64, carbs_g: f64, fat_g: f64) -> Meal {
        Meal {
            meal_type: MealType::Lunch,
            title: "Test meal".to_owned(),
            description: None,
            recipe_id: None,
            macros: MacroRecord {
                calories: 9999.0, // deliberately wrong; must be re-derived
                protein_g,
                carbs_g,
                fat_g,
            },
        }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert!((round_to(2.5, 0) - 3.0).abs() < f64::EPSILON);
        assert!((round_to(-2.5, 0) - -3.0).abs() < f64::EPSILON);
        assert!((round_to(0.25, 1) - 0.3).abs() < f64::EPSILON);
        assert!((round_to(0.24, 1) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn calories_are_always_derived_from_macros() {
        let normalized = normalize_meal_macros(&meal(30.0, 40.0, 10.0).macros);
        assert!((normalized.calories - 370.0).abs() < f64::EPSILON);
    }

    #[test]
    fn macro_grams_round_to_one_decimal() {
        let normalized = normalize_meal_macros(&MacroRecord {
            calories: 0.0,
            protein_g: 30.14,
            carbs_g: 40.06,
            fat_g: 9.95,
        });
        assert!((normalized.protein_g - 30.1).abs() < f64::EPSILON);
        assert!((normalized.carbs_g - 40.1).abs() < f64::EPSILON);
        assert!((normalized.fat_g - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_plan_normalizes_to_zeros() {
        let plan = NutritionPlan::default();
        let normalized = normalize_nutrition_plan(&plan);
        assert!(normalized.days.is_empty());
        assert!(normalized.daily_calories.abs() < f64::EPSILON);
        assert!(normalized.protein_g.abs() < f64::EPSILON);
    }

    #[test]
    fn normalization_is_idempotent() {
        let plan = NutritionPlan {
            days: vec![NutritionDay {
                label: "Day 1".to_owned(),
                date: None,
                meals: vec![meal(31.27, 44.93, 12.08), meal(28.0, 51.5, 9.99)],
                totals: MacroRecord::default(),
            }],
            daily_calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
        };
        let once = normalize_nutrition_plan(&plan);
        let twice = normalize_nutrition_plan(&once);
        assert_eq!(once, twice);
    }
}
