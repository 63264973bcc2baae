// ABOUTME: Nutrition and training plan documents plus caller-supplied targets
// ABOUTME: Meal, day, and plan value types with derived macro/calorie records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

use crate::constants::macro_energy::{
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal type
    Other,
}

impl MealType {
    /// Parse meal type from string
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            "snack" => Self::Snack,
            _ => Self::Other,
        }
    }

    /// Lowercase tag used in labels and telemetry
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
            Self::Other => "other",
        }
    }
}

/// Calories and macronutrients for a meal, a day, or a plan average
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroRecord {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (grams)
    pub protein_g: f64,
    /// Carbohydrates (grams)
    pub carbs_g: f64,
    /// Fat (grams)
    pub fat_g: f64,
}

impl MacroRecord {
    /// Energy derived from the macros via the Atwater 4/4/9 factors,
    /// ignoring the stored `calories` value
    #[must_use]
    pub fn energy_kcal(&self) -> f64 {
        self.protein_g * KCAL_PER_GRAM_PROTEIN
            + self.carbs_g * KCAL_PER_GRAM_CARBS
            + self.fat_g * KCAL_PER_GRAM_FAT
    }

    /// Add another record into this one field by field
    pub fn accumulate(&mut self, other: &Self) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbs_g += other.carbs_g;
        self.fat_g += other.fat_g;
    }
}

/// A single meal slot within a nutrition plan day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Slot this meal occupies in the day
    pub meal_type: MealType,
    /// Display title as generated or as adopted from the catalog
    pub title: String,
    /// Longer description, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Catalog recipe reference; `None` when unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<String>,
    /// Macro record for this meal
    pub macros: MacroRecord,
}

/// One day of a nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionDay {
    /// Display label, e.g. "Day 1"
    pub label: String,
    /// Calendar date, when scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Ordered meal slots
    pub meals: Vec<Meal>,
    /// Day totals; recomputed by the normalizer, untrusted before that
    #[serde(default)]
    pub totals: MacroRecord,
}

/// A multi-day nutrition plan
///
/// The plan-level fields are per-day averages produced by the normalizer
/// (averaged over `max(1, day_count)`); before normalization they carry
/// whatever the generative model reported and must not be trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    /// Ordered days; day 1 is the plan start
    pub days: Vec<NutritionDay>,
    /// Average daily calories (kcal)
    #[serde(default)]
    pub daily_calories: f64,
    /// Average daily protein (grams)
    #[serde(default)]
    pub protein_g: f64,
    /// Average daily carbohydrates (grams)
    #[serde(default)]
    pub carbs_g: f64,
    /// Average daily fat (grams)
    #[serde(default)]
    pub fat_g: f64,
}

/// A single exercise row within a training plan day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExercise {
    /// Display name as generated or as adopted from the catalog
    pub name: String,
    /// Catalog exercise reference; `None` when unresolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
    /// Illustration adopted from the catalog, when resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Working sets
    pub sets: u8,
    /// Repetition prescription, e.g. "6-10"
    pub reps: String,
    /// Tempo prescription, e.g. "3-1-1"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo: Option<String>,
    /// Rest between sets (seconds)
    pub rest_seconds: u32,
}

/// One day of a training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingDay {
    /// Display label, e.g. "Day 1"
    pub label: String,
    /// Calendar date, when scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Session focus, e.g. "push" or "leg + core"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    /// Ordered exercise rows
    pub exercises: Vec<TrainingExercise>,
}

/// A multi-day training plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Ordered days; day 1 is the plan start
    pub days: Vec<TrainingDay>,
}

/// Macro gram targets supplied by the orchestrator from user preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily protein target (grams)
    pub protein_g: f64,
    /// Daily carbohydrate target (grams)
    pub carbs_g: f64,
    /// Daily fat target (grams)
    pub fat_g: f64,
}

/// Generation constraints a nutrition plan is validated against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionTargets {
    /// Daily calorie target (kcal)
    pub target_kcal: f64,
    /// Exact number of meals expected per day
    pub meals_per_day: usize,
    /// Optional macro gram targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macros: Option<MacroTargets>,
}

impl NutritionTargets {
    /// Targets with a calorie goal and meal count but no macro goals
    #[must_use]
    pub const fn new(target_kcal: f64, meals_per_day: usize) -> Self {
        Self {
            target_kcal,
            meals_per_day,
            macros: None,
        }
    }

    /// Attach macro gram targets
    #[must_use]
    pub const fn with_macros(mut self, macros: MacroTargets) -> Self {
        self.macros = Some(macros);
        self
    }
}
