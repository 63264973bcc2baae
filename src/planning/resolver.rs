// ABOUTME: Catalog reference resolution for training and nutrition plans
// ABOUTME: Canonical id adoption, unresolved-reference tracking, recipe fallback, variety guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Catalog Resolver
//!
//! Reconciles the free-text and id references inside a generated plan
//! against the canonical catalogs, and guarantees internal consistency
//! (no two same-day guarded meals share a recipe when the catalog is large
//! enough to avoid it).
//!
//! Resolution never drops a row and never raises: an exercise that cannot
//! be matched stays in the plan with a null id and an entry in the
//! unresolved list, and a meal with a bad recipe reference receives a
//! deterministic fallback recipe. Callers decide what degradation is
//! acceptable from the returned metadata.

use crate::models::{
    CatalogExercise, CatalogRecipe, Meal, MealType, NutritionDay, NutritionPlan, ReasonCode,
    TrainingDay, TrainingExercise, TrainingPlan,
};
use crate::planning::selector::normalize_name;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Meal slots the weekly variety guard keeps distinct
const GUARDED_MEAL_TYPES: [MealType; 2] = [MealType::Lunch, MealType::Dinner];

/// An exercise reference the catalog could not satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedExercise {
    /// Label of the day the exercise belongs to
    pub day: String,
    /// Normalized display name of the exercise
    pub name: String,
}

/// Result of resolving a training plan's exercise references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseResolution {
    /// Plan with canonical ids adopted and unknown ids nulled
    pub plan: TrainingPlan,
    /// References the catalog could not satisfy, in plan order
    pub unresolved: Vec<UnresolvedExercise>,
}

/// One finding from the read-only exercise id audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseIdIssue {
    /// `MISSING_EXERCISE_ID` or `UNKNOWN_EXERCISE_ID`
    pub reason: ReasonCode,
    /// Label of the day the exercise belongs to
    pub day: String,
    /// Display name of the offending exercise
    pub exercise: String,
}

/// Outcome of the weekly recipe variety guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarietyGuardReport {
    /// Whether any guarded slot repeated a recipe across the week
    pub applied: bool,
    /// Guarded slots the guard reassigned
    pub replacements: usize,
    /// Distinct recipe ids across the week's guarded slots after guarding
    pub unique_recipe_ids_week: usize,
    /// Whether the catalog had enough recipes to avoid every repeat
    pub had_enough_unique_recipes: bool,
}

/// Result of resolving a nutrition plan's recipe references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResolution {
    /// Plan with references resolved and substitutions applied
    pub plan: NutritionPlan,
    /// False when the supplied catalog was empty; the caller must not
    /// attempt substitution in that case
    pub has_catalog: bool,
    /// Whether any meal received a deterministic fallback recipe
    pub fallback_applied: bool,
    /// Count of meal references the catalog could not satisfy
    pub invalid_references: usize,
    /// Weekly variety guard outcome
    pub variety: VarietyGuardReport,
}

/// Resolve a training plan's exercise references against the catalog
///
/// A non-empty id found in the catalog is authoritative: the catalog's
/// canonical name, id, and image override the model-provided text. Anything
/// else nulls the id and records the `(day, normalized name)` pair; the row
/// itself always survives.
#[must_use]
pub fn resolve_training_plan_exercise_ids(
    plan: &TrainingPlan,
    catalog: &[CatalogExercise],
) -> ExerciseResolution {
    let index: HashMap<&str, &CatalogExercise> =
        catalog.iter().map(|entry| (entry.id.as_str(), entry)).collect();

    let mut unresolved = Vec::new();
    let days = plan
        .days
        .iter()
        .map(|day| {
            let exercises = day
                .exercises
                .iter()
                .map(|exercise| {
                    let hit = exercise
                        .exercise_id
                        .as_deref()
                        .filter(|id| !id.trim().is_empty())
                        .and_then(|id| index.get(id));
                    match hit {
                        Some(entry) => TrainingExercise {
                            name: entry.name.clone(),
                            exercise_id: Some(entry.id.clone()),
                            image_url: entry.image_url.clone(),
                            sets: exercise.sets,
                            reps: exercise.reps.clone(),
                            tempo: exercise.tempo.clone(),
                            rest_seconds: exercise.rest_seconds,
                        },
                        None => {
                            let name = normalize_name(&exercise.name);
                            warn!(day = %day.label, exercise = %name, "unresolved exercise reference");
                            unresolved.push(UnresolvedExercise {
                                day: day.label.clone(),
                                name,
                            });
                            TrainingExercise {
                                name: exercise.name.clone(),
                                exercise_id: None,
                                image_url: None,
                                sets: exercise.sets,
                                reps: exercise.reps.clone(),
                                tempo: exercise.tempo.clone(),
                                rest_seconds: exercise.rest_seconds,
                            }
                        }
                    }
                })
                .collect();
            TrainingDay {
                label: day.label.clone(),
                date: day.date,
                focus: day.focus.clone(),
                exercises,
            }
        })
        .collect();

    ExerciseResolution {
        plan: TrainingPlan { days },
        unresolved,
    }
}

/// Audit a training plan's exercise ids without touching the plan
///
/// Classifies blank/absent ids as `MISSING_EXERCISE_ID` and ids absent from
/// the catalog as `UNKNOWN_EXERCISE_ID`. Used for inspecting a plan that is
/// not being actively repaired.
#[must_use]
pub fn find_invalid_training_plan_exercise_ids(
    plan: &TrainingPlan,
    catalog: &[CatalogExercise],
) -> Vec<ExerciseIdIssue> {
    let known: HashSet<&str> = catalog.iter().map(|entry| entry.id.as_str()).collect();

    let mut issues = Vec::new();
    for day in &plan.days {
        for exercise in &day.exercises {
            let reason = match exercise.exercise_id.as_deref() {
                None => Some(ReasonCode::MissingExerciseId),
                Some(id) if id.trim().is_empty() => Some(ReasonCode::MissingExerciseId),
                Some(id) if !known.contains(id) => Some(ReasonCode::UnknownExerciseId),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                issues.push(ExerciseIdIssue {
                    reason,
                    day: day.label.clone(),
                    exercise: exercise.name.clone(),
                });
            }
        }
    }
    issues
}

/// Resolve a nutrition plan's recipe references and enforce weekly variety
///
/// With an empty catalog every reference is nulled and `has_catalog` comes
/// back false. Otherwise each meal whose reference is absent from the
/// catalog receives the fallback recipe at `(day_index + meal_index) %
/// catalog.len()`, and the variety guard then reassigns guarded slots that
/// repeat a recipe across the week. Every substitution overwrites the
/// meal's title, description, and macros from the chosen recipe so text and
/// numbers never disagree with the final reference.
#[must_use]
pub fn resolve_nutrition_plan_recipes(
    plan: &NutritionPlan,
    catalog: &[CatalogRecipe],
) -> RecipeResolution {
    if catalog.is_empty() {
        let days = plan
            .days
            .iter()
            .map(|day| NutritionDay {
                label: day.label.clone(),
                date: day.date,
                meals: day
                    .meals
                    .iter()
                    .map(|meal| Meal {
                        meal_type: meal.meal_type,
                        title: meal.title.clone(),
                        description: meal.description.clone(),
                        recipe_id: None,
                        macros: meal.macros,
                    })
                    .collect(),
                totals: day.totals,
            })
            .collect();
        return RecipeResolution {
            plan: NutritionPlan {
                days,
                daily_calories: plan.daily_calories,
                protein_g: plan.protein_g,
                carbs_g: plan.carbs_g,
                fat_g: plan.fat_g,
            },
            has_catalog: false,
            fallback_applied: false,
            invalid_references: 0,
            variety: VarietyGuardReport {
                applied: false,
                replacements: 0,
                unique_recipe_ids_week: 0,
                had_enough_unique_recipes: false,
            },
        };
    }

    let known: HashSet<&str> = catalog.iter().map(|recipe| recipe.id.as_str()).collect();
    let mut fallback_applied = false;
    let mut invalid_references = 0;

    let mut days: Vec<NutritionDay> = plan
        .days
        .iter()
        .enumerate()
        .map(|(day_index, day)| NutritionDay {
            label: day.label.clone(),
            date: day.date,
            meals: day
                .meals
                .iter()
                .enumerate()
                .map(|(meal_index, meal)| {
                    let valid = meal
                        .recipe_id
                        .as_deref()
                        .is_some_and(|id| known.contains(id));
                    if valid {
                        meal.clone()
                    } else {
                        let pick = &catalog[(day_index + meal_index) % catalog.len()];
                        debug!(
                            day = %day.label,
                            meal = %meal.meal_type.as_str(),
                            recipe = %pick.id,
                            "fallback recipe substitution"
                        );
                        fallback_applied = true;
                        invalid_references += 1;
                        substitute_recipe(meal, pick)
                    }
                })
                .collect(),
            totals: day.totals,
        })
        .collect();

    let variety = apply_variety_guard(&mut days, catalog, &GUARDED_MEAL_TYPES);

    RecipeResolution {
        plan: NutritionPlan {
            days,
            daily_calories: plan.daily_calories,
            protein_g: plan.protein_g,
            carbs_g: plan.carbs_g,
            fat_g: plan.fat_g,
        },
        has_catalog: true,
        fallback_applied,
        invalid_references,
        variety,
    }
}

/// Rebuild a meal around a catalog recipe
fn substitute_recipe(meal: &Meal, recipe: &CatalogRecipe) -> Meal {
    Meal {
        meal_type: meal.meal_type,
        title: recipe.name.clone(),
        description: recipe.description.clone(),
        recipe_id: Some(recipe.id.clone()),
        macros: recipe.macros,
    }
}

/// Reassign guarded slots that repeat a recipe across the week
///
/// Any recipe id occupying more than one guarded slot marks the guard as
/// applied, and every slot holding a repeated id is reassigned. Slots are
/// walked in (day, meal) order; each reassignment takes the first catalog
/// recipe unused in the week's guarded slots, falling back to one unused
/// that day, and finally to the cycled `(day_index + meal_index)` pick when
/// the catalog is exhausted. Same-day distinctness therefore holds whenever
/// the catalog allows it.
fn apply_variety_guard(
    days: &mut [NutritionDay],
    catalog: &[CatalogRecipe],
    guarded: &[MealType],
) -> VarietyGuardReport {
    let slots: Vec<(usize, usize)> = days
        .iter()
        .enumerate()
        .flat_map(|(day_index, day)| {
            day.meals
                .iter()
                .enumerate()
                .filter(|(_, meal)| guarded.contains(&meal.meal_type))
                .map(move |(meal_index, _)| (day_index, meal_index))
        })
        .collect();

    let mut usage: HashMap<String, usize> = HashMap::new();
    for &(day_index, meal_index) in &slots {
        if let Some(id) = &days[day_index].meals[meal_index].recipe_id {
            *usage.entry(id.clone()).or_insert(0) += 1;
        }
    }
    let repeated: HashSet<&str> = usage
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(id, _)| id.as_str())
        .collect();

    let applied = !repeated.is_empty();
    let had_enough_unique_recipes = catalog.len() >= slots.len();
    let mut replacements = 0;

    if applied {
        // Ids kept by non-repeated slots stay reserved for the whole week
        let mut used_week: HashSet<String> = slots
            .iter()
            .filter_map(|&(day_index, meal_index)| {
                days[day_index].meals[meal_index]
                    .recipe_id
                    .clone()
                    .filter(|id| !repeated.contains(id.as_str()))
            })
            .collect();

        for &(day_index, meal_index) in &slots {
            let holds_repeat = days[day_index].meals[meal_index]
                .recipe_id
                .as_deref()
                .is_some_and(|id| repeated.contains(id));
            if !holds_repeat {
                continue;
            }

            let used_day: HashSet<String> = days[day_index]
                .meals
                .iter()
                .enumerate()
                .filter(|(other_index, meal)| {
                    *other_index != meal_index && guarded.contains(&meal.meal_type)
                })
                .filter_map(|(_, meal)| meal.recipe_id.clone())
                .collect();

            let pick = catalog
                .iter()
                .find(|recipe| !used_week.contains(&recipe.id))
                .or_else(|| catalog.iter().find(|recipe| !used_day.contains(&recipe.id)))
                .unwrap_or(&catalog[(day_index + meal_index) % catalog.len()]);

            debug!(
                day = %days[day_index].label,
                recipe = %pick.id,
                "variety guard reassignment"
            );
            let replacement = substitute_recipe(&days[day_index].meals[meal_index], pick);
            days[day_index].meals[meal_index] = replacement;
            used_week.insert(pick.id.clone());
            replacements += 1;
        }
    }

    let unique_recipe_ids_week: usize = slots
        .iter()
        .filter_map(|&(day_index, meal_index)| days[day_index].meals[meal_index].recipe_id.as_deref())
        .collect::<HashSet<_>>()
        .len();

    VarietyGuardReport {
        applied,
        replacements,
        unique_recipe_ids_week,
        had_enough_unique_recipes,
    }
}
