// ABOUTME: Deterministic training plan assembly from catalog data alone
// ABOUTME: Focus rotation, seeded exercise selection, and fixed prescription tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Deterministic Fallback Builder
//!
//! Produces a complete, schedulable training plan with no generative call,
//! for when repeated generation and validation cycles keep failing. Day
//! focuses rotate through a fixed list, exercises come from the catalog via
//! the seeded selector (the focus string is the seed), and set/rep/rest
//! prescriptions come from small fixed policy tables. The only fatal
//! precondition is an empty catalog.

use crate::constants::schedule::TRAINING_DAY_SPACING_DAYS;
use crate::errors::{PlanError, PlanResult};
use crate::models::{CatalogExercise, TrainingDay, TrainingExercise, TrainingPlan};
use crate::planning::selector::{normalize_name, rank};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Ordered day focuses; day `i` uses entry `i % 7`, so an extended plan
/// revisits the first focus on day 8
pub const FOCUS_ROTATION: [&str; 7] = [
    "leg + core",
    "push",
    "pull",
    "posterior chain + glute",
    "mixed torso",
    "conditioning + core",
    "full body",
];

/// Name-substring patterns per focus keyword
///
/// A row applies when its key appears in the normalized focus label; the
/// union of all applying rows forms the match set for that focus.
const FOCUS_PATTERNS: [(&str, &[&str]); 9] = [
    ("leg", &["squat", "lunge", "leg", "calf", "step"]),
    ("push", &["push", "press", "dip", "chest", "shoulder", "tricep"]),
    ("pull", &["pull", "row", "chin", "lat", "curl"]),
    ("posterior", &["deadlift", "hinge", "bridge", "hamstring", "swing"]),
    ("glute", &["glute", "bridge", "thrust", "kickback"]),
    ("torso", &["press", "row", "push", "pull", "chest", "back"]),
    ("conditioning", &["burpee", "jump", "sprint", "mountain", "swing", "jack"]),
    ("core", &["plank", "crunch", "twist", "raise", "hollow", "dead bug"]),
    ("full", &["squat", "deadlift", "push", "row", "press", "lunge", "burpee"]),
];

/// Equipment tags workable outside a gym
const HOME_EQUIPMENT: [&str; 6] = [
    "bodyweight",
    "dumbbell",
    "dumbbells",
    "band",
    "kettlebell",
    "none",
];

/// Experience level of the plan owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    /// New to structured training
    Beginner,
    /// Consistent training history
    Intermediate,
    /// Years of structured training
    Advanced,
}

impl TrainingLevel {
    /// Exercises per fallback day for this level
    #[must_use]
    pub const fn exercises_per_day(&self) -> usize {
        match self {
            Self::Beginner => 3,
            Self::Intermediate => 4,
            Self::Advanced => 5,
        }
    }
}

/// Training goal driving the prescription table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    /// Muscle gain
    Bulk,
    /// Fat loss
    Cut,
    /// Hold current condition
    Maintain,
}

/// Where the plan will be executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLocation {
    /// Limited equipment; bodyweight-class exercises preferred
    Home,
    /// Full equipment available
    Gym,
}

/// Rep, rest, and tempo prescription for one goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    /// Lower bound of the rep range
    pub reps_min: u8,
    /// Upper bound of the rep range
    pub reps_max: u8,
    /// Rest between sets (seconds)
    pub rest_seconds: u32,
    /// Tempo notation, e.g. "3-1-1"
    pub tempo: String,
}

impl Prescription {
    /// Rep range as it appears on the plan, e.g. "6-10"
    #[must_use]
    pub fn reps_label(&self) -> String {
        format!("{}-{}", self.reps_min, self.reps_max)
    }
}

/// Immutable prescription tables for fallback plans
///
/// Deliberately simple policy numbers, passed by reference so the builder
/// stays pure and testable in isolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPolicy {
    /// Heavier, longer rests for muscle gain
    pub bulk: Prescription,
    /// Lighter, shorter rests for fat loss
    pub cut: Prescription,
    /// Middle-ground prescription
    pub maintain: Prescription,
    /// Working sets for beginners
    pub sets_beginner: u8,
    /// Working sets for intermediates
    pub sets_intermediate: u8,
    /// Working sets for advanced trainees
    pub sets_advanced: u8,
}

impl Default for WorkoutPolicy {
    fn default() -> Self {
        Self {
            bulk: Prescription {
                reps_min: 6,
                reps_max: 10,
                rest_seconds: 120,
                tempo: "3-1-1".to_owned(),
            },
            cut: Prescription {
                reps_min: 10,
                reps_max: 15,
                rest_seconds: 60,
                tempo: "2-0-2".to_owned(),
            },
            maintain: Prescription {
                reps_min: 8,
                reps_max: 12,
                rest_seconds: 90,
                tempo: "2-0-2".to_owned(),
            },
            sets_beginner: 3,
            sets_intermediate: 3,
            sets_advanced: 4,
        }
    }
}

impl WorkoutPolicy {
    /// Prescription row for a goal
    #[must_use]
    pub const fn prescription_for(&self, goal: TrainingGoal) -> &Prescription {
        match goal {
            TrainingGoal::Bulk => &self.bulk,
            TrainingGoal::Cut => &self.cut,
            TrainingGoal::Maintain => &self.maintain,
        }
    }

    /// Working sets for a level
    #[must_use]
    pub const fn sets_for(&self, level: TrainingLevel) -> u8 {
        match level {
            TrainingLevel::Beginner => self.sets_beginner,
            TrainingLevel::Intermediate => self.sets_intermediate,
            TrainingLevel::Advanced => self.sets_advanced,
        }
    }
}

/// Everything the fallback builder needs from user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPlanRequest {
    /// Experience level; drives exercises per day and sets
    pub level: TrainingLevel,
    /// Goal; drives the rep/rest/tempo prescription
    pub goal: TrainingGoal,
    /// Equipment constraint
    pub location: TrainingLocation,
    /// Number of training days to schedule
    pub days_per_week: usize,
    /// Date of the first training day
    pub start_date: NaiveDate,
}

/// Pick exercises for a day focus, deterministically
///
/// The catalog is ranked with the focus string as seed, filtered by
/// equipment when training at home (the filter is dropped entirely rather
/// than returning nothing), then partitioned into focus-pattern matches and
/// the rest. The concatenation is deduplicated by id, truncated to `count`,
/// and cycled round-robin to pad when the catalog has fewer entries than
/// requested.
///
/// # Errors
///
/// `PlanError::EmptyExerciseCatalog` when the catalog has no entries.
pub fn pick_exercises_for_focus(
    catalog: &[CatalogExercise],
    focus: &str,
    count: usize,
    location: TrainingLocation,
) -> PlanResult<Vec<CatalogExercise>> {
    if catalog.is_empty() {
        return Err(PlanError::EmptyExerciseCatalog);
    }

    let focus = normalize_name(focus);
    let ranked = rank(catalog, &focus);

    let equipped: Vec<&CatalogExercise> = ranked
        .iter()
        .copied()
        .filter(|exercise| fits_location(exercise, location))
        .collect();
    let candidates = if equipped.is_empty() {
        warn!(%focus, "equipment filter eliminated every candidate; dropping it");
        ranked
    } else {
        equipped
    };

    let keywords = keywords_for_focus(&focus);
    let (primary, rest): (Vec<&CatalogExercise>, Vec<&CatalogExercise>) = candidates
        .into_iter()
        .partition(|exercise| matches_keywords(exercise, &keywords));

    let mut seen: HashSet<&str> = HashSet::new();
    let pool: Vec<&CatalogExercise> = primary
        .into_iter()
        .chain(rest)
        .filter(|exercise| seen.insert(exercise.id.as_str()))
        .collect();

    if pool.len() < count {
        debug!(%focus, available = pool.len(), requested = count, "cycling catalog to pad selection");
    }
    Ok((0..count).map(|i| pool[i % pool.len()].clone()).collect())
}

/// Assemble a complete training plan from the catalog alone
///
/// Day focuses rotate through [`FOCUS_ROTATION`], dates advance every other
/// calendar day from the request's start date, and prescriptions come from
/// the supplied policy tables. Deterministic for identical inputs.
///
/// # Errors
///
/// `PlanError::EmptyExerciseCatalog` when the catalog has no entries.
pub fn build_fallback_training_plan(
    request: &FallbackPlanRequest,
    catalog: &[CatalogExercise],
    policy: &WorkoutPolicy,
) -> PlanResult<TrainingPlan> {
    if catalog.is_empty() {
        return Err(PlanError::EmptyExerciseCatalog);
    }

    let count = request.level.exercises_per_day();
    let sets = policy.sets_for(request.level);
    let prescription = policy.prescription_for(request.goal);

    let mut days = Vec::with_capacity(request.days_per_week);
    for day_index in 0..request.days_per_week {
        let focus = FOCUS_ROTATION[day_index % FOCUS_ROTATION.len()];
        let picks = pick_exercises_for_focus(catalog, focus, count, request.location)?;
        let date = request.start_date
            + Duration::days(TRAINING_DAY_SPACING_DAYS * day_index as i64);

        let exercises = picks
            .into_iter()
            .map(|pick| TrainingExercise {
                name: pick.name,
                exercise_id: Some(pick.id),
                image_url: pick.image_url,
                sets,
                reps: prescription.reps_label(),
                tempo: Some(prescription.tempo.clone()),
                rest_seconds: prescription.rest_seconds,
            })
            .collect();

        days.push(TrainingDay {
            label: format!("Day {}", day_index + 1),
            date: Some(date),
            focus: Some(focus.to_owned()),
            exercises,
        });
    }

    Ok(TrainingPlan { days })
}

/// Whether an exercise is workable at the given location
fn fits_location(exercise: &CatalogExercise, location: TrainingLocation) -> bool {
    match location {
        TrainingLocation::Gym => true,
        TrainingLocation::Home => {
            exercise.equipment.is_empty()
                || exercise
                    .equipment
                    .iter()
                    .any(|tag| HOME_EQUIPMENT.contains(&normalize_name(tag).as_str()))
        }
    }
}

/// Union of the pattern rows whose key appears in the focus label
fn keywords_for_focus(focus: &str) -> Vec<&'static str> {
    FOCUS_PATTERNS
        .iter()
        .filter(|(key, _)| focus.contains(key))
        .flat_map(|(_, keywords)| keywords.iter().copied())
        .collect()
}

/// Whether the exercise name contains any of the focus keywords
fn matches_keywords(exercise: &CatalogExercise, keywords: &[&str]) -> bool {
    let name = normalize_name(&exercise.name);
    keywords.iter().any(|keyword| name.contains(keyword))
}
