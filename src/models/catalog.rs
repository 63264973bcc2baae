// ABOUTME: Canonical exercise and recipe catalog entries
// ABOUTME: Read-only reference data plan references are resolved against
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

use crate::models::plan::MacroRecord;
use serde::{Deserialize, Serialize};

/// Anything the deterministic selector can rank: a stable id plus a
/// display name
pub trait CatalogEntry {
    /// Stable catalog identifier
    fn id(&self) -> &str;
    /// Display name
    fn name(&self) -> &str;
}

/// Canonical exercise entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogExercise {
    /// Stable catalog identifier, e.g. "`ex_squat`"
    pub id: String,
    /// Canonical display name
    pub name: String,
    /// Illustration URL, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Equipment tags, e.g. "barbell", "bodyweight"
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Muscle-group tags, e.g. "quads", "lats"
    #[serde(default)]
    pub muscle_groups: Vec<String>,
}

impl CatalogEntry for CatalogExercise {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Canonical recipe entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecipe {
    /// Stable catalog identifier, e.g. "`rcp_oatmeal`"
    pub id: String,
    /// Canonical display name
    pub name: String,
    /// Preparation description, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Macro record per serving
    pub macros: MacroRecord,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl CatalogEntry for CatalogRecipe {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
