// ABOUTME: Seeded deterministic ranking over catalog entries
// ABOUTME: FNV-1a hash of seed:id:normalized-name with id tie-break gives a strict total order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Vitaplan Fitness Intelligence

//! # Deterministic Selector
//!
//! Produces a reproducible shuffle-like total order over catalog items for a
//! given seed string. The same `(seed, id, name)` inputs rank identically on
//! every run and host, which is what makes fallback substitution and
//! fallback plan assembly replayable.

use crate::models::CatalogEntry;

/// FNV-1a 32-bit offset basis
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
/// FNV-1a 32-bit prime
const FNV_PRIME: u32 = 16_777_619;

/// Fold a Latin letter with a diacritic down to its ASCII base
///
/// Input is expected to be lowercased already; unknown characters pass
/// through unchanged.
const fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Normalize a display name for hashing and matching: lowercase, strip
/// Latin diacritics, collapse whitespace runs to single spaces
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    let folded: String = raw.to_lowercase().chars().map(fold_diacritic).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 32-bit FNV-1a over a byte slice
fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
        })
}

/// Hash one catalog item under a seed
///
/// The digest covers `seed:id:normalized-name`, so changing any of the
/// three moves the item in the ranking.
#[must_use]
pub fn seeded_hash(seed: &str, id: &str, name: &str) -> u32 {
    let key = format!("{seed}:{id}:{}", normalize_name(name));
    fnv1a_32(key.as_bytes())
}

/// Rank catalog items into a reproducible pseudo-shuffled order
///
/// Ascending by seeded hash; ties broken by id lexical order so the result
/// is a strict total order. Pure, O(n log n).
#[must_use]
pub fn rank<'a, T: CatalogEntry>(catalog: &'a [T], seed: &str) -> Vec<&'a T> {
    let mut keyed: Vec<(u32, &T)> = catalog
        .iter()
        .map(|item| (seeded_hash(seed, item.id(), item.name()), item))
        .collect();
    keyed.sort_by(|(hash_a, a), (hash_b, b)| hash_a.cmp(hash_b).then_with(|| a.id().cmp(b.id())));
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogExercise;

    fn exercise(id: &str, name: &str) -> CatalogExercise {
        CatalogExercise {
            id: id.to_owned(),
            name: name.to_owned(),
            image_url: None,
            equipment: Vec::new(),
            muscle_groups: Vec::new(),
        }
    }

    #[test]
    fn normalize_strips_accents_and_collapses_whitespace() {
        assert_eq!(normalize_name("  Sentadilla   Búlgara "), "sentadilla bulgara");
        assert_eq!(normalize_name("Press Francés"), "press frances");
        assert_eq!(normalize_name("Curl\tMartillo"), "curl martillo");
    }

    #[test]
    fn rank_is_deterministic() {
        let catalog = vec![
            exercise("ex_squat", "Back Squat"),
            exercise("ex_pushup", "Push Up"),
            exercise("ex_row", "Barbell Row"),
            exercise("ex_plank", "Plank"),
        ];
        let first: Vec<&str> = rank(&catalog, "push").iter().map(|e| e.id.as_str()).collect();
        let second: Vec<&str> = rank(&catalog, "push").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn rank_is_a_permutation() {
        let catalog: Vec<CatalogExercise> = (0..50)
            .map(|i| exercise(&format!("ex_{i:02}"), &format!("Exercise {i}")))
            .collect();
        let ranked = rank(&catalog, "seed");
        assert_eq!(ranked.len(), catalog.len());
        let mut ids: Vec<&str> = ranked.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn different_seeds_reorder() {
        let catalog: Vec<CatalogExercise> = (0..20)
            .map(|i| exercise(&format!("ex_{i:02}"), &format!("Exercise {i}")))
            .collect();
        let by_push: Vec<&str> = rank(&catalog, "push").iter().map(|e| e.id.as_str()).collect();
        let by_pull: Vec<&str> = rank(&catalog, "pull").iter().map(|e| e.id.as_str()).collect();
        assert_ne!(by_push, by_pull);
    }

    #[test]
    fn duplicate_names_keep_a_stable_order() {
        // Ordering must stay a strict total order even when names collide
        let catalog = vec![
            exercise("ex_b", "Clone"),
            exercise("ex_a", "Clone"),
            exercise("ex_c", "Clone"),
        ];
        let first: Vec<&str> = rank(&catalog, "seed").iter().map(|e| e.id.as_str()).collect();
        let second: Vec<&str> = rank(&catalog, "seed").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first, second);
    }
}
