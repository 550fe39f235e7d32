// ABOUTME: Recipe selection, allergen filtering, and deterministic ranking
// ABOUTME: Allergen exclusion is absolute and exact-membership; relevance never overrides it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Recipe Matcher
//!
//! Ranks a candidate recipe set against resolved products and a caller
//! exclusion set:
//!
//! 1. Flatten product synonyms into the available match keys.
//! 2. A recipe is a candidate when at least one ingredient line overlaps at
//!    least one key (bidirectional substring, see [`crate::catalog::matching`]).
//! 3. Candidates whose allergens intersect the exclusion set are removed.
//!    The comparison is case-insensitive exact membership, never substring,
//!    and no score can resurrect an excluded recipe.
//! 4. Remaining candidates are sorted by the number of distinct overlapping
//!    ingredient lines, descending. The sort is stable, so ties keep their
//!    pre-sort relative order and identical inputs produce identical output.
//! 5. The result is truncated to `limit`.

use crate::catalog::matching::{line_matches_any, normalize_label};
use crate::errors::{AppError, AppResult};
use crate::models::{Product, Recipe};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Select, filter, and rank recipes against resolved products.
///
/// Returns at most `limit` recipes. An empty result is a valid outcome:
/// it means no recipe overlapped the available ingredients (or every
/// overlapping recipe was excluded by allergens).
#[must_use]
pub fn match_recipes(
    recipes: &[Recipe],
    products: &[Product],
    excluded_allergens: &[String],
    limit: usize,
) -> Vec<Recipe> {
    let available_keys: Vec<String> = products
        .iter()
        .flat_map(|p| p.synonyms.iter().map(|s| normalize_label(s)))
        .collect();

    if available_keys.is_empty() {
        return Vec::new();
    }

    let exclusions: HashSet<String> = excluded_allergens
        .iter()
        .map(|a| normalize_label(a))
        .filter(|a| !a.is_empty())
        .collect();

    let mut scored: Vec<(usize, &Recipe)> = recipes
        .iter()
        .filter_map(|recipe| {
            if let Err(error) = validate_record(recipe) {
                warn!(%error, "skipping recipe record");
                return None;
            }

            let score = match_count(recipe, &available_keys);
            if score == 0 {
                return None;
            }

            // Hard filter, applied after candidacy: allergen safety takes
            // precedence over relevance.
            if recipe
                .allergens
                .iter()
                .any(|a| exclusions.contains(&normalize_label(a)))
            {
                debug!(recipe = %recipe.name, "excluded by allergens");
                return None;
            }

            Some((score, recipe))
        })
        .collect();

    // Vec::sort_by is stable: ties keep candidate order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(limit);

    scored.into_iter().map(|(_, recipe)| recipe.clone()).collect()
}

/// Shape check applied to every candidate before scoring. A failing record
/// is skipped and logged; the batch continues.
fn validate_record(recipe: &Recipe) -> AppResult<()> {
    if recipe.name.trim().is_empty() {
        return Err(AppError::validation(format!("recipe {} has no name", recipe.id)));
    }
    if recipe.ingredient_names.is_empty() {
        return Err(AppError::validation(format!(
            "recipe {} has no ingredient lines",
            recipe.id
        )));
    }
    Ok(())
}

/// Number of distinct ingredient lines overlapping the available keys
fn match_count(recipe: &Recipe, available_keys: &[String]) -> usize {
    recipe
        .ingredient_names
        .iter()
        .filter(|line| line_matches_any(&normalize_label(line), available_keys))
        .count()
}
