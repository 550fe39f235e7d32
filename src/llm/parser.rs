// ABOUTME: Three-tier normalization of loosely-structured reasoning-service responses
// ABOUTME: Strict JSON-array extraction, then line-oriented heuristics, tagged by tier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Response Normalization
//!
//! The upstream service does not reliably emit well-formed output, so
//! extraction degrades through explicit tiers instead of nested error
//! handling:
//!
//! - **Strict**: locate the outermost `[...]` block and parse it as JSON.
//! - **Heuristic**: line-oriented pattern extraction ("Tomato - Vegetable",
//!   "Tomato (Vegetable)"). Detection only; recipes have no line form.
//! - **Fallback**: nothing parseable; the gateway substitutes its configured
//!   result.
//!
//! Every extraction is tagged with the tier that produced it so callers and
//! tests can assert where a result came from.

use crate::models::{DetectedItem, Recipe};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Which tier of the degradation ladder produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    /// Embedded JSON block parsed cleanly
    Strict,
    /// Line-oriented pattern extraction
    Heuristic,
    /// Configured substitute result
    Fallback,
}

/// A normalized result tagged with its producing tier
#[derive(Debug, Clone)]
pub struct Extraction<T> {
    pub tier: ParseTier,
    pub value: T,
}

impl<T> Extraction<T> {
    /// Tag a value with the tier that produced it
    pub const fn new(tier: ParseTier, value: T) -> Self {
        Self { tier, value }
    }
}

// "Tomato - Vegetable", "Tomato: Vegetable", "Tomato (Vegetable)"
fn line_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"([A-Za-z][A-Za-z ]*?)\s*[-:(]\s*([A-Za-z][A-Za-z ]*)")
                .map_err(|e| warn!(error = %e, "line pattern failed to compile"))
                .ok()
        })
        .as_ref()
}

/// Slice of `text` spanning the outermost `[...]` block, if any
fn outer_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

/// Extract detected items from a free-text response.
///
/// Tries the strict tier, then the heuristic tier. A well-formed empty
/// array is a valid strict result (upstream truthfully reporting nothing
/// detected), not a parse failure. Returns `None` only when nothing
/// parses; the caller then applies its fallback.
#[must_use]
pub fn extract_detected_items(text: &str) -> Option<Extraction<Vec<DetectedItem>>> {
    if let Some(block) = outer_array(text) {
        match serde_json::from_str::<Vec<DetectedItem>>(block) {
            Ok(items) => return Some(Extraction::new(ParseTier::Strict, items)),
            Err(_) => debug!("strict item parse failed, trying line heuristics"),
        }
    }

    let pattern = line_pattern()?;
    let items: Vec<DetectedItem> = text
        .lines()
        .filter_map(|line| {
            let caps = pattern.captures(line)?;
            let name = caps.get(1)?.as_str().trim().to_owned();
            let category = caps.get(2)?.as_str().trim().to_owned();
            (!name.is_empty()).then_some(DetectedItem {
                name,
                category: Some(category),
            })
        })
        .collect();

    (!items.is_empty()).then_some(Extraction::new(ParseTier::Heuristic, items))
}

/// A recipe as emitted upstream, before an id is assigned
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeDraft {
    name: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    #[serde(default)]
    allergens: Vec<String>,
    #[serde(default)]
    prep_time: String,
    #[serde(default)]
    cook_time: String,
    #[serde(default = "default_servings")]
    servings: u32,
    #[serde(default)]
    difficulty: String,
}

const fn default_servings() -> u32 {
    1
}

/// Extract synthesized recipes from a free-text response.
///
/// Strict tier only: there is no line-oriented form for a structured recipe,
/// so a failed parse goes straight to the caller's fallback. Ids are
/// assigned on acceptance.
#[must_use]
pub fn extract_recipes(text: &str) -> Option<Extraction<Vec<Recipe>>> {
    let block = outer_array(text)?;
    let drafts = serde_json::from_str::<Vec<RecipeDraft>>(block).ok()?;

    let recipes: Vec<Recipe> = drafts
        .into_iter()
        .filter(|draft| !draft.name.trim().is_empty() && !draft.ingredients.is_empty())
        .map(|draft| Recipe {
            id: Uuid::new_v4(),
            name: draft.name,
            ingredient_names: draft.ingredients,
            instructions: draft.instructions,
            allergens: draft.allergens,
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings,
            difficulty: draft.difficulty,
        })
        .collect();

    (!recipes.is_empty()).then_some(Extraction::new(ParseTier::Strict, recipes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_tier_parses_embedded_json() {
        let text = "Here are the items I found:\n\
                    [{\"name\": \"Tomato\", \"category\": \"Vegetable\"}, {\"name\": \"Egg\"}]\n\
                    Let me know if you need more detail.";

        let extraction = extract_detected_items(text).unwrap();
        assert_eq!(extraction.tier, ParseTier::Strict);
        assert_eq!(extraction.value.len(), 2);
        assert_eq!(extraction.value[0].name, "Tomato");
        assert!(extraction.value[1].category.is_none());
    }

    #[test]
    fn test_heuristic_tier_parses_item_lines() {
        let text = "I can see a few things:\n\
                    Tomato - Vegetable\n\
                    Chicken Breast (Meat)\n\
                    Rice: Grain";

        let extraction = extract_detected_items(text).unwrap();
        assert_eq!(extraction.tier, ParseTier::Heuristic);

        let names: Vec<&str> = extraction.value.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tomato", "Chicken Breast", "Rice"]);
        assert_eq!(extraction.value[1].category.as_deref(), Some("Meat"));
    }

    #[test]
    fn test_strict_empty_array_is_a_valid_empty_detection() {
        let extraction = extract_detected_items("I see no food in this image: []").unwrap();
        assert_eq!(extraction.tier, ParseTier::Strict);
        assert!(extraction.value.is_empty());
    }

    #[test]
    fn test_line_pattern_compiles() {
        assert!(line_pattern().is_some());
    }

    #[test]
    fn test_unparseable_text_yields_none() {
        assert!(extract_detected_items("I couldn't identify anything edible.").is_none());
        assert!(extract_detected_items("").is_none());
    }

    #[test]
    fn test_malformed_json_falls_through_to_heuristics() {
        let text = "[not json at all\nTomato - Vegetable";
        let extraction = extract_detected_items(text).unwrap();
        assert_eq!(extraction.tier, ParseTier::Heuristic);
        assert_eq!(extraction.value[0].name, "Tomato");
    }

    #[test]
    fn test_recipe_extraction_assigns_ids() {
        let text = r#"Sure! [{"name": "Tomato Salad", "ingredients": ["2 Tomatoes"],
            "instructions": ["Slice and serve."], "allergens": [],
            "prepTime": "5 min", "cookTime": "0 min", "servings": 2,
            "difficulty": "Easy"}]"#;

        let extraction = extract_recipes(text).unwrap();
        assert_eq!(extraction.tier, ParseTier::Strict);
        assert_eq!(extraction.value.len(), 1);
        assert_eq!(extraction.value[0].name, "Tomato Salad");
    }

    #[test]
    fn test_recipe_extraction_has_no_heuristic_tier() {
        assert!(extract_recipes("1. Tomato Salad\n2. Garlic Bread").is_none());
    }

    #[test]
    fn test_recipe_drafts_missing_required_shape_are_dropped() {
        let text = r#"[{"name": "", "ingredients": ["x"], "instructions": []},
                       {"name": "No Ingredients", "ingredients": [], "instructions": []}]"#;
        assert!(extract_recipes(text).is_none());
    }
}
