// ABOUTME: Recipe store seeded from bundled JSON, with an id-keyed cache for synthesized recipes
// ABOUTME: Recipes are immutable once stored; growth is unbounded by design
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Recipe Store
//!
//! Seed recipes ship with the crate (`data/recipes.json`) and get their ids
//! at load time. Recipes synthesized by the gateway are cached by id in a
//! concurrent map. Entries are never mutated or evicted; unbounded growth
//! is a documented limitation for long-lived processes.

use crate::models::Recipe;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

/// Seed catalog bundled with the crate
const SEED_RECIPES: &str = include_str!("../../data/recipes.json");

/// Seed entry: a recipe before an id is assigned
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedRecipe {
    name: String,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    #[serde(default)]
    allergens: Vec<String>,
    prep_time: String,
    cook_time: String,
    servings: u32,
    difficulty: String,
}

impl From<SeedRecipe> for Recipe {
    fn from(seed: SeedRecipe) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: seed.name,
            ingredient_names: seed.ingredients,
            instructions: seed.instructions,
            allergens: seed.allergens,
            prep_time: seed.prep_time,
            cook_time: seed.cook_time,
            servings: seed.servings,
            difficulty: seed.difficulty,
        }
    }
}

/// Store of seed and synthesized recipes
#[derive(Debug)]
pub struct RecipeStore {
    seed: Vec<Recipe>,
    synthesized: DashMap<Uuid, Recipe>,
    /// Insertion order of synthesized ids, so `all()` stays deterministic
    order: std::sync::Mutex<Vec<Uuid>>,
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore {
    /// Create a store loaded with the bundled seed catalog
    #[must_use]
    pub fn new() -> Self {
        let seed = match serde_json::from_str::<Vec<SeedRecipe>>(SEED_RECIPES) {
            Ok(seeds) => seeds.into_iter().map(Recipe::from).collect(),
            Err(e) => {
                warn!(error = %e, "failed to parse bundled recipe seed");
                Vec::new()
            }
        };

        info!(count = seed.len(), "loaded seed recipes");
        Self {
            seed,
            synthesized: DashMap::new(),
            order: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a store with an explicit seed catalog (test injection point)
    #[must_use]
    pub fn with_seed(seed: Vec<Recipe>) -> Self {
        Self {
            seed,
            synthesized: DashMap::new(),
            order: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Look up a recipe by id, seed or synthesized
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Recipe> {
        self.seed
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .or_else(|| self.synthesized.get(&id).map(|r| r.clone()))
    }

    /// Cache synthesized recipes by id. Already-cached ids are kept as-is;
    /// recipes are immutable once stored.
    pub fn cache_suggestions(&self, recipes: &[Recipe]) {
        let mut order = self.order.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        for recipe in recipes {
            if let Entry::Vacant(slot) = self.synthesized.entry(recipe.id) {
                slot.insert(recipe.clone());
                order.push(recipe.id);
            }
        }
    }

    /// All recipes: seed catalog first, then synthesized in insertion order
    #[must_use]
    pub fn all(&self) -> Vec<Recipe> {
        let order = self.order.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut recipes = self.seed.clone();
        recipes.extend(
            order
                .iter()
                .filter_map(|id| self.synthesized.get(id).map(|r| r.clone())),
        );
        recipes
    }

    /// Number of recipes held, seed plus synthesized
    #[must_use]
    pub fn len(&self) -> usize {
        self.seed.len() + self.synthesized.len()
    }

    /// True when the store holds no recipes at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
