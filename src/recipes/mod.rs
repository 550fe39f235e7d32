// ABOUTME: Recipe module: seeded store plus overlap-based matcher
// ABOUTME: Store caches synthesized recipes by id; matcher ranks against resolved products
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Recipes
//!
//! The recipe store holds the seed catalog shipped with the crate plus any
//! recipes synthesized by the detection gateway. The matcher selects,
//! allergen-filters, and ranks candidates against a set of resolved
//! products.

/// Recipe selection, filtering, and ranking
pub mod matcher;
/// Seeded recipe store with an id-keyed synthesis cache
pub mod store;

pub use matcher::match_recipes;
pub use store::RecipeStore;
