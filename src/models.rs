// ABOUTME: Core domain models for detected items, products, recipes, and analysis results
// ABOUTME: Serde shapes mirror the JSON wire format consumed by the transport layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Domain Models
//!
//! The data model of the pipeline:
//!
//! - [`DetectedItem`]: raw, unresolved label/category pair from the vision step
//! - [`Product`]: canonical catalog entity representing one resolved food item
//! - [`Recipe`]: a dish with free-text ingredient lines and an allergen set
//! - [`AnalysisResult`]: the composed response for one request cycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw label/category pair produced by the vision step for one request.
///
/// Transient: consumed once by the resolver, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedItem {
    /// Free-text label as reported upstream, original casing preserved
    pub name: String,
    /// Loose category ("Vegetable", "Meat", ...), absent when upstream
    /// did not provide one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl DetectedItem {
    /// Convenience constructor for a named item without a category
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
        }
    }
}

/// Canonical catalog entity representing one resolved food item.
///
/// `id`, `name`, and `category` are immutable after creation. `synonyms`
/// grows append-only through [`crate::catalog::ProductCatalog`]; entries are
/// lowercased match keys, never display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identifier, assigned at creation and never reused
    pub id: Uuid,
    /// Display name, original casing of the first sighting
    pub name: String,
    /// Loose category, `"Other"` when the detection carried none
    pub category: String,
    /// Lowercased match keys used by the resolver and matcher
    pub synonyms: Vec<String>,
    /// Allergen tokens associated with this product
    #[serde(default)]
    pub allergens: Vec<String>,
}

/// A recipe, either from the seed catalog or synthesized upstream.
///
/// Immutable once cached. `ingredient_names` entries are free-text lines
/// ("2 cups diced Tomatoes"), matched by substring, not key equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Opaque identifier, assigned when the recipe enters the store
    pub id: Uuid,
    pub name: String,
    /// Free-text ingredient lines
    #[serde(rename = "ingredients")]
    pub ingredient_names: Vec<String>,
    /// Preparation steps in order
    pub instructions: Vec<String>,
    /// Allergen tokens; compared case-insensitively against exclusion sets
    #[serde(default)]
    pub allergens: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub difficulty: String,
}

/// The composed response for one process cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Canonical products resolved from the detected items
    pub detected_products: Vec<Product>,
    /// Ranked recipes, allergen-filtered, truncated to the configured limit
    pub recipes: Vec<Recipe>,
    /// When the analysis completed (RFC 3339 on the wire)
    pub timestamp: DateTime<Utc>,
}
