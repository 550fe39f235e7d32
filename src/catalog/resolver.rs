// ABOUTME: Ingredient resolver mapping raw detected labels onto canonical catalog entries
// ABOUTME: Drops blank labels, collapses duplicates, preserves first-occurrence order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Ingredient Resolver
//!
//! Turns the gateway's transient [`DetectedItem`] list into canonical
//! [`Product`] entries backed by the shared catalog. Resolution policy:
//!
//! - Blank or whitespace-only labels are dropped silently (logged at debug).
//! - Duplicate items resolving to the same product id are collapsed; the
//!   output keeps first-occurrence order and contains each product at most
//!   once.
//! - Unknown labels create a catalog entry on first sighting, so resolving
//!   the same sequence twice yields identical ids.

use crate::catalog::store::ProductCatalog;
use crate::models::{DetectedItem, Product};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Resolves detected items against an injected product catalog
#[derive(Clone)]
pub struct ProductResolver {
    catalog: Arc<ProductCatalog>,
}

impl ProductResolver {
    /// Create a resolver over the given catalog
    #[must_use]
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// Resolve a batch of detected items into canonical products.
    ///
    /// Output order follows input order; items whose labels resolve to the
    /// same product appear once, at the position of their first occurrence.
    pub async fn resolve(&self, items: &[DetectedItem]) -> Vec<Product> {
        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut resolved = Vec::new();

        for item in items {
            if item.name.trim().is_empty() {
                debug!("dropping blank detection label");
                continue;
            }

            let product = self
                .catalog
                .insert_or_find(&item.name, item.category.as_deref())
                .await;

            if seen.insert(product.id) {
                resolved.push(product);
            }
        }

        resolved
    }

    /// The catalog this resolver writes into
    #[must_use]
    pub fn catalog(&self) -> &Arc<ProductCatalog> {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: Option<&str>) -> DetectedItem {
        DetectedItem {
            name: name.to_owned(),
            category: category.map(ToOwned::to_owned),
        }
    }

    #[tokio::test]
    async fn test_blank_labels_produce_nothing() {
        let resolver = ProductResolver::new(Arc::new(ProductCatalog::new()));
        let resolved = resolver.resolve(&[item("  ", None), item("", None)]).await;

        assert!(resolved.is_empty());
        assert!(resolver.catalog().is_empty().await);
    }

    #[tokio::test]
    async fn test_equal_normalized_labels_share_an_id() {
        let resolver = ProductResolver::new(Arc::new(ProductCatalog::new()));
        let resolved = resolver
            .resolve(&[item("Tomato", Some("Vegetable")), item("  tomato ", None)])
            .await;

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Tomato");
    }

    #[tokio::test]
    async fn test_output_preserves_first_occurrence_order() {
        let resolver = ProductResolver::new(Arc::new(ProductCatalog::new()));
        let resolved = resolver
            .resolve(&[
                item("Garlic", Some("Vegetable")),
                item("Tomato", Some("Vegetable")),
                item("Garlic", None),
            ])
            .await;

        let names: Vec<&str> = resolved.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Garlic", "Tomato"]);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent_across_calls() {
        let resolver = ProductResolver::new(Arc::new(ProductCatalog::new()));
        let batch = [item("Tomato", Some("Vegetable")), item("Basil", Some("Herb"))];

        let first: Vec<Uuid> = resolver.resolve(&batch).await.iter().map(|p| p.id).collect();
        let second: Vec<Uuid> = resolver.resolve(&batch).await.iter().map(|p| p.id).collect();

        assert_eq!(first, second);
        assert_eq!(resolver.catalog().len().await, 2);
    }
}
