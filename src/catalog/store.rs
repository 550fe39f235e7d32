// ABOUTME: Shared in-memory product store with serialized insert-or-find
// ABOUTME: Single write lock covers lookup and creation so concurrent requests never double-create
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Product Store
//!
//! Explicitly constructed, explicitly owned store shared via `Arc` across
//! concurrent requests. All mutation goes through [`ProductCatalog::insert_or_find`]
//! and [`ProductCatalog::register_synonym`], both of which take the single
//! write lock, so two requests observing the same novel label resolve to one
//! entry. Growth is unbounded: there is no eviction policy, a known
//! limitation for long-lived processes.

use crate::catalog::matching::{labels_overlap, normalize_label};
use crate::constants::defaults;
use crate::models::Product;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// In-memory canonical product store
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: RwLock<Vec<Product>>,
}

impl ProductCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with existing products
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Find a product whose name or synonyms overlap the given label.
    ///
    /// `label` must already be normalized. The name comparison is exact
    /// equality on the normalized name; synonym comparison is bidirectional
    /// substring containment.
    pub async fn find(&self, label: &str) -> Option<Product> {
        let products = self.products.read().await;
        products.iter().find(|p| Self::matches(p, label)).cloned()
    }

    /// Look up a product by id
    pub async fn get(&self, id: Uuid) -> Option<Product> {
        let products = self.products.read().await;
        products.iter().find(|p| p.id == id).cloned()
    }

    /// Find the product matching `label`, or create one from the original
    /// (non-normalized) label if none exists.
    ///
    /// Holds the write lock across lookup and insert, which is what gives
    /// the at-most-one-creation-per-label guarantee under concurrency.
    ///
    /// On a hit, the returned product is the entry as it stood before this
    /// call; the normalized label is then registered as a synonym for future
    /// lookups. On a miss, the new entry carries the original casing as its
    /// display name and the normalized label as its first synonym.
    pub async fn insert_or_find(&self, label: &str, category: Option<&str>) -> Product {
        let normalized = normalize_label(label);
        debug_assert!(!normalized.is_empty(), "blank labels are dropped upstream");

        let mut products = self.products.write().await;

        if let Some(existing) = products.iter_mut().find(|p| Self::matches(p, &normalized)) {
            let snapshot = existing.clone();
            if !existing.synonyms.contains(&normalized) {
                existing.synonyms.push(normalized);
            }
            return snapshot;
        }

        let product = Product {
            id: Uuid::new_v4(),
            name: label.trim().to_owned(),
            category: category
                .map_or_else(|| defaults::PRODUCT_CATEGORY.to_owned(), ToOwned::to_owned),
            synonyms: vec![normalized],
            allergens: Vec::new(),
        };

        debug!(product = %product.name, id = %product.id, "created catalog entry");
        products.push(product.clone());
        product
    }

    /// Register an additional lowercased match key for an existing product.
    /// Synonyms only grow; nothing else about the entry changes.
    pub async fn register_synonym(&self, id: Uuid, key: &str) {
        let normalized = normalize_label(key);
        if normalized.is_empty() {
            return;
        }

        let mut products = self.products.write().await;
        if let Some(product) = products.iter_mut().find(|p| p.id == id) {
            if !product.synonyms.contains(&normalized) {
                product.synonyms.push(normalized);
            }
        }
    }

    /// Number of catalog entries
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// True when the catalog holds no entries
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Copy of all entries, in insertion order
    pub async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    fn matches(product: &Product, normalized: &str) -> bool {
        if normalize_label(&product.name) == normalized {
            return true;
        }
        product
            .synonyms
            .iter()
            .any(|synonym| labels_overlap(synonym, normalized))
    }
}
