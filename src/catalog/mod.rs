// ABOUTME: Catalog module for canonical product records and label resolution
// ABOUTME: Store holds append-only product entries; resolver maps raw labels onto them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Product Catalog
//!
//! Canonical ingredient ("product") records, addressable by identity and by
//! permissive fuzzy name lookup. The store grows append-only from newly
//! observed labels; the resolver turns raw detected items into catalog
//! entries, creating them on first sighting.

/// Pure label comparison helpers
pub mod matching;
/// Ingredient resolver over the catalog store
pub mod resolver;
/// Shared in-memory product store
pub mod store;

pub use matching::{labels_overlap, normalize_label};
pub use resolver::ProductResolver;
pub use store::ProductCatalog;
