// ABOUTME: Pure label comparison helpers shared by the resolver and recipe matcher
// ABOUTME: Deliberately permissive bidirectional substring containment over normalized text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Label Matching
//!
//! The matching heuristic is bidirectional substring containment over
//! normalized (trimmed, lowercased) text. Source data is free text on both
//! sides: recipe ingredient lines like "2 cups diced Tomatoes" against
//! catalog keys like "tomato". Containment trades precision for recall,
//! which suits a best-effort suggestion feature. Allergen filtering never
//! goes through these helpers; it uses exact set membership.
//!
//! Kept as pure functions so the heuristic can be unit-tested in isolation
//! and swapped for a stricter or fuzzier algorithm without touching store
//! logic.

/// Normalize a label for comparison: trim surrounding whitespace and
/// lowercase. Display casing is never derived from this.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Bidirectional substring containment between two normalized labels.
///
/// Tolerates plural/singular and descriptor variance ("tomatoes" vs
/// "tomato", "diced onions" vs "onion"). Blank operands never overlap.
#[must_use]
pub fn labels_overlap(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// True when a free-text ingredient line overlaps any of the available
/// match keys. Both sides are expected pre-normalized.
#[must_use]
pub fn line_matches_any(line: &str, keys: &[String]) -> bool {
    keys.iter().any(|key| labels_overlap(line, key))
}
