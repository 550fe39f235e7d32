// ABOUTME: Integration tests for the detection gateway degradation policy
// ABOUTME: Covers strict, heuristic, and fallback tiers plus timeout and hard-fail behavior
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! Gateway policy tests:
//! - which tier produced a result is observable
//! - upstream failure, timeout, and unparseable output degrade to fallback
//! - the hard-fail toggle propagates instead of degrading

mod common;

use common::{test_config, test_gateway, MockVisionProvider, Script, TOMATO_GARLIC_DETECTION};
use fridge_chef::errors::ErrorCode;
use fridge_chef::llm::ParseTier;
use fridge_chef::models::Product;
use uuid::Uuid;

fn product(name: &str, synonyms: &[&str]) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        category: "Vegetable".into(),
        synonyms: synonyms.iter().map(|s| (*s).to_owned()).collect(),
        allergens: vec![],
    }
}

// ============================================================================
// Detection Tiers
// ============================================================================

#[tokio::test]
async fn test_strict_detection() {
    let gateway = test_gateway(
        MockVisionProvider::new(Script::reply(TOMATO_GARLIC_DETECTION), Script::Fail),
        test_config(),
    );

    let extraction = gateway.detect("AAAA").await.unwrap();
    assert_eq!(extraction.tier, ParseTier::Strict);
    assert_eq!(extraction.value.len(), 2);
    assert_eq!(extraction.value[0].name, "Tomatoes");
}

#[tokio::test]
async fn test_heuristic_detection_when_json_is_absent() {
    let gateway = test_gateway(
        MockVisionProvider::new(
            Script::reply("Here is what I found:\nTomato - Vegetable\nEggs - Protein"),
            Script::Fail,
        ),
        test_config(),
    );

    let extraction = gateway.detect("AAAA").await.unwrap();
    assert_eq!(extraction.tier, ParseTier::Heuristic);
    assert_eq!(extraction.value[0].name, "Tomato");
}

#[tokio::test]
async fn test_empty_detection_is_reported_not_substituted() {
    // Upstream truthfully reporting nothing edible is a strict result,
    // never replaced by fallback items.
    let gateway = test_gateway(
        MockVisionProvider::new(Script::reply("No food visible here: []"), Script::Fail),
        test_config(),
    );

    let extraction = gateway.detect("AAAA").await.unwrap();
    assert_eq!(extraction.tier, ParseTier::Strict);
    assert!(extraction.value.is_empty());
}

#[tokio::test]
async fn test_unparseable_response_degrades_to_fallback() {
    let config = test_config();
    let expected = config.fallback_items.clone();
    let gateway = test_gateway(
        MockVisionProvider::new(
            Script::reply("I couldn't identify anything edible in this image."),
            Script::Fail,
        ),
        config,
    );

    let extraction = gateway.detect("AAAA").await.unwrap();
    assert_eq!(extraction.tier, ParseTier::Fallback);
    assert_eq!(extraction.value, expected);
    assert!(!extraction.value.is_empty());
}

#[tokio::test]
async fn test_upstream_error_degrades_to_fallback() {
    let gateway = test_gateway(
        MockVisionProvider::new(Script::Fail, Script::Fail),
        test_config(),
    );

    let extraction = gateway.detect("AAAA").await.unwrap();
    assert_eq!(extraction.tier, ParseTier::Fallback);
}

#[tokio::test]
async fn test_timeout_degrades_to_fallback() {
    let gateway = test_gateway(
        MockVisionProvider::new(Script::Hang, Script::Fail),
        test_config(),
    );

    let extraction = gateway.detect("AAAA").await.unwrap();
    assert_eq!(extraction.tier, ParseTier::Fallback);
}

#[tokio::test]
async fn test_malformed_base64_is_an_input_error_not_a_fallback() {
    let gateway = test_gateway(
        MockVisionProvider::new(Script::reply(TOMATO_GARLIC_DETECTION), Script::Fail),
        test_config(),
    );

    let error = gateway.detect("not base64!!!").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

// ============================================================================
// Hard-fail Toggle
// ============================================================================

#[tokio::test]
async fn test_hard_fail_propagates_upstream_error() {
    let mut config = test_config();
    config.hard_fail = true;

    let gateway = test_gateway(MockVisionProvider::new(Script::Fail, Script::Fail), config);

    let error = gateway.detect("AAAA").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
}

#[tokio::test]
async fn test_hard_fail_propagates_timeout() {
    let mut config = test_config();
    config.hard_fail = true;

    let gateway = test_gateway(MockVisionProvider::new(Script::Hang, Script::Fail), config);

    let error = gateway.detect("AAAA").await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalTimeout);
}

// ============================================================================
// Recipe Synthesis
// ============================================================================

#[tokio::test]
async fn test_synthesized_recipes_are_cached_in_store() {
    let response = r#"Sure! [{"name": "Tomato Garlic Confit",
        "ingredients": ["10 Tomatoes", "1 head Garlic", "Olive Oil"],
        "instructions": ["Slow-cook everything in oil."],
        "allergens": [], "prepTime": "10 min", "cookTime": "90 min",
        "servings": 4, "difficulty": "Easy"}]"#;

    let gateway = test_gateway(
        MockVisionProvider::new(Script::Fail, Script::reply(response)),
        test_config(),
    );

    let before = gateway.recipe_store().len();
    let products = [product("Tomatoes", &["tomato"]), product("Garlic", &["garlic"])];
    let extraction = gateway.suggest_recipes(&products, &[]).await.unwrap();

    assert_eq!(extraction.tier, ParseTier::Strict);
    assert_eq!(extraction.value.len(), 1);
    assert_eq!(gateway.recipe_store().len(), before + 1);

    let cached = gateway.recipe_store().get(extraction.value[0].id).unwrap();
    assert_eq!(cached.name, "Tomato Garlic Confit");
}

#[tokio::test]
async fn test_failed_synthesis_keeps_seed_catalog_intact() {
    let gateway = test_gateway(
        MockVisionProvider::new(Script::Fail, Script::Fail),
        test_config(),
    );

    let before = gateway.recipe_store().len();
    let products = [product("Tomatoes", &["tomato"])];
    let extraction = gateway.suggest_recipes(&products, &[]).await.unwrap();

    assert_eq!(extraction.tier, ParseTier::Fallback);
    assert!(extraction.value.is_empty());
    assert_eq!(gateway.recipe_store().len(), before);
}

#[tokio::test]
async fn test_non_json_recipe_response_is_fallback_not_error() {
    let gateway = test_gateway(
        MockVisionProvider::new(
            Script::Fail,
            Script::reply("1. Tomato Salad\n2. Garlic Bread"),
        ),
        test_config(),
    );

    let products = [product("Tomatoes", &["tomato"])];
    let extraction = gateway.suggest_recipes(&products, &[]).await.unwrap();
    assert_eq!(extraction.tier, ParseTier::Fallback);
}
