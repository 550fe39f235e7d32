// ABOUTME: Pipeline orchestrator composing detection, resolution, and matching
// ABOUTME: Strict detect -> resolve -> match sequencing, no retries, empty results are valid
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Analysis Pipeline
//!
//! Composes the detection gateway, ingredient resolver, and recipe matcher
//! into one request/response cycle. Each stage's failure handling lives in
//! that stage: the gateway degrades to fallbacks, the resolver and matcher
//! are pure and only drop malformed records. The orchestrator itself never
//! retries.
//!
//! Empty outputs (no products detected, no recipes found) are valid
//! terminal states, not errors.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::catalog::{ProductCatalog, ProductResolver};
use crate::config::GatewayConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{AnthropicProvider, DetectionGateway};
use crate::models::AnalysisResult;
use crate::recipes::{match_recipes, RecipeStore};

/// Orchestrates one image-to-recipes request cycle
pub struct AnalysisPipeline {
    gateway: DetectionGateway,
    resolver: ProductResolver,
    recipe_store: Arc<RecipeStore>,
    match_limit: usize,
}

impl AnalysisPipeline {
    /// Compose a pipeline from its injected stages
    #[must_use]
    pub fn new(gateway: DetectionGateway, resolver: ProductResolver, match_limit: usize) -> Self {
        let recipe_store = gateway.recipe_store().clone();
        Self {
            gateway,
            resolver,
            recipe_store,
            match_limit,
        }
    }

    /// Compose a pipeline from environment configuration: Anthropic-backed
    /// gateway, fresh catalog, and the bundled seed recipes.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails or the provider API
    /// key is missing.
    pub fn from_env() -> AppResult<Self> {
        let config = GatewayConfig::from_env().map_err(|e| AppError::config(e.to_string()))?;
        let provider = AnthropicProvider::from_env(config.model.clone())?;
        let limit = config.match_limit;

        let gateway = DetectionGateway::new(
            Arc::new(provider),
            Arc::new(RecipeStore::new()),
            config,
        );
        let resolver = ProductResolver::new(Arc::new(ProductCatalog::new()));

        Ok(Self::new(gateway, resolver, limit))
    }

    /// Process one request: detect items in the image, resolve them to
    /// catalog products, and rank recipes against them.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the image payload is empty. Upstream errors only
    /// surface when the gateway is configured to hard-fail.
    #[instrument(skip(self, image_payload, excluded_allergens))]
    pub async fn process(
        &self,
        image_payload: &str,
        excluded_allergens: &[String],
    ) -> AppResult<AnalysisResult> {
        if image_payload.trim().is_empty() {
            return Err(AppError::invalid_input("empty image payload"));
        }

        let detection = self.gateway.detect(image_payload).await?;
        debug!(tier = ?detection.tier, items = detection.value.len(), "detection complete");

        let products = self.resolver.resolve(&detection.value).await;

        // Enrichment: synthesized recipes land in the store before matching.
        // A degraded synthesis leaves the seed catalog in place.
        if !products.is_empty() {
            let synthesis = self
                .gateway
                .suggest_recipes(&products, excluded_allergens)
                .await?;
            debug!(tier = ?synthesis.tier, recipes = synthesis.value.len(), "synthesis complete");
        }

        let recipes = match_recipes(
            &self.recipe_store.all(),
            &products,
            excluded_allergens,
            self.match_limit,
        );

        info!(
            products = products.len(),
            recipes = recipes.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            detected_products: products,
            recipes,
            timestamp: Utc::now(),
        })
    }
}
