// ABOUTME: Detection gateway wrapping the vision provider with timeout and fallback policy
// ABOUTME: Absorbs upstream failure into deterministic substitutes unless hard-fail is set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Detection Gateway
//!
//! Boundary adapter to the external reasoning service. Each call makes one
//! attempt, bounded by the configured timeout; retries belong upstream of
//! this crate. Failure (unreachable, timed out, unparseable) degrades to
//! the fallback tier rather than propagating, unless `hard_fail` is
//! configured, in which case the upstream error surfaces to the
//! orchestrator.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::parser::{self, Extraction, ParseTier};
use super::VisionProvider;
use crate::config::GatewayConfig;
use crate::constants::{limits, service_names};
use crate::errors::{AppError, AppResult};
use crate::models::{DetectedItem, Product, Recipe};
use crate::recipes::RecipeStore;

/// Media type assumed when the payload carries no data-URL prefix
const DEFAULT_MEDIA_TYPE: &str = "image/jpeg";

/// Gateway over a vision provider, owning failure policy and normalization
pub struct DetectionGateway {
    provider: Arc<dyn VisionProvider>,
    recipe_store: Arc<RecipeStore>,
    config: GatewayConfig,
}

impl DetectionGateway {
    /// Create a gateway over the given provider and recipe store
    #[must_use]
    pub fn new(
        provider: Arc<dyn VisionProvider>,
        recipe_store: Arc<RecipeStore>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            provider,
            recipe_store,
            config,
        }
    }

    /// Detect food items in a base64 image payload.
    ///
    /// Accepts raw base64 or a `data:image/...;base64,` URL. The result is
    /// tagged with the tier that produced it; the fallback tier carries the
    /// configured substitute items verbatim.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the payload is not valid base64 (caller's
    /// responsibility, never degraded). Upstream failures only surface when
    /// `hard_fail` is configured.
    #[instrument(skip(self, image_payload), fields(provider = self.provider.name()))]
    pub async fn detect(&self, image_payload: &str) -> AppResult<Extraction<Vec<DetectedItem>>> {
        let (media_type, data) = split_data_url(image_payload);

        // Caller errors are reported immediately, not absorbed by fallback
        if BASE64.decode(data).is_err() {
            return Err(AppError::invalid_input("image payload is not valid base64"));
        }

        let outcome = timeout(
            self.config.timeout,
            self.provider.analyze_image(data, media_type),
        )
        .await;

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return self.degrade_items("upstream call failed", Some(e)),
            Err(_) => {
                let e = AppError::external_timeout(service_names::VISION, self.config.timeout_secs());
                return self.degrade_items("upstream call timed out", Some(e));
            }
        };

        match parser::extract_detected_items(&text) {
            Some(mut extraction) => {
                extraction.value.truncate(limits::MAX_DETECTED_ITEMS);
                debug!(
                    tier = ?extraction.tier,
                    count = extraction.value.len(),
                    "detection normalized"
                );
                Ok(extraction)
            }
            None => self.degrade_items("no parseable structured data in response", None),
        }
    }

    /// Ask the reasoning service for recipe suggestions and cache any
    /// strictly-parsed results into the recipe store.
    ///
    /// The fallback tier is an empty synthesis: the seed catalog still
    /// feeds the matcher, so degraded requests lose enrichment, not
    /// recipes.
    ///
    /// # Errors
    ///
    /// Only when `hard_fail` is configured and the upstream call failed or
    /// returned nothing parseable.
    #[instrument(skip(self, products, excluded_allergens), fields(provider = self.provider.name()))]
    pub async fn suggest_recipes(
        &self,
        products: &[Product],
        excluded_allergens: &[String],
    ) -> AppResult<Extraction<Vec<Recipe>>> {
        let names: Vec<String> = products.iter().map(|p| p.name.clone()).collect();
        let prompt = super::prompts::recipe_suggestion_prompt(&names, excluded_allergens);

        let outcome = timeout(self.config.timeout, self.provider.complete(&prompt)).await;

        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return self.degrade_recipes("upstream call failed", Some(e)),
            Err(_) => {
                let e = AppError::external_timeout(service_names::VISION, self.config.timeout_secs());
                return self.degrade_recipes("upstream call timed out", Some(e));
            }
        };

        match parser::extract_recipes(&text) {
            Some(extraction) => {
                self.recipe_store.cache_suggestions(&extraction.value);
                debug!(count = extraction.value.len(), "cached synthesized recipes");
                Ok(extraction)
            }
            None => self.degrade_recipes("no parseable recipe data in response", None),
        }
    }

    /// The recipe store this gateway enriches
    #[must_use]
    pub fn recipe_store(&self) -> &Arc<RecipeStore> {
        &self.recipe_store
    }

    fn degrade_items(
        &self,
        reason: &str,
        source: Option<AppError>,
    ) -> AppResult<Extraction<Vec<DetectedItem>>> {
        if self.config.hard_fail {
            return Err(source.unwrap_or_else(|| {
                AppError::external_service(service_names::VISION, reason.to_owned())
            }));
        }

        warn!(reason, "detection degraded to fallback items");
        Ok(Extraction::new(
            ParseTier::Fallback,
            self.config.fallback_items.clone(),
        ))
    }

    fn degrade_recipes(
        &self,
        reason: &str,
        source: Option<AppError>,
    ) -> AppResult<Extraction<Vec<Recipe>>> {
        if self.config.hard_fail {
            return Err(source.unwrap_or_else(|| {
                AppError::external_service(service_names::VISION, reason.to_owned())
            }));
        }

        warn!(reason, "recipe synthesis degraded, matcher keeps seed catalog");
        Ok(Extraction::new(ParseTier::Fallback, Vec::new()))
    }
}

/// Split a payload into (`media_type`, base64 data), stripping any
/// `data:<media>;base64,` prefix
fn split_data_url(payload: &str) -> (&str, &str) {
    if let Some(rest) = payload.strip_prefix("data:") {
        if let Some((media_type, data)) = rest.split_once(";base64,") {
            return (media_type, data);
        }
    }
    (DEFAULT_MEDIA_TYPE, payload)
}
