// ABOUTME: Environment configuration management for gateway policy settings
// ABOUTME: Parses timeouts, fallback behavior, and model selection from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! Environment-based configuration for the detection gateway and matcher

use crate::constants::{defaults, env_config};
use crate::models::DetectedItem;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::info;

/// Policy configuration for the detection gateway and recipe matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Model identifier sent to the vision provider
    pub model: String,
    /// Deadline for each upstream call
    pub timeout: Duration,
    /// When true, upstream failures propagate as errors instead of
    /// degrading to the fallback tier
    pub hard_fail: bool,
    /// Deterministic substitute items returned when detection degrades
    pub fallback_items: Vec<DetectedItem>,
    /// Maximum recipes returned per request
    pub match_limit: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            model: defaults::VISION_MODEL.into(),
            timeout: Duration::from_secs(defaults::VISION_TIMEOUT_SECS),
            hard_fail: false,
            fallback_items: defaults::FALLBACK_ITEMS
                .iter()
                .map(|(name, category)| DetectedItem {
                    name: (*name).to_owned(),
                    category: Some((*category).to_owned()),
                })
                .collect(),
            match_limit: defaults::MATCH_LIMIT,
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(model) = env::var(env_config::VISION_MODEL) {
            config.model = model;
        }

        if let Ok(raw) = env::var(env_config::VISION_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().with_context(|| {
                format!("invalid {}: {raw}", env_config::VISION_TIMEOUT_SECS)
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(raw) = env::var(env_config::HARD_FAIL) {
            config.hard_fail = raw == "true" || raw == "1";
        }

        if let Ok(raw) = env::var(env_config::MATCH_LIMIT) {
            config.match_limit = raw
                .parse()
                .with_context(|| format!("invalid {}: {raw}", env_config::MATCH_LIMIT))?;
        }

        info!(
            model = %config.model,
            timeout_secs = config.timeout.as_secs(),
            hard_fail = config.hard_fail,
            "gateway configuration loaded"
        );

        Ok(config)
    }

    /// Timeout in whole seconds, for error messages
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}
