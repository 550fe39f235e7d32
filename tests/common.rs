// ABOUTME: Shared test helpers: scripted vision provider and pipeline builders
// ABOUTME: Lets tests drive every gateway degradation path deterministically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use fridge_chef::catalog::{ProductCatalog, ProductResolver};
use fridge_chef::config::GatewayConfig;
use fridge_chef::errors::{AppError, AppResult};
use fridge_chef::llm::{DetectionGateway, VisionProvider};
use fridge_chef::pipeline::AnalysisPipeline;
use fridge_chef::recipes::RecipeStore;

/// What a scripted call should do
#[derive(Clone)]
pub enum Script {
    /// Return this response text
    Reply(String),
    /// Fail with an upstream error
    Fail,
    /// Never respond (forces the gateway timeout)
    Hang,
}

impl Script {
    pub fn reply(text: &str) -> Self {
        Self::Reply(text.to_owned())
    }

    async fn run(&self) -> AppResult<String> {
        match self {
            Self::Reply(text) => Ok(text.clone()),
            Self::Fail => Err(AppError::external_service("mock", "scripted failure")),
            Self::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }
}

/// Vision provider whose responses are scripted per call path
pub struct MockVisionProvider {
    pub analyze: Script,
    pub complete: Script,
}

impl MockVisionProvider {
    pub fn new(analyze: Script, complete: Script) -> Self {
        Self { analyze, complete }
    }
}

#[async_trait]
impl VisionProvider for MockVisionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn analyze_image(&self, _image_base64: &str, _media_type: &str) -> AppResult<String> {
        self.analyze.run().await
    }

    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        self.complete.run().await
    }
}

/// Gateway config with a short timeout so `Script::Hang` trips quickly
pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        timeout: Duration::from_millis(100),
        ..GatewayConfig::default()
    }
}

/// Gateway over a scripted provider and a fresh seeded store
pub fn test_gateway(provider: MockVisionProvider, config: GatewayConfig) -> DetectionGateway {
    DetectionGateway::new(Arc::new(provider), Arc::new(RecipeStore::new()), config)
}

/// Full pipeline over a scripted provider, fresh catalog, and seeded store
pub fn test_pipeline(provider: MockVisionProvider, config: GatewayConfig) -> AnalysisPipeline {
    let limit = config.match_limit;
    let gateway = test_gateway(provider, config);
    let resolver = ProductResolver::new(Arc::new(ProductCatalog::new()));
    AnalysisPipeline::new(gateway, resolver, limit)
}

/// A strict-parseable detection response naming tomato and garlic
pub const TOMATO_GARLIC_DETECTION: &str = r#"I can see these items:
[{"name": "Tomatoes", "category": "Vegetable"}, {"name": "Garlic", "category": "Vegetable"}]"#;
