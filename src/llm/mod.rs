// ABOUTME: Vision provider abstraction and detection gateway for the external reasoning service
// ABOUTME: Owns retry-free timeout policy, response normalization, and fallback behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Vision Provider Service Provider Interface
//!
//! Defines the contract the external vision/reasoning service must satisfy
//! and the gateway that wraps it with policy: timeout bounding, three-tier
//! response normalization (strict parse, heuristic parse, fallback), and
//! the hard-fail toggle.
//!
//! ## Example: scripting a provider in tests
//!
//! ```rust,no_run
//! use fridge_chef::llm::VisionProvider;
//! use fridge_chef::errors::AppResult;
//! use async_trait::async_trait;
//!
//! struct CannedProvider(String);
//!
//! #[async_trait]
//! impl VisionProvider for CannedProvider {
//!     fn name(&self) -> &'static str {
//!         "canned"
//!     }
//!
//!     async fn analyze_image(&self, _image: &str, _media_type: &str) -> AppResult<String> {
//!         Ok(self.0.clone())
//!     }
//!
//!     async fn complete(&self, _prompt: &str) -> AppResult<String> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

mod anthropic;
/// Gateway policy over a vision provider
pub mod gateway;
/// Three-tier response normalization
pub mod parser;
/// Prompt templates for the reasoning service
pub mod prompts;

pub use anthropic::AnthropicProvider;
pub use gateway::DetectionGateway;
pub use parser::{Extraction, ParseTier};

use crate::errors::AppResult;
use async_trait::async_trait;

/// Contract for the external vision/reasoning service.
///
/// Both calls return the provider's free-text response; extraction of the
/// embedded structured data is the gateway's job, not the provider's.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Short provider identifier for logs
    fn name(&self) -> &'static str;

    /// Identify food items in a base64-encoded image.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails or returns a non-success
    /// status.
    async fn analyze_image(&self, image_base64: &str, media_type: &str) -> AppResult<String>;

    /// Run a text-only completion (recipe suggestion path).
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails or returns a non-success
    /// status.
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}
