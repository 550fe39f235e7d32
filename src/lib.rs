// ABOUTME: Library root for the ingredient resolution and recipe matching pipeline
// ABOUTME: Wires catalog, recipes, gateway, and orchestrator modules together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

//! # Fridge Chef
//!
//! Turn a photo of food items into recipe suggestions consistent with the
//! caller's dietary restrictions. This crate is the core pipeline only:
//! capture/upload UI and the HTTP transport are out of scope, and the
//! vision model itself is an external collaborator behind the
//! [`llm::VisionProvider`] trait.
//!
//! Request cycle: [`llm::DetectionGateway`] turns an image payload into
//! detected items (with deterministic fallback when upstream misbehaves),
//! [`catalog::ProductResolver`] canonicalizes them against the shared
//! catalog, and [`recipes::match_recipes`] ranks the recipe store against
//! the resolved products and the caller's allergen exclusions.
//! [`pipeline::AnalysisPipeline`] composes the three.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Product catalog store and ingredient resolver
pub mod catalog;
/// Environment-driven runtime configuration
pub mod config;
/// Centralized constants: env names, defaults, limits
pub mod constants;
/// Unified error handling
pub mod errors;
/// Vision provider SPI and detection gateway
pub mod llm;
/// Structured logging setup
pub mod logging;
/// Core domain models
pub mod models;
/// Request orchestration
pub mod pipeline;
/// Recipe store and matcher
pub mod recipes;

pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{AnalysisResult, DetectedItem, Product, Recipe};
pub use pipeline::AnalysisPipeline;
