// ABOUTME: Centralized constants for environment variables, defaults, and limits
// ABOUTME: Single source of truth so policy values are never scattered through modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

/// Environment variable names
pub mod env_config {
    /// API key for the vision/reasoning provider
    pub const VISION_API_KEY: &str = "FRIDGE_CHEF_VISION_API_KEY";
    /// Override for the vision model identifier
    pub const VISION_MODEL: &str = "FRIDGE_CHEF_VISION_MODEL";
    /// Upstream call timeout in seconds
    pub const VISION_TIMEOUT_SECS: &str = "FRIDGE_CHEF_VISION_TIMEOUT_SECS";
    /// When "true", upstream failures propagate instead of degrading
    pub const HARD_FAIL: &str = "FRIDGE_CHEF_HARD_FAIL";
    /// Maximum recipes returned per request
    pub const MATCH_LIMIT: &str = "FRIDGE_CHEF_MATCH_LIMIT";
}

/// Default values applied when configuration is absent
pub mod defaults {
    /// Category assigned to items detected without one
    pub const PRODUCT_CATEGORY: &str = "Other";
    /// Upstream call timeout
    pub const VISION_TIMEOUT_SECS: u64 = 30;
    /// Recipes returned per request
    pub const MATCH_LIMIT: usize = 5;
    /// Vision model used when no override is configured
    pub const VISION_MODEL: &str = "claude-3-opus-20240229";

    /// Deterministic substitute items used when detection degrades to the
    /// fallback tier. Order matters: callers take these verbatim.
    pub const FALLBACK_ITEMS: &[(&str, &str)] = &[
        ("Tomato", "Vegetable"),
        ("Onion", "Vegetable"),
        ("Garlic", "Vegetable"),
    ];
}

/// Hard limits protecting the pipeline from unreasonable inputs
pub mod limits {
    /// Maximum detected items accepted from one upstream response
    pub const MAX_DETECTED_ITEMS: usize = 50;
    /// Maximum tokens generated for a recipe-suggestion call
    pub const MAX_SUGGESTION_TOKENS: u32 = 1500;
    /// Maximum tokens generated for an image-analysis call
    pub const MAX_ANALYSIS_TOKENS: u32 = 1000;
}

/// Service identifiers used in logs and error messages
pub mod service_names {
    pub const PIPELINE: &str = "fridge-chef";
    pub const VISION: &str = "vision";
}
