// ABOUTME: Configuration module for deployment-specific runtime settings
// ABOUTME: Environment-driven, explicitly constructed, no hidden globals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Chef Contributors

/// Environment-based runtime configuration
pub mod environment;

pub use environment::GatewayConfig;
