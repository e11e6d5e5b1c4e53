// ABOUTME: Configuration module re-exporting the environment-based config
// ABOUTME: Environment-only approach; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Environment-variable driven server configuration
pub mod environment;

pub use environment::ServerConfig;
