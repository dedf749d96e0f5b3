//! Palate Configuration Module
//!
//! This module handles loading configuration from palate.toml files. Every
//! field has a default, so a missing or partial file still yields a usable
//! configuration.

pub mod constants;
pub mod core;
pub mod loader;

pub use core::{AdvisorConfig, CacheConfig, ServicesConfig, TelemetryConfig};
pub use loader::{ConfigManager, PalateConfig};
