//! Shared utilities for gatehouse
//!
//! This crate provides common functionality used across the gatehouse
//! workspace: logging setup and environment-driven configuration.

pub mod config;
pub mod logging;

pub use config::{ConfigError, GatehouseConfig};
pub use logging::init_tracing;
