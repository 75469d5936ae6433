//! Chat client implementations
//!
//! Providers are feature-gated so downstream crates only pull the HTTP stack
//! they actually use.

pub mod openai;

pub use openai::{OpenAiClient, OpenAiConfig};
