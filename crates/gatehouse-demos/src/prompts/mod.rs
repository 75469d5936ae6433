//! Prompt text for the scenario agents
//!
//! System prompts are plain string literals; user-message envelopes that
//! interpolate runtime data are rendered through minijinja in `user`.

pub mod system;
pub mod user;
