//! Mirror Engine - anti-sycophancy layer for conversational responses
//!
//! This crate scores generated responses for excessive agreeableness, tracks
//! each user's recurring query themes, and rewrites responses to reintroduce
//! reflective friction when the two signals warrant it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use application::MirrorEngine;
pub use config::AppConfig;
