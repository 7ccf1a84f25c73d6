//! # Rkena Engine
//!
//! Headless host for the Rkena MMA fight simulation.
//!
//! This crate wires the gameplay core to the outside world:
//! - Configuration file loading and validation
//! - Frame timing (realtime or synthetic clock)
//! - Input sources for the human corner
//! - Text HUD formatting
//! - The match runner

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod config;
pub mod hud;
pub mod input;
pub mod timing;

pub use app::{run, MatchSummary, RunSummary};
pub use config::EngineConfig;
