//! EntropyOPStack Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod error;
/// Application state management
///
/// Handles the agent registry, roles, seeding and persistence.
pub mod state;
