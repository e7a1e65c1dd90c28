//! # av-types
//!
//! Core types for the AvaTaR optimizer runner: the launch configuration,
//! the LLM model registry, and the shared error taxonomy.

pub mod config;
pub mod errors;
pub mod models;

pub use config::*;
pub use errors::*;
pub use models::*;
