//! # goldenpath-core
//!
//! Core types, traits, errors, and configuration for the golden-path
//! mining engine. Shared by every crate in the workspace.

pub mod config;
pub mod errors;
pub mod traits;
pub mod types;

pub use config::MiningConfig;
pub use errors::{ConfigError, MiningError};
pub use traits::CancellationToken;
