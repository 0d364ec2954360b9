//! Shared traits used across goldenpath crates.

pub mod cancellation;

pub use cancellation::{CancellationToken, NeverCancel};
