//! Shared type aliases used across goldenpath crates.

pub mod collections;
