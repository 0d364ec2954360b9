//! Hash collections standardized on the Fx hasher.
//!
//! Every frequency table and bucket map in the engine is keyed by short
//! strings or token tuples; FxHash beats SipHash by a wide margin there
//! and the inputs are not attacker-controlled.

pub use rustc_hash::{FxHashMap, FxHashSet};
