//! Configuration types
//!
//! Bus timing presets and engine options. Optionally serde-serializable so
//! boards can carry them in their own configuration files.

pub mod types;

pub use types::*;
