//! Unified error types for stoff.
//!
//! Every fallible read in the crate reports through [`Error`]; decoders decide
//! locally whether a failure drops one value, truncates a zone, or fails the
//! whole sub-object.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
