//! Common style and formatting types.
//!
//! This module provides the color type and the property lists that style
//! accumulators are built from.

// Submodule declarations
pub mod color;
pub mod property;

// Re-exports
pub use color::RGBColor;
pub use property::{PropertyList, PropertyValue};
