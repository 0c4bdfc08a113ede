//! Common types and utilities shared by the StarOffice decoders.
//!
//! Nothing in here knows about StarOffice records; it covers errors, raw
//! byte-order aware reads, text encodings, the diagnostic trace and the
//! generic property lists used by style accumulators.

// Submodule declarations
pub mod binary;
pub mod debug;
pub mod encoding;
pub mod error;
pub mod style;

// Re-exports for convenience
pub use binary::ByteOrder;
pub use debug::{DebugTrace, Severity, TraceEntry};
pub use error::{Error, Result};
pub use style::{PropertyList, PropertyValue, RGBColor};
