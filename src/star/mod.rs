//! The StarOffice binary layer.
//!
//! [`input`] gives byte-order aware reads over a shared buffer, [`zone`] adds
//! the nested record frames and the diagnostic trace, [`multi_record`] reads
//! aggregate records. The [`attribute`] system decodes item sets through a
//! [`document::DocumentContext`] and [`object`] holds the embedded object
//! decoders.

// Submodule declarations
pub mod attribute;
pub mod document;
pub mod input;
pub mod multi_record;
pub mod object;
pub mod zone;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports
pub use document::{DocumentContext, StarDocument};
pub use input::StarInput;
pub use multi_record::MultiRecord;
pub use zone::{RecordKind, StarZone, ZoneOptions};
