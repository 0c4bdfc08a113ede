//! StarOffice attributes.
//!
//! An attribute is a typed value stored under a numeric identifier. The
//! [`registry`] maps identifiers to prototypes, item sets group decoded
//! attributes and the [`style`] accumulators receive their projection.
//! Identifiers without a prototype fall back to the layouts of [`legacy`].

// Submodule declarations
pub mod ids;
pub mod item_set;
pub(crate) mod legacy;
pub mod registry;
pub mod style;
pub mod types;

// Re-exports
pub use item_set::{
    ItemPool, ItemSet, ItemSetArena, ItemSetId, PoolId, PoolKind, PoolStyle, Resolver, StyleRef,
};
pub use registry::AttributeRegistry;
pub use style::{CellStyle, FontStyle, GraphicStyle, PageStyle, ParagraphStyle, StyleTarget};
pub use types::{Attribute, AttributeKind, AttributeValue, FieldList, Prototype, Scope};
