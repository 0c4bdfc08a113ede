//! Stoff - a decoder core for legacy StarOffice binary documents
//!
//! StarOffice 3.x to 5.x stored Writer, Calc, Draw, Impress, Chart and Math
//! documents as OLE streams of nested, length-prefixed records. This crate
//! reads those records and the values inside them.
//!
//! # Features
//!
//! - **Zone framing**: SW, Sfx, version-compat and plain records with
//!   realignment to the declared end of every record
//! - **Multi-records**: fixed-size and offset-table aggregate records
//! - **Attributes**: a registry of typed prototypes, item sets with style
//!   inheritance and cycle detection, and decoders for the legacy layouts
//! - **Embedded objects**: SVGDI metafiles, StarMath documents, bitmaps,
//!   fonts, printer job setups, edit engine text objects, embedded pictures
//! - **Diagnostics**: every decoder annotates a [`common::DebugTrace`]
//!   instead of failing the whole document
//!
//! # Example - Reading an item set
//!
//! ```
//! use stoff::star::attribute::AttributeRegistry;
//! use stoff::star::{DocumentContext, StarDocument, StarZone};
//!
//! let registry = AttributeRegistry::new();
//! let mut doc = StarDocument::new(&registry);
//!
//! // An item set without items: a u16 count of zero.
//! let mut zone = StarZone::from_bytes(vec![0, 0], "example");
//! let id = doc.read_item_set(&mut zone, &[], 2, None).unwrap();
//! assert!(doc.item_set(id).unwrap().is_empty());
//! assert!(!zone.trace().has_errors());
//! ```

pub mod common;
pub mod star;

pub use common::{Error, Result};
