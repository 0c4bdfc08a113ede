//! Decoders for objects embedded in StarOffice streams.
//!
//! Each decoder reads one self-contained object from a [`StarZone`] and
//! reports its own failures: a damaged object yields `None` or a partial
//! value and a trace entry, never an error for the enclosing document.
//!
//! [`StarZone`]: crate::star::zone::StarZone

// Submodule declarations
pub mod bitmap;
pub mod edit_text;
pub mod embedded;
pub mod font;
pub mod job_setup;
pub mod math;
pub mod svgdi;

// Re-exports
pub use bitmap::{Bitmap, read_bitmap};
pub use edit_text::{
    AttributeRun, EditParagraph, EditTextObject, EditTrailer, read_edit_text_object,
};
pub use embedded::{
    EmbeddedPicture, OutPlaceObject, PictureHeader, PictureKind, read_embedded_picture,
    read_out_place_object,
};
pub use font::{StarFont, read_font};
pub use job_setup::{JobSetup, PaperSetup, read_job_setup};
pub use math::{MathDocument, MathFont, MathFormat, MathInfo, StarDateTime, read_math_document};
pub use svgdi::{MetaAction, Metafile, VclMetafile, read_svgdi, read_vcl_metafile};
