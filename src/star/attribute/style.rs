//! Style accumulators that decoded attributes are projected onto.
//!
//! The decoder only ever writes into these; the document model that owns
//! them decides what the collected properties mean.

use super::types::Scope;
use crate::common::{PropertyList, PropertyValue};

/// A mutable style receiving attribute values.
pub trait StyleTarget {
    /// The accumulator family; attributes whose scope does not intersect it
    /// are ignored.
    fn scope(&self) -> Scope;

    /// Set one property, replacing any previous value.
    fn set_property(&mut self, key: &str, value: PropertyValue);

    /// Everything collected so far.
    fn properties(&self) -> &PropertyList;
}

macro_rules! style_accumulator {
    ($(#[$doc:meta])* $name:ident, $scope:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            properties: PropertyList,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Set `key` to `value`.
            pub fn set(&mut self, key: &str, value: impl Into<PropertyValue>) {
                self.properties.insert(key, value);
            }

            pub fn get(&self, key: &str) -> Option<&PropertyValue> {
                self.properties.get(key)
            }

            pub fn properties(&self) -> &PropertyList {
                &self.properties
            }

            pub fn is_empty(&self) -> bool {
                self.properties.is_empty()
            }
        }

        impl StyleTarget for $name {
            fn scope(&self) -> Scope {
                $scope
            }

            fn set_property(&mut self, key: &str, value: PropertyValue) {
                self.properties.insert(key, value);
            }

            fn properties(&self) -> &PropertyList {
                &self.properties
            }
        }
    };
}

style_accumulator!(
    /// Spreadsheet cell properties.
    CellStyle,
    Scope::CELL
);
style_accumulator!(
    /// Character (font) properties.
    FontStyle,
    Scope::FONT
);
style_accumulator!(
    /// Frame and drawing object properties.
    GraphicStyle,
    Scope::GRAPHIC
);
style_accumulator!(
    /// Paragraph properties.
    ParagraphStyle,
    Scope::PARAGRAPH
);
style_accumulator!(
    /// Page layout properties.
    PageStyle,
    Scope::PAGE
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;

    #[test]
    fn test_accumulators_have_distinct_scopes() {
        let scopes = [
            CellStyle::new().scope(),
            FontStyle::new().scope(),
            GraphicStyle::new().scope(),
            ParagraphStyle::new().scope(),
            PageStyle::new().scope(),
        ];
        for (i, a) in scopes.iter().enumerate() {
            for b in &scopes[i + 1..] {
                assert!(!a.intersects(*b));
            }
        }
    }

    #[test]
    fn test_set_replaces_value() {
        let mut font = FontStyle::new();
        font.set("chrColor", RGBColor::BLACK);
        font.set_property("chrColor", PropertyValue::Color(RGBColor::WHITE));
        assert_eq!(font.properties().len(), 1);
        assert_eq!(font.get("chrColor"), Some(&PropertyValue::Color(RGBColor::WHITE)));
    }
}
