//! Attribute prototypes and decoded instances.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use super::item_set::ItemSetId;
use super::style::StyleTarget;
use crate::common::{PropertyList, PropertyValue, RGBColor};

/// Ordered fields decoded by a legacy attribute layout.
pub type FieldList = PropertyList;

bitflags! {
    /// Style accumulators an attribute projects onto.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Scope: u8 {
        const CELL = 0x01;
        const FONT = 0x02;
        const GRAPHIC = 0x04;
        const PARAGRAPH = 0x08;
        const PAGE = 0x10;
    }
}

/// How an attribute value is laid out in the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    /// Nothing is stored
    Void,
    /// An XML attribute container; its content is not decoded
    Xml,
    /// One byte
    Bool,
    /// Signed integer of `width` bytes
    Int { width: u8 },
    /// Unsigned integer of `width` bytes
    UInt { width: u8 },
    /// IEEE 754 double
    Double,
    /// StarOffice color
    Color,
    /// Two signed integers of `width` bytes each
    Vec2i { width: u8 },
    /// A nested item set restricted to the `limits` identifier ranges
    ItemSet { limits: Vec<(u32, u32)> },
}

/// A decoded attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Void,
    Bool(bool),
    Int(i32),
    UInt(u32),
    Double(f64),
    Color(RGBColor),
    Vec2i(i32, i32),
    /// Nested item set; `None` until one has been read
    ItemSet(Option<ItemSetId>),
    /// Fields of a legacy layout
    Fields(FieldList),
}

impl AttributeValue {
    /// The value as a style property; void, nested and legacy values have none.
    pub fn to_property(&self) -> Option<PropertyValue> {
        match self {
            AttributeValue::Bool(v) => Some(PropertyValue::Bool(*v)),
            AttributeValue::Int(v) => Some(PropertyValue::Int(i64::from(*v))),
            AttributeValue::UInt(v) => Some(PropertyValue::Int(i64::from(*v))),
            AttributeValue::Double(v) => Some(PropertyValue::Double(*v)),
            AttributeValue::Color(c) => Some(PropertyValue::Color(*c)),
            AttributeValue::Vec2i(x, y) => Some(PropertyValue::Point(*x, *y)),
            AttributeValue::Void | AttributeValue::ItemSet(_) | AttributeValue::Fields(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Void => Ok(()),
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::UInt(v) => write!(f, "{v}"),
            AttributeValue::Double(v) => write!(f, "{v}"),
            AttributeValue::Color(c) => write!(f, "{c}"),
            AttributeValue::Vec2i(x, y) => write!(f, "{x}x{y}"),
            AttributeValue::ItemSet(Some(id)) => write!(f, "set{}", id.index()),
            AttributeValue::ItemSet(None) => f.write_str("set_"),
            AttributeValue::Fields(fields) => write!(f, "[{fields}]"),
        }
    }
}

/// Immutable template of one registered attribute.
///
/// A prototype is built once when the registry is populated; every occurrence
/// in a stream starts from [`create`](Self::create).
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    which: u32,
    name: Arc<str>,
    kind: AttributeKind,
    default: AttributeValue,
    scope: Scope,
}

impl Prototype {
    pub fn new(
        which: u32,
        name: impl Into<Arc<str>>,
        kind: AttributeKind,
        default: AttributeValue,
        scope: Scope,
    ) -> Self {
        Self {
            which,
            name: name.into(),
            kind,
            default,
            scope,
        }
    }

    pub fn void(which: u32, name: impl Into<Arc<str>>) -> Self {
        Self::new(which, name, AttributeKind::Void, AttributeValue::Void, Scope::empty())
    }

    pub fn xml(which: u32, name: impl Into<Arc<str>>) -> Self {
        Self::new(which, name, AttributeKind::Xml, AttributeValue::Void, Scope::empty())
    }

    pub fn boolean(which: u32, name: impl Into<Arc<str>>, default: bool, scope: Scope) -> Self {
        Self::new(which, name, AttributeKind::Bool, AttributeValue::Bool(default), scope)
    }

    pub fn int(
        which: u32,
        name: impl Into<Arc<str>>,
        width: u8,
        default: i32,
        scope: Scope,
    ) -> Self {
        Self::new(
            which,
            name,
            AttributeKind::Int { width },
            AttributeValue::Int(default),
            scope,
        )
    }

    pub fn uint(
        which: u32,
        name: impl Into<Arc<str>>,
        width: u8,
        default: u32,
        scope: Scope,
    ) -> Self {
        Self::new(
            which,
            name,
            AttributeKind::UInt { width },
            AttributeValue::UInt(default),
            scope,
        )
    }

    pub fn double(which: u32, name: impl Into<Arc<str>>, default: f64, scope: Scope) -> Self {
        Self::new(which, name, AttributeKind::Double, AttributeValue::Double(default), scope)
    }

    pub fn color(which: u32, name: impl Into<Arc<str>>, default: RGBColor, scope: Scope) -> Self {
        Self::new(which, name, AttributeKind::Color, AttributeValue::Color(default), scope)
    }

    pub fn vec2i(which: u32, name: impl Into<Arc<str>>, width: u8, scope: Scope) -> Self {
        Self::new(
            which,
            name,
            AttributeKind::Vec2i { width },
            AttributeValue::Vec2i(0, 0),
            scope,
        )
    }

    pub fn item_set(which: u32, name: impl Into<Arc<str>>, limits: &[(u32, u32)]) -> Self {
        Self::new(
            which,
            name,
            AttributeKind::ItemSet {
                limits: limits.to_vec(),
            },
            AttributeValue::ItemSet(None),
            Scope::empty(),
        )
    }

    #[inline]
    pub fn which(&self) -> u32 {
        self.which
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn default_value(&self) -> &AttributeValue {
        &self.default
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// A fresh instance holding the default value.
    pub fn create(&self) -> Attribute {
        Attribute {
            which: self.which,
            name: Arc::clone(&self.name),
            value: self.default.clone(),
            scope: self.scope,
            dummy: false,
        }
    }
}

/// One decoded attribute, owned by the item set that holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    which: u32,
    name: Arc<str>,
    value: AttributeValue,
    scope: Scope,
    dummy: bool,
}

impl Attribute {
    /// Placeholder for an identifier nothing knows how to decode.
    ///
    /// It is a valid attribute that simply carries no value.
    pub fn dummy(which: u32) -> Self {
        let name = if which == 0 {
            "unknownAttribute".to_string()
        } else {
            format!("attrib{which}")
        };
        Self {
            which,
            name: name.into(),
            value: AttributeValue::Void,
            scope: Scope::empty(),
            dummy: true,
        }
    }

    /// Dummy-kind attribute carrying the fields of a legacy layout.
    pub(crate) fn legacy(which: u32, name: &str, fields: FieldList) -> Self {
        Self {
            which,
            name: name.into(),
            value: AttributeValue::Fields(fields),
            scope: Scope::empty(),
            dummy: true,
        }
    }

    #[inline]
    pub fn identifier(&self) -> u32 {
        self.which
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    pub fn set_value(&mut self, value: AttributeValue) {
        self.value = value;
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Whether this instance stands in for an unregistered identifier.
    pub fn is_dummy(&self) -> bool {
        self.dummy
    }

    /// Fields decoded by a legacy layout.
    pub fn fields(&self) -> Option<&FieldList> {
        match &self.value {
            AttributeValue::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// The nested item set, for set-valued attributes.
    pub fn nested_set(&self) -> Option<ItemSetId> {
        match self.value {
            AttributeValue::ItemSet(id) => id,
            _ => None,
        }
    }

    /// Write this value into `target` when the scopes match.
    ///
    /// Nested item sets are not followed here; see
    /// [`Resolver`](super::item_set::Resolver).
    pub fn project_onto(&self, target: &mut dyn StyleTarget) -> bool {
        if !self.scope.intersects(target.scope()) {
            return false;
        }
        match self.value.to_property() {
            Some(value) => {
                target.set_property(&self.name, value);
                true
            },
            None => false,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            AttributeValue::Void => f.write_str(&self.name),
            value => write!(f, "{}={}", self.name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::attribute::style::{FontStyle, GraphicStyle};

    #[test]
    fn test_create_returns_independent_instances() {
        let proto = Prototype::uint(7, "frmPaperBin", 1, 0xFF, Scope::PAGE);
        let mut a = proto.create();
        let b = proto.create();
        a.set_value(AttributeValue::UInt(3));
        assert_eq!(b.value(), &AttributeValue::UInt(0xFF));
        assert_eq!(proto.default_value(), &AttributeValue::UInt(0xFF));
        assert_eq!(a.identifier(), 7);
    }

    #[test]
    fn test_dummy_names() {
        assert_eq!(Attribute::dummy(99999).name(), "attrib99999");
        assert_eq!(Attribute::dummy(0).name(), "unknownAttribute");
        assert!(Attribute::dummy(12).is_dummy());
        assert_eq!(Attribute::dummy(12).value(), &AttributeValue::Void);
    }

    #[test]
    fn test_projection_respects_scope() {
        let attr = Prototype::boolean(1, "chrContour", true, Scope::FONT).create();
        let mut font = FontStyle::new();
        let mut graphic = GraphicStyle::new();
        assert!(attr.project_onto(&mut font));
        assert!(!attr.project_onto(&mut graphic));
        assert_eq!(font.properties().get_bool("chrContour"), Some(true));
        assert!(graphic.properties().is_empty());
    }

    #[test]
    fn test_void_and_legacy_never_project() {
        let mut font = FontStyle::new();
        let mut fields = FieldList::new();
        fields.insert("scale", 100u16);
        let legacy = Attribute::legacy(35, "chrScaleW", fields);
        assert!(!legacy.project_onto(&mut font));
        assert_eq!(legacy.fields().and_then(|f| f.get_int("scale")), Some(100));
        assert!(!Prototype::void(3, "void").create().project_onto(&mut font));
    }

    #[test]
    fn test_display() {
        let attr = Prototype::vec2i(4, "pageSize", 4, Scope::PAGE).create();
        assert_eq!(attr.to_string(), "pageSize=0x0");
        assert_eq!(Attribute::dummy(5).to_string(), "attrib5");
    }
}
