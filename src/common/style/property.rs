//! Ordered key/value property lists.
//!
//! Style accumulators and legacy attribute decoders both produce flat
//! property lists; keys keep their first insertion position, and setting an
//! existing key replaces its value in place.

use std::fmt;

use super::color::RGBColor;

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    Color(RGBColor),
    Text(String),
    /// A pair of integer coordinates (point, size or position)
    Point(i32, i32),
    /// Raw bytes that no decoder interprets
    Binary(Vec<u8>),
    List(Vec<PropertyValue>),
    Nested(PropertyList),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Double(v) => write!(f, "{v}"),
            PropertyValue::Color(c) => write!(f, "{c}"),
            PropertyValue::Text(s) => write!(f, "\"{s}\""),
            PropertyValue::Point(x, y) => write!(f, "{x}x{y}"),
            PropertyValue::Binary(data) => write!(f, "<{} bytes>", data.len()),
            PropertyValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
            PropertyValue::Nested(list) => write!(f, "[{list}]"),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

macro_rules! int_property {
    ($($ty:ty),*) => {
        $(impl From<$ty> for PropertyValue {
            fn from(v: $ty) -> Self {
                PropertyValue::Int(i64::from(v))
            }
        })*
    };
}

int_property!(i8, u8, i16, u16, i32, u32, i64);

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Double(v)
    }
}

impl From<RGBColor> for PropertyValue {
    fn from(v: RGBColor) -> Self {
        PropertyValue::Color(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Text(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::Text(v.to_string())
    }
}

impl From<PropertyList> for PropertyValue {
    fn from(v: PropertyList) -> Self {
        PropertyValue::Nested(v)
    }
}

/// Insertion-ordered map from property name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyList {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Set `key` unless `text` is empty; empty strings are valid but carry nothing.
    pub fn insert_text(&mut self, key: impl Into<String>, text: String) {
        if !text.is_empty() {
            self.insert(key, PropertyValue::Text(text));
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(PropertyValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(PropertyValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(PropertyValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `other` into `self`; `other` wins on conflicts.
    pub fn merge(&mut self, other: &PropertyList) {
        for (k, v) in &other.entries {
            self.insert(k.clone(), v.clone());
        }
    }
}

impl fmt::Display for PropertyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, v) in &self.entries {
            write!(f, "{k}={v},")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut list = PropertyList::new();
        list.insert("a", 1u16);
        list.insert("b", true);
        list.insert("a", 5i32);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get_int("a"), Some(5));
        assert_eq!(list.to_string(), "a=5,b=true,");
    }

    #[test]
    fn test_empty_text_is_omitted() {
        let mut list = PropertyList::new();
        list.insert_text("name", String::new());
        list.insert_text("style", "Default".to_string());
        assert!(!list.contains("name"));
        assert_eq!(list.get_text("style"), Some("Default"));
    }

    #[test]
    fn test_merge_other_wins() {
        let mut base = PropertyList::new();
        base.insert("x", 1u8);
        base.insert("y", 2u8);
        let mut over = PropertyList::new();
        over.insert("y", 9u8);
        base.merge(&over);
        assert_eq!(base.get_int("x"), Some(1));
        assert_eq!(base.get_int("y"), Some(9));
    }

    #[test]
    fn test_display_nested() {
        let mut inner = PropertyList::new();
        inner.insert("w", 3u8);
        let mut list = PropertyList::new();
        list.insert("line", inner);
        list.insert("pt", PropertyValue::Point(1, -2));
        assert_eq!(list.to_string(), "line=[w=3,],pt=1x-2,");
    }
}
