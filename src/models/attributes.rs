use std::collections::HashMap;

/// A caller-defined attribute value attached to a team, event or match.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl AttrValue {
    /// Numeric view used for rankings. Booleans and text have no numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(value) => Some(*value as f64),
            AttrValue::Float(value) => Some(*value),
            AttrValue::Bool(_) | AttrValue::Text(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

/// Typed key -> value bag. Lookups of unknown keys return `None`, never panic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    values: HashMap<String, AttrValue>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.values.get(key)
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_key_is_absent() {
        let store = AttributeStore::new();
        assert_eq!(store.get("opr"), None);
        assert!(!store.contains("opr"));
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut store = AttributeStore::new();
        assert_eq!(store.set("opr", 12.5), None);
        assert_eq!(store.set("opr", 40_i64), Some(AttrValue::Float(12.5)));
        assert_eq!(store.get("opr").and_then(AttrValue::as_f64), Some(40.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_numeric_view() {
        assert_eq!(AttrValue::from(3_u32).as_f64(), Some(3.0));
        assert_eq!(AttrValue::from(true).as_f64(), None);
        assert_eq!(AttrValue::from("scouted").as_f64(), None);
        assert_eq!(AttrValue::from("scouted").as_str(), Some("scouted"));
        assert_eq!(AttrValue::from(false).as_bool(), Some(false));
    }
}
