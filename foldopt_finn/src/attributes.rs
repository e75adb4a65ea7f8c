//! Named attribute collection of a FINN node
//!
//! Mirrors the attribute list carried by an ONNX node: an ordered set of
//! name -> value pairs that FINN custom ops read their hardware parameters from.

use foldopt_core::error::{FoldoptError, FoldoptResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value of a single node attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(i64),
    Float(f64),
    String(String),
    Ints(Vec<i64>),
}

impl AttributeValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's type, as used in attribute error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::String(_) => "string",
            AttributeValue::Ints(_) => "ints",
        }
    }

    pub fn same_type(&self, other: &AttributeValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Int(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::String(s) => write!(f, "\"{}\"", s),
            AttributeValue::Ints(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<usize> for AttributeValue {
    fn from(v: usize) -> Self {
        AttributeValue::Int(v as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(v)
    }
}

impl From<Vec<i64>> for AttributeValue {
    fn from(v: Vec<i64>) -> Self {
        AttributeValue::Ints(v)
    }
}

/// Attribute store - BTreeMap keeps names sorted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeAttributes {
    attributes: BTreeMap<String, AttributeValue>,
}

impl NodeAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Get an integer attribute
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_int()
    }

    /// Set an attribute value, replacing any previous one
    pub fn set(&mut self, name: &str, value: impl Into<AttributeValue>) -> Option<AttributeValue> {
        self.attributes.insert(name.to_string(), value.into())
    }

    /// Builder-style [`NodeAttributes::set`]
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Check if an attribute exists
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Remove an attribute
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.attributes.remove(name)
    }

    /// List all attribute names
    pub fn names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Parse attributes from a YAML mapping
    pub fn from_yaml(contents: &str) -> FoldoptResult<Self> {
        serde_yaml::from_str(contents)
            .map_err(|e| FoldoptError::attribute(format!("Failed to parse attributes: {}", e)))
    }

    /// Parse attributes from a JSON object
    pub fn from_json(contents: &str) -> FoldoptResult<Self> {
        serde_json::from_str(contents)
            .map_err(|e| FoldoptError::attribute(format!("Failed to parse attributes: {}", e)))
    }
}

/// Look up an attribute by name, `None` when the node does not carry it
pub fn get_by_name<'a>(attributes: &'a NodeAttributes, name: &str) -> Option<&'a AttributeValue> {
    attributes.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut attrs = NodeAttributes::new()
            .with("SIMD", 1usize)
            .with("PE", 1usize)
            .with("backend", "fpgadataflow");

        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.get_int("SIMD"), Some(1));
        assert_eq!(attrs.get("backend").and_then(|v| v.as_str()), Some("fpgadataflow"));

        // Overwrite
        let previous = attrs.set("SIMD", 4usize);
        assert_eq!(previous, Some(AttributeValue::Int(1)));
        assert_eq!(attrs.get_int("SIMD"), Some(4));

        assert_eq!(attrs.remove("PE"), Some(AttributeValue::Int(1)));
        assert!(!attrs.has("PE"));
        assert_eq!(attrs.names(), vec!["SIMD", "backend"]);
    }

    #[test]
    fn test_get_by_name() {
        let attrs = NodeAttributes::new().with("PE", 2usize);
        assert_eq!(get_by_name(&attrs, "PE"), Some(&AttributeValue::Int(2)));
        assert!(get_by_name(&attrs, "SIMD").is_none());
    }

    #[test]
    fn test_from_yaml() {
        let attrs = NodeAttributes::from_yaml(
            "SIMD: 8\nPE: 4\nresType: lut\nnumInputVectors: [1, 28, 28]\nclk_ns: 5.0\n",
        )
        .unwrap();

        assert_eq!(attrs.get_int("SIMD"), Some(8));
        assert_eq!(attrs.get("resType"), Some(&AttributeValue::String("lut".into())));
        assert_eq!(
            attrs.get("numInputVectors"),
            Some(&AttributeValue::Ints(vec![1, 28, 28]))
        );
        assert_eq!(attrs.get("clk_ns"), Some(&AttributeValue::Float(5.0)));
    }

    #[test]
    fn test_from_json_rejects_nested_objects() {
        let result = NodeAttributes::from_json(r#"{"SIMD": {"value": 8}}"#);
        assert!(matches!(result, Err(FoldoptError::Attribute(_))));
    }

    #[test]
    fn test_same_type() {
        assert!(AttributeValue::Int(1).same_type(&AttributeValue::Int(9)));
        assert!(!AttributeValue::Int(1).same_type(&AttributeValue::Float(1.0)));
    }
}
