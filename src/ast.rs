//! Contains `AstNode`, the typed tree a successful parse produces.
//!
//! The tree owns its children exclusively and is never mutated by the
//! parser once returned. Objects keep their members in source order.

use crate::error::JsonError;
use indexmap::IndexMap;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest integer (2^53 - 1) an `f64` holds exactly.
///
/// `NumberMode::Float` parses beyond this bound still succeed but may be
/// rounded; use `NumberMode::Exact` to keep the digits.
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The members of a JSON object, in insertion order, keys unique.
pub type Object = IndexMap<String, AstNode>;

/// A JSON number.
#[derive(Debug, PartialEq, Clone)]
pub enum JsonNumber {
    /// An IEEE-754 double (`NumberMode::Float`). Always finite.
    Float(f64),
    /// The literal text, already validated against the JSON number
    /// grammar (`NumberMode::Exact`).
    Exact(String),
}

impl JsonNumber {
    /// The value as a finite `f64`, rounding `Exact` literals if necessary.
    ///
    /// Returns `None` for `Exact` text that overflows `f64` (such as
    /// `1e400`) or is not a number at all.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonNumber::Float(f) => Some(*f),
            JsonNumber::Exact(text) => text.parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }

    /// The value as an `i64` if it is integral and fits without rounding.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonNumber::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                Some(*f as i64)
            }
            JsonNumber::Float(_) => None,
            JsonNumber::Exact(text) => text.parse().ok(),
        }
    }
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonNumber::Float(n) => write!(f, "{}", n),
            JsonNumber::Exact(text) => f.write_str(text),
        }
    }
}

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(i) = self.as_i64() {
            return serializer.serialize_i64(i);
        }
        match self {
            JsonNumber::Float(f) => serializer.serialize_f64(*f),
            JsonNumber::Exact(text) => {
                if let Ok(u) = text.parse::<u64>() {
                    return serializer.serialize_u64(u);
                }
                match self.as_f64() {
                    Some(f) => serializer.serialize_f64(f),
                    None => Err(S::Error::custom(format!(
                        "number {text} cannot be represented as a finite f64"
                    ))),
                }
            }
        }
    }
}

/// A parsed JSON value.
#[derive(Debug, PartialEq, Clone)]
pub enum AstNode {
    /// An object; see [`Object`].
    Object(Object),
    Array(Vec<AstNode>),
    /// A string with all escape sequences resolved.
    String(String),
    Number(JsonNumber),
    Boolean(bool),
    Null,
}

impl AstNode {
    pub fn is_null(&self) -> bool {
        matches!(self, AstNode::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, AstNode::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, AstNode::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, AstNode::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, AstNode::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, AstNode::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AstNode::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&JsonNumber> {
        match self {
            AstNode::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(JsonNumber::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AstNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[AstNode]> {
        match self {
            AstNode::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            AstNode::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up a member if this is an object.
    pub fn get(&self, key: &str) -> Option<&AstNode> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Looks up an element if this is an array.
    pub fn get_index(&self, index: usize) -> Option<&AstNode> {
        self.as_array().and_then(|a| a.get(index))
    }

    /// The JSON type name, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AstNode::Null => "null",
            AstNode::Boolean(_) => "boolean",
            AstNode::Number(_) => "number",
            AstNode::String(_) => "string",
            AstNode::Array(_) => "array",
            AstNode::Object(_) => "object",
        }
    }
}

impl From<bool> for AstNode {
    fn from(b: bool) -> Self {
        AstNode::Boolean(b)
    }
}

impl From<f64> for AstNode {
    fn from(n: f64) -> Self {
        AstNode::Number(JsonNumber::Float(n))
    }
}

impl From<&str> for AstNode {
    fn from(s: &str) -> Self {
        AstNode::String(s.to_string())
    }
}

impl From<String> for AstNode {
    fn from(s: String) -> Self {
        AstNode::String(s)
    }
}

impl From<Vec<AstNode>> for AstNode {
    fn from(items: Vec<AstNode>) -> Self {
        AstNode::Array(items)
    }
}

impl From<Object> for AstNode {
    fn from(members: Object) -> Self {
        AstNode::Object(members)
    }
}

impl FromStr for AstNode {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_json(s)
    }
}

// Members are emitted in source order.
impl Serialize for AstNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AstNode::Null => serializer.serialize_unit(),
            AstNode::Boolean(b) => serializer.serialize_bool(*b),
            AstNode::Number(n) => n.serialize(serializer),
            AstNode::String(s) => serializer.serialize_str(s),
            AstNode::Array(items) => serializer.collect_seq(items),
            AstNode::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in members {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}
