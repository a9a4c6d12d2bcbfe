//! Locale-independent lexical forms of scalar values.
//!
//! These are the XSD renderings the XML encoder writes and the form in which
//! property values are stored in the tree.

use serde_json::{Number, Value};

use crate::model::DataTypeDefXsd;

pub fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// XSD rendering of a double: `INF`, `-INF`, `NaN`, signed zero as `0.0` or
/// `-0.0`, otherwise the shortest decimal that round-trips. Integral values
/// keep a `.0` suffix.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Parse an XSD double, accepting the special literals.
pub fn parse_double(text: &str) -> Option<f64> {
    match text.trim() {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

/// A scalar with its natural type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(String),
}

impl TypedValue {
    /// Interpret a stored lexical value according to its declared type.
    ///
    /// Text that does not parse as the declared type stays text.
    pub fn parse(value_type: DataTypeDefXsd, text: &str) -> Self {
        let parsed = match value_type {
            DataTypeDefXsd::Boolean => match text.trim() {
                "true" | "1" => Some(Self::Bool(true)),
                "false" | "0" => Some(Self::Bool(false)),
                _ => None,
            },
            t if t.is_integral() => text.trim().parse().ok().map(Self::Integer),
            t if t.is_floating() => parse_double(text).map(Self::Double),
            _ => None,
        };
        parsed.unwrap_or_else(|| Self::Text(text.to_string()))
    }

    pub fn to_lexical(&self) -> String {
        match self {
            Self::Bool(b) => format_bool(*b).to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Double(d) => format_double(*d),
            Self::Text(s) => s.clone(),
        }
    }

    /// JSON rendering; non-finite doubles become their lexical string.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Double(d) => Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(format_double(*d))),
            Self::Text(s) => Value::String(s.clone()),
        }
    }

    /// Accept a JSON scalar. Arrays, objects and null are rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Double)),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for TypedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
