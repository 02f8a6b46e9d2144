use crate::raw::{RawNumber, RawValue};
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use tracing::warn;

impl Display for RawNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RawNumber::UnsignedInt(n) => write!(f, "{}", n),
            RawNumber::SignedInt(n) => write!(f, "{}", n),
            RawNumber::Float(n) => write!(f, "{}", n),
            RawNumber::Undefined => write!(f, "NaN"),
        }
    }
}

impl PartialEq for RawNumber {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RawNumber::UnsignedInt(a), RawNumber::UnsignedInt(b)) => a == b,
            (RawNumber::SignedInt(a), RawNumber::SignedInt(b)) => a == b,
            (RawNumber::UnsignedInt(a), RawNumber::SignedInt(b))
            | (RawNumber::SignedInt(b), RawNumber::UnsignedInt(a)) => {
                i64::try_from(*a).map(|a| a == *b).unwrap_or(false)
            }
            (RawNumber::Float(a), RawNumber::Float(b)) => a == b,
            (RawNumber::Undefined, RawNumber::Undefined) => true,
            _ => false,
        }
    }
}

impl Eq for RawNumber {}

impl From<serde_json::Number> for RawNumber {

    fn from(value: serde_json::Number) -> Self {
        if let Some(n) = value.as_i64() {
            Self::SignedInt(n)
        } else if let Some(n) = value.as_u64() {
            Self::UnsignedInt(n)
        } else if let Some(n) = value.as_f64() {
            Self::Float(n)
        } else {
            warn!("Unknown number type: {:?}", value);
            Self::Undefined
        }
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(RawNumber::SignedInt(value as i64))
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Number(RawNumber::SignedInt(value))
    }
}

impl From<u64> for RawValue {
    fn from(value: u64) -> Self {
        Self::Number(RawNumber::UnsignedInt(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(RawNumber::Float(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(value: Vec<T>) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for RawValue {
    fn from(value: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut obj = HashMap::new();
        for (k, v) in value {
            obj.insert(k, RawValue::from(v));
        }
        Self::Object(obj)
    }
}

impl From<serde_json::Value> for RawValue {

    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(RawNumber::from(n)),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(arr) => Self::from(arr),
            serde_json::Value::Object(o) => Self::from(o)
        }
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "null"),
            RawValue::Text(text) => write!(f, "{}", text),
            RawValue::Number(number) => write!(f, "{}", number),
            RawValue::Bool(bool) => write!(f, "{}", bool),
            RawValue::Object(object) => write!(f, "{:?}", object),
            RawValue::Array(array) => write!(f, "{:?}", array),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_json_document() {
        let raw = RawValue::from(json!({
            "id": 7,
            "title": "Crossed",
            "ebook": true,
            "tags": ["horror", "comic"],
            "price": 9.5,
            "publisher": null
        }));

        assert_eq!(raw.get("id").and_then(RawValue::as_int), Some(7));
        assert_eq!(raw.get("title").and_then(RawValue::as_text), Some("Crossed"));
        assert_eq!(raw.get("ebook").and_then(RawValue::as_bool), Some(true));
        assert_eq!(raw.get("tags").and_then(RawValue::as_array).map(|a| a.len()), Some(2));
        assert_eq!(raw.get("price").and_then(RawValue::as_int), None);
        assert!(raw.get("publisher").is_some_and(RawValue::is_null));
        assert!(raw.get("missing").is_none());
    }

    #[test]
    fn signed_and_unsigned_numbers_compare_by_value() {
        assert_eq!(RawNumber::SignedInt(5), RawNumber::UnsignedInt(5));
        assert_ne!(RawNumber::SignedInt(-5), RawNumber::UnsignedInt(5));
        assert_ne!(RawNumber::Float(5.0), RawNumber::SignedInt(5));
    }

    #[test]
    fn display_renders_scalars() {
        assert_eq!(RawValue::from("text").to_string(), "text");
        assert_eq!(RawValue::from(12).to_string(), "12");
        assert_eq!(RawValue::Null.to_string(), "null");
        assert_eq!(RawValue::from(false).to_string(), "false");
    }
}
