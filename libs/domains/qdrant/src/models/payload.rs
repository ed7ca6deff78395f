use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::{decode_shape, deserialize_via_from_json};
use crate::error::UnionDecodeError;

/// Arbitrary JSON object attached to a point.
pub type Payload = serde_json::Map<String, Value>;

/// Which payload to return alongside points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WithPayloadInterface {
    /// `true` returns the whole payload, `false` none of it.
    Bool(bool),
    /// Only these keys.
    Fields(Vec<String>),
    Selector(PayloadSelector),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSelector {
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl WithPayloadInterface {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["bool", "string array", "{include | exclude}"];
        match value {
            Value::Bool(b) => Ok(WithPayloadInterface::Bool(*b)),
            Value::Array(_) => {
                decode_shape("WithPayloadInterface", SHAPES, value).map(WithPayloadInterface::Fields)
            }
            Value::Object(_) => decode_shape("WithPayloadInterface", SHAPES, value)
                .map(WithPayloadInterface::Selector),
            _ => Err(UnionDecodeError::new("WithPayloadInterface", SHAPES, value)),
        }
    }
}

deserialize_via_from_json!(WithPayloadInterface);

impl From<bool> for WithPayloadInterface {
    fn from(b: bool) -> Self {
        WithPayloadInterface::Bool(b)
    }
}

impl From<Vec<String>> for WithPayloadInterface {
    fn from(fields: Vec<String>) -> Self {
        WithPayloadInterface::Fields(fields)
    }
}

impl From<PayloadSelector> for WithPayloadInterface {
    fn from(selector: PayloadSelector) -> Self {
        WithPayloadInterface::Selector(selector)
    }
}

/// Which vectors to return alongside points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WithVector {
    Bool(bool),
    /// Only these named vectors.
    Selector(Vec<String>),
}

impl WithVector {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["bool", "string array"];
        match value {
            Value::Bool(b) => Ok(WithVector::Bool(*b)),
            Value::Array(_) => decode_shape("WithVector", SHAPES, value).map(WithVector::Selector),
            _ => Err(UnionDecodeError::new("WithVector", SHAPES, value)),
        }
    }
}

deserialize_via_from_json!(WithVector);

impl From<bool> for WithVector {
    fn from(b: bool) -> Self {
        WithVector::Bool(b)
    }
}

impl From<Vec<String>> for WithVector {
    fn from(names: Vec<String>) -> Self {
        WithVector::Selector(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_payload_priority() {
        assert_eq!(
            serde_json::from_value::<WithPayloadInterface>(json!(false)).unwrap(),
            WithPayloadInterface::Bool(false)
        );
        assert_eq!(
            serde_json::from_value::<WithPayloadInterface>(json!(["city"])).unwrap(),
            WithPayloadInterface::Fields(vec!["city".to_string()])
        );
        assert_eq!(
            serde_json::from_value::<WithPayloadInterface>(json!({"exclude": ["secret"]}))
                .unwrap(),
            WithPayloadInterface::Selector(PayloadSelector::Exclude(vec!["secret".to_string()]))
        );
    }

    #[test]
    fn test_with_payload_selector_encoding() {
        let value = WithPayloadInterface::from(PayloadSelector::Include(vec!["a".to_string()]));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"include": ["a"]}));
    }

    #[test]
    fn test_with_payload_rejects_number() {
        let err = serde_json::from_value::<WithPayloadInterface>(json!(1)).unwrap_err();
        assert!(err.to_string().contains("bool -> string array"));
    }

    #[test]
    fn test_with_vector_has_no_selector_object() {
        assert_eq!(
            serde_json::from_value::<WithVector>(json!(["image"])).unwrap(),
            WithVector::Selector(vec!["image".to_string()])
        );
        assert!(serde_json::from_value::<WithVector>(json!({"include": ["image"]})).is_err());
    }
}
