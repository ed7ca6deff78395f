//! Query-string tuning parameters shared by the point operations.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::codec::{decode_shape, deserialize_via_from_json};
use crate::error::UnionDecodeError;

/// Write durability requested through the `ordering` parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WriteOrdering {
    Weak,
    Medium,
    Strong,
}

/// Named replica-agreement levels for reads.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReadConsistencyType {
    Majority,
    Quorum,
    All,
}

/// `consistency` parameter: a replica count or a named level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadConsistency {
    Factor(u64),
    Type(ReadConsistencyType),
}

impl ReadConsistency {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["unsigned integer", "majority | quorum | all"];
        if let Some(factor) = value.as_u64() {
            return Ok(ReadConsistency::Factor(factor));
        }
        if value.is_string() {
            return decode_shape("ReadConsistency", SHAPES, value).map(ReadConsistency::Type);
        }
        Err(UnionDecodeError::new("ReadConsistency", SHAPES, value))
    }
}

impl fmt::Display for ReadConsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadConsistency::Factor(factor) => write!(f, "{}", factor),
            ReadConsistency::Type(level) => write!(f, "{}", level),
        }
    }
}

impl Serialize for ReadConsistency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReadConsistency::Factor(factor) => serializer.serialize_u64(*factor),
            ReadConsistency::Type(level) => level.serialize(serializer),
        }
    }
}

deserialize_via_from_json!(ReadConsistency);

impl From<u64> for ReadConsistency {
    fn from(factor: u64) -> Self {
        ReadConsistency::Factor(factor)
    }
}

impl From<ReadConsistencyType> for ReadConsistency {
    fn from(level: ReadConsistencyType) -> Self {
        ReadConsistency::Type(level)
    }
}

/// `wait`/`ordering` query parameters of a write. Absent values are left off the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteParams {
    pub wait: Option<bool>,
    pub ordering: Option<WriteOrdering>,
}

impl WriteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the change is applied.
    pub fn wait(mut self, wait: bool) -> Self {
        self.wait = Some(wait);
        self
    }

    pub fn ordering(mut self, ordering: WriteOrdering) -> Self {
        self.ordering = Some(ordering);
        self
    }
}

/// `consistency` query parameter of a read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadParams {
    pub consistency: Option<ReadConsistency>,
}

impl ReadParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn consistency(mut self, consistency: impl Into<ReadConsistency>) -> Self {
        self.consistency = Some(consistency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_consistency_integer_first() {
        let decoded: ReadConsistency = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(decoded, ReadConsistency::Factor(2));
        assert_eq!(decoded.to_string(), "2");
    }

    #[test]
    fn test_read_consistency_named_level() {
        let decoded: ReadConsistency = serde_json::from_value(json!("quorum")).unwrap();
        assert_eq!(decoded, ReadConsistency::Type(ReadConsistencyType::Quorum));
        assert_eq!(decoded.to_string(), "quorum");
        assert_eq!(serde_json::to_value(decoded).unwrap(), json!("quorum"));
    }

    #[test]
    fn test_read_consistency_rejects_negative_and_unknown() {
        assert!(serde_json::from_value::<ReadConsistency>(json!(-1)).is_err());
        let err = serde_json::from_value::<ReadConsistency>(json!("eventual")).unwrap_err();
        assert!(err.to_string().contains("ReadConsistency"));
    }

    #[test]
    fn test_write_ordering_query_value() {
        assert_eq!(WriteOrdering::Strong.to_string(), "strong");
        assert_eq!("medium".parse::<WriteOrdering>().unwrap(), WriteOrdering::Medium);
        assert_eq!(serde_json::to_value(WriteOrdering::Weak).unwrap(), json!("weak"));
    }
}
