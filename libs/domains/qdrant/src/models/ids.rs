use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::codec::deserialize_via_from_json;
use crate::error::UnionDecodeError;

/// Point identifier: an unsigned integer or a string (usually a UUID).
///
/// Decoding tries unsigned integer before string, so `42` and `"42"` stay
/// distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ExtendedPointId {
    Integer(u64),
    String(String),
}

impl ExtendedPointId {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["unsigned integer", "string"];
        if let Some(n) = value.as_u64() {
            return Ok(ExtendedPointId::Integer(n));
        }
        if let Value::String(s) = value {
            return Ok(ExtendedPointId::String(s.clone()));
        }
        Err(UnionDecodeError::new("ExtendedPointId", SHAPES, value))
    }
}

deserialize_via_from_json!(ExtendedPointId);

impl fmt::Display for ExtendedPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendedPointId::Integer(n) => write!(f, "{}", n),
            ExtendedPointId::String(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ExtendedPointId {
    fn from(n: u64) -> Self {
        ExtendedPointId::Integer(n)
    }
}

impl From<&str> for ExtendedPointId {
    fn from(s: &str) -> Self {
        ExtendedPointId::String(s.to_string())
    }
}

impl From<String> for ExtendedPointId {
    fn from(s: String) -> Self {
        ExtendedPointId::String(s)
    }
}

impl From<Uuid> for ExtendedPointId {
    fn from(id: Uuid) -> Self {
        ExtendedPointId::String(id.to_string())
    }
}

/// Value a group of search hits was grouped by.
///
/// `Signed` and `Unsigned` holding the same number encode to the same JSON,
/// so they compare and hash as one value. Decoding yields `Signed` only for
/// negative numbers.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(untagged)]
pub enum GroupId {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

#[derive(PartialEq, Hash)]
enum GroupKey<'a> {
    String(&'a str),
    Number(i128),
}

impl GroupId {
    fn key(&self) -> GroupKey<'_> {
        match self {
            GroupId::String(s) => GroupKey::String(s),
            GroupId::Unsigned(n) => GroupKey::Number(i128::from(*n)),
            GroupId::Signed(n) => GroupKey::Number(i128::from(*n)),
        }
    }
}

impl PartialEq for GroupId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for GroupId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<u64> for GroupId {
    fn from(n: u64) -> Self {
        GroupId::Unsigned(n)
    }
}

impl From<i64> for GroupId {
    fn from(n: i64) -> Self {
        u64::try_from(n).map_or(GroupId::Signed(n), GroupId::Unsigned)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        GroupId::String(s.to_string())
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        GroupId::String(s)
    }
}

impl GroupId {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["string", "unsigned integer", "signed integer"];
        if let Value::String(s) = value {
            return Ok(GroupId::String(s.clone()));
        }
        if let Some(n) = value.as_u64() {
            return Ok(GroupId::Unsigned(n));
        }
        if let Some(n) = value.as_i64() {
            return Ok(GroupId::Signed(n));
        }
        Err(UnionDecodeError::new("GroupId", SHAPES, value))
    }
}

deserialize_via_from_json!(GroupId);
