//! Payload field indexes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

use crate::codec::{decode_shape, deserialize_via_from_json};
use crate::error::UnionDecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PayloadSchemaType {
    Keyword,
    Integer,
    Float,
    Geo,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextIndexType {
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TokenizerType {
    Prefix,
    Whitespace,
    Word,
}

/// Full-text index options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextIndexParams {
    #[serde(rename = "type")]
    pub r#type: TextIndexType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<TokenizerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_token_len: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_token_len: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
}

impl TextIndexParams {
    pub fn new(tokenizer: TokenizerType) -> Self {
        Self {
            r#type: TextIndexType::Text,
            tokenizer: Some(tokenizer),
            min_token_len: None,
            max_token_len: None,
            lowercase: None,
        }
    }
}

/// Index description reported in [`CollectionInfo::payload_schema`](super::collections::CollectionInfo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadIndexInfo {
    pub data_type: PayloadSchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<TextIndexParams>,
    /// Points with a value under this key.
    #[serde(default)]
    pub points: u64,
}

/// Index kind requested for a field: a bare type name or a parameter block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayloadFieldSchema {
    Type(PayloadSchemaType),
    Params(TextIndexParams),
}

impl PayloadFieldSchema {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["schema type name", "text index params"];
        const UNION: &str = "PayloadFieldSchema";
        match value {
            Value::String(_) => decode_shape(UNION, SHAPES, value).map(PayloadFieldSchema::Type),
            Value::Object(_) => decode_shape(UNION, SHAPES, value).map(PayloadFieldSchema::Params),
            _ => Err(UnionDecodeError::new(UNION, SHAPES, value)),
        }
    }
}

deserialize_via_from_json!(PayloadFieldSchema);

impl From<PayloadSchemaType> for PayloadFieldSchema {
    fn from(schema_type: PayloadSchemaType) -> Self {
        PayloadFieldSchema::Type(schema_type)
    }
}

impl From<TextIndexParams> for PayloadFieldSchema {
    fn from(params: TextIndexParams) -> Self {
        PayloadFieldSchema::Params(params)
    }
}

/// Body of `PUT /collections/{name}/index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFieldIndex {
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_schema: Option<PayloadFieldSchema>,
}

impl CreateFieldIndex {
    pub fn new(field_name: impl Into<String>, schema: impl Into<PayloadFieldSchema>) -> Self {
        Self {
            field_name: field_name.into(),
            field_schema: Some(schema.into()),
        }
    }
}
