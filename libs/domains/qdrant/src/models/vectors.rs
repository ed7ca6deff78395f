use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

use super::collections::{HnswConfigDiff, QuantizationConfig};
use crate::codec::{decode_shape, deserialize_via_from_json, number_array};
use crate::error::UnionDecodeError;

/// Vector of a stored point: a flat array, or named vectors for collections
/// configured with several vector spaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VectorStruct {
    Single(Vec<f32>),
    Named(HashMap<String, Vec<f32>>),
}

impl VectorStruct {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["number array", "map of name to number array"];
        let fail = || UnionDecodeError::new("VectorStruct", SHAPES, value);
        match value {
            Value::Array(_) => number_array(value)
                .map(VectorStruct::Single)
                .ok_or_else(|| fail().with_reason("array contains a non-numeric element")),
            Value::Object(object) => object
                .iter()
                .map(|(name, v)| number_array(v).map(|vector| (name.clone(), vector)))
                .collect::<Option<HashMap<_, _>>>()
                .map(VectorStruct::Named)
                .ok_or_else(|| fail().with_reason("named vector is not a number array")),
            _ => Err(fail()),
        }
    }
}

deserialize_via_from_json!(VectorStruct);

impl From<Vec<f32>> for VectorStruct {
    fn from(vector: Vec<f32>) -> Self {
        VectorStruct::Single(vector)
    }
}

impl From<HashMap<String, Vec<f32>>> for VectorStruct {
    fn from(vectors: HashMap<String, Vec<f32>>) -> Self {
        VectorStruct::Named(vectors)
    }
}

/// Column-oriented vectors of a [`Batch`](super::points::Batch).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchVectorStruct {
    Single(Vec<Vec<f32>>),
    Named(HashMap<String, Vec<Vec<f32>>>),
}

impl BatchVectorStruct {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["array of number arrays", "map of name to array of number arrays"];
        let fail = || UnionDecodeError::new("BatchVectorStruct", SHAPES, value);
        match value {
            Value::Array(rows) => rows
                .iter()
                .map(number_array)
                .collect::<Option<Vec<_>>>()
                .map(BatchVectorStruct::Single)
                .ok_or_else(|| fail().with_reason("row is not a number array")),
            Value::Object(object) => object
                .iter()
                .map(|(name, rows)| {
                    rows.as_array()?
                        .iter()
                        .map(number_array)
                        .collect::<Option<Vec<_>>>()
                        .map(|rows| (name.clone(), rows))
                })
                .collect::<Option<HashMap<_, _>>>()
                .map(BatchVectorStruct::Named)
                .ok_or_else(|| fail().with_reason("named rows are not arrays of number arrays")),
            _ => Err(fail()),
        }
    }

    /// Number of vectors per name; `None` when named columns disagree.
    pub fn len(&self) -> Option<usize> {
        match self {
            BatchVectorStruct::Single(rows) => Some(rows.len()),
            BatchVectorStruct::Named(columns) => {
                let mut lengths = columns.values().map(Vec::len);
                let first = lengths.next().unwrap_or(0);
                lengths.all(|len| len == first).then_some(first)
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

deserialize_via_from_json!(BatchVectorStruct);

/// Query vector of a search: the default vector, or a named one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NamedVectorStruct {
    Default(Vec<f32>),
    Named(NamedVector),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVector {
    pub name: String,
    pub vector: Vec<f32>,
}

impl NamedVectorStruct {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["number array", "{name, vector}"];
        match value {
            Value::Array(_) => number_array(value)
                .map(NamedVectorStruct::Default)
                .ok_or_else(|| {
                    UnionDecodeError::new("NamedVectorStruct", SHAPES, value)
                        .with_reason("array contains a non-numeric element")
                }),
            Value::Object(object) if object.contains_key("vector") => {
                decode_shape("NamedVectorStruct", SHAPES, value).map(NamedVectorStruct::Named)
            }
            _ => Err(UnionDecodeError::new("NamedVectorStruct", SHAPES, value)),
        }
    }

    pub fn named(name: impl Into<String>, vector: Vec<f32>) -> Self {
        NamedVectorStruct::Named(NamedVector {
            name: name.into(),
            vector,
        })
    }
}

deserialize_via_from_json!(NamedVectorStruct);

impl From<Vec<f32>> for NamedVectorStruct {
    fn from(vector: Vec<f32>) -> Self {
        NamedVectorStruct::Default(vector)
    }
}

/// Similarity function of a vector space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Distance {
    Cosine,
    Euclid,
    Dot,
    Manhattan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorParams {
    pub size: u64,
    pub distance: Distance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hnsw_config: Option<HnswConfigDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization_config: Option<QuantizationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_disk: Option<bool>,
}

impl VectorParams {
    pub fn new(size: u64, distance: Distance) -> Self {
        Self {
            size,
            distance,
            hnsw_config: None,
            quantization_config: None,
            on_disk: None,
        }
    }

    pub fn with_hnsw_config(mut self, hnsw_config: HnswConfigDiff) -> Self {
        self.hnsw_config = Some(hnsw_config);
        self
    }

    pub fn with_quantization(mut self, quantization: QuantizationConfig) -> Self {
        self.quantization_config = Some(quantization);
        self
    }

    pub fn with_on_disk(mut self, on_disk: bool) -> Self {
        self.on_disk = Some(on_disk);
        self
    }
}

/// Vector space(s) of a collection: one unnamed space or several named ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VectorsConfig {
    Single(VectorParams),
    Multi(HashMap<String, VectorParams>),
}

impl VectorsConfig {
    /// An object with a numeric `size` and a `distance` is the single form;
    /// any other object is a map of named spaces.
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["vector params", "map of name to vector params"];
        let Value::Object(object) = value else {
            return Err(UnionDecodeError::new("VectorsConfig", SHAPES, value));
        };
        let is_single = object.get("size").is_some_and(Value::is_number)
            && object.contains_key("distance");
        if is_single {
            decode_shape("VectorsConfig", SHAPES, value).map(VectorsConfig::Single)
        } else {
            decode_shape("VectorsConfig", SHAPES, value).map(VectorsConfig::Multi)
        }
    }

    pub fn single(size: u64, distance: Distance) -> Self {
        VectorsConfig::Single(VectorParams::new(size, distance))
    }
}

deserialize_via_from_json!(VectorsConfig);

impl From<VectorParams> for VectorsConfig {
    fn from(params: VectorParams) -> Self {
        VectorsConfig::Single(params)
    }
}
