//! Collection lifecycle models: create/update requests, collection info and
//! the nested configuration blocks in their full and diff forms.

use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use strum::Display;

use super::index::PayloadIndexInfo;
use super::vectors::VectorsConfig;
use crate::codec::{decode_shape, deserialize_via_from_json, ok_or_error, serialize_ok_or_error};
use crate::error::UnionDecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CollectionStatus {
    /// All points processed.
    Green,
    /// Optimization in progress.
    Yellow,
    /// Failure the service could not recover from.
    Red,
}

/// Optimizer health: `"ok"` or `{"error": msg}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizersStatus {
    Ok,
    Error(String),
}

impl OptimizersStatus {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        ok_or_error("OptimizersStatus", value).map(|status| match status {
            None => OptimizersStatus::Ok,
            Some(message) => OptimizersStatus::Error(message),
        })
    }
}

impl Serialize for OptimizersStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptimizersStatus::Ok => serialize_ok_or_error(None, serializer),
            OptimizersStatus::Error(message) => serialize_ok_or_error(Some(message.as_str()), serializer),
        }
    }
}

deserialize_via_from_json!(OptimizersStatus);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub status: CollectionStatus,
    pub optimizer_status: OptimizersStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vectors_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_vectors_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_count: Option<u64>,
    pub segments_count: u64,
    pub config: CollectionConfig,
    #[serde(default)]
    pub payload_schema: HashMap<String, PayloadIndexInfo>,
}

/// Effective configuration of an existing collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub params: CollectionParams,
    pub hnsw_config: HnswConfig,
    pub optimizer_config: OptimizersConfig,
    pub wal_config: WalConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization_config: Option<QuantizationConfig>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionParams {
    pub vectors: VectorsConfig,
    #[serde(default = "one")]
    pub shard_number: u32,
    #[serde(default = "one")]
    pub replication_factor: u32,
    #[serde(default = "one")]
    pub write_consistency_factor: u32,
    #[serde(default)]
    pub on_disk_payload: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionParamsDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_factor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_consistency_factor: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnswConfig {
    /// Edges per node in the index graph.
    pub m: u64,
    pub ef_construct: u64,
    /// In kilobytes; below this, search skips the index.
    pub full_scan_threshold: u64,
    /// 0 picks a value automatically.
    #[serde(default)]
    pub max_indexing_threads: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_disk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_m: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnswConfigDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ef_construct: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_scan_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_indexing_threads: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_disk: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_m: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalConfig {
    pub wal_capacity_mb: u64,
    pub wal_segments_ahead: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalConfigDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wal_capacity_mb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wal_segments_ahead: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizersConfig {
    /// Fraction of deleted vectors that triggers a segment rebuild.
    pub deleted_threshold: f64,
    pub vacuum_min_vector_number: u64,
    pub default_segment_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_segment_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memmap_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_threshold: Option<u64>,
    pub flush_interval_sec: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_optimization_threads: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizersConfigDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacuum_min_vector_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_segment_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_segment_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memmap_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_threshold: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flush_interval_sec: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_optimization_threads: Option<u64>,
}

/// Lossy vector compression; `{"scalar": ...}` or `{"product": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantizationConfig {
    Scalar(ScalarQuantizationConfig),
    Product(ProductQuantizationConfig),
}

impl QuantizationConfig {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["{scalar}", "{product}"];
        const UNION: &str = "QuantizationConfig";
        match value.as_object() {
            Some(object) if object.contains_key("scalar") => {
                decode_shape(UNION, SHAPES, &object["scalar"]).map(QuantizationConfig::Scalar)
            }
            Some(object) if object.contains_key("product") => {
                decode_shape(UNION, SHAPES, &object["product"]).map(QuantizationConfig::Product)
            }
            _ => Err(UnionDecodeError::new(UNION, SHAPES, value)),
        }
    }

    pub fn scalar_int8() -> Self {
        QuantizationConfig::Scalar(ScalarQuantizationConfig {
            r#type: ScalarType::Int8,
            quantile: None,
            always_ram: None,
        })
    }
}

deserialize_via_from_json!(QuantizationConfig);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarQuantizationConfig {
    #[serde(rename = "type")]
    pub r#type: ScalarType,
    /// Share of values kept inside the quantization range, in (0.5, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantile: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_ram: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScalarType {
    Int8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantizationConfig {
    pub compression: CompressionRatio,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub always_ram: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CompressionRatio {
    X4,
    X8,
    X16,
    X32,
    X64,
}

/// Seed a new collection with the points of an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitFrom {
    pub collection: String,
}

/// Body of `PUT /collections/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCollection {
    pub vectors: VectorsConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shard_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_factor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write_consistency_factor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_disk_payload: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hnsw_config: Option<HnswConfigDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wal_config: Option<WalConfigDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizers_config: Option<OptimizersConfigDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_from: Option<InitFrom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization_config: Option<QuantizationConfig>,
}

impl CreateCollection {
    pub fn new(vectors: impl Into<VectorsConfig>) -> Self {
        Self {
            vectors: vectors.into(),
            shard_number: None,
            replication_factor: None,
            write_consistency_factor: None,
            on_disk_payload: None,
            hnsw_config: None,
            wal_config: None,
            optimizers_config: None,
            init_from: None,
            quantization_config: None,
        }
    }

    pub fn with_shard_number(mut self, shard_number: u32) -> Self {
        self.shard_number = Some(shard_number);
        self
    }

    pub fn with_replication_factor(mut self, replication_factor: u32) -> Self {
        self.replication_factor = Some(replication_factor);
        self
    }

    pub fn with_write_consistency_factor(mut self, factor: u32) -> Self {
        self.write_consistency_factor = Some(factor);
        self
    }

    pub fn with_on_disk_payload(mut self, on_disk_payload: bool) -> Self {
        self.on_disk_payload = Some(on_disk_payload);
        self
    }

    pub fn with_hnsw_config(mut self, hnsw_config: HnswConfigDiff) -> Self {
        self.hnsw_config = Some(hnsw_config);
        self
    }

    pub fn with_wal_config(mut self, wal_config: WalConfigDiff) -> Self {
        self.wal_config = Some(wal_config);
        self
    }

    pub fn with_optimizers_config(mut self, optimizers_config: OptimizersConfigDiff) -> Self {
        self.optimizers_config = Some(optimizers_config);
        self
    }

    pub fn with_init_from(mut self, collection: impl Into<String>) -> Self {
        self.init_from = Some(InitFrom {
            collection: collection.into(),
        });
        self
    }

    pub fn with_quantization(mut self, quantization: QuantizationConfig) -> Self {
        self.quantization_config = Some(quantization);
        self
    }
}

/// Body of `PATCH /collections/{name}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCollection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizers_config: Option<OptimizersConfigDiff>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<CollectionParamsDiff>,
}

impl UpdateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_optimizers_config(mut self, optimizers_config: OptimizersConfigDiff) -> Self {
        self.optimizers_config = Some(optimizers_config);
        self
    }

    pub fn with_params(mut self, params: CollectionParamsDiff) -> Self {
        self.params = Some(params);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDescription {
    pub name: String,
}

/// Body of `POST /collections/aliases`; actions apply atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeAliasesOperation {
    pub actions: Vec<AliasOperations>,
}

impl ChangeAliasesOperation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_alias(
        mut self,
        collection_name: impl Into<String>,
        alias_name: impl Into<String>,
    ) -> Self {
        self.actions.push(AliasOperations::CreateAlias(CreateAlias {
            collection_name: collection_name.into(),
            alias_name: alias_name.into(),
        }));
        self
    }

    pub fn delete_alias(mut self, alias_name: impl Into<String>) -> Self {
        self.actions.push(AliasOperations::DeleteAlias(DeleteAlias {
            alias_name: alias_name.into(),
        }));
        self
    }

    pub fn rename_alias(
        mut self,
        old_alias_name: impl Into<String>,
        new_alias_name: impl Into<String>,
    ) -> Self {
        self.actions.push(AliasOperations::RenameAlias(RenameAlias {
            old_alias_name: old_alias_name.into(),
            new_alias_name: new_alias_name.into(),
        }));
        self
    }
}

/// `{"create_alias": ...}`, `{"delete_alias": ...}` or `{"rename_alias": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasOperations {
    CreateAlias(CreateAlias),
    DeleteAlias(DeleteAlias),
    RenameAlias(RenameAlias),
}

impl AliasOperations {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["{create_alias}", "{delete_alias}", "{rename_alias}"];
        const UNION: &str = "AliasOperations";
        match value.as_object() {
            Some(object) if object.contains_key("create_alias") => {
                decode_shape(UNION, SHAPES, &object["create_alias"]).map(AliasOperations::CreateAlias)
            }
            Some(object) if object.contains_key("delete_alias") => {
                decode_shape(UNION, SHAPES, &object["delete_alias"]).map(AliasOperations::DeleteAlias)
            }
            Some(object) if object.contains_key("rename_alias") => {
                decode_shape(UNION, SHAPES, &object["rename_alias"]).map(AliasOperations::RenameAlias)
            }
            _ => Err(UnionDecodeError::new(UNION, SHAPES, value)),
        }
    }

    /// Alias names this action refers to.
    pub fn alias_names(&self) -> Vec<&str> {
        match self {
            AliasOperations::CreateAlias(op) => vec![op.alias_name.as_str()],
            AliasOperations::DeleteAlias(op) => vec![op.alias_name.as_str()],
            AliasOperations::RenameAlias(op) => {
                vec![op.old_alias_name.as_str(), op.new_alias_name.as_str()]
            }
        }
    }
}

deserialize_via_from_json!(AliasOperations);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAlias {
    pub collection_name: String,
    pub alias_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAlias {
    pub alias_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameAlias {
    pub old_alias_name: String,
    pub new_alias_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionsAliasesResponse {
    pub aliases: Vec<AliasDescription>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDescription {
    pub alias_name: String,
    pub collection_name: String,
}
