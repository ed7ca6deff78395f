//! Cluster state and service telemetry.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

use super::collections::{CollectionParams, OptimizersStatus};
use crate::codec::{decode_shape, deserialize_via_from_json};
use crate::error::UnionDecodeError;

/// Result of `GET /cluster`, tagged by its `status` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClusterStatus {
    Disabled,
    Enabled(EnabledClusterStatus),
}

impl ClusterStatus {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ClusterStatus::Enabled(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnabledClusterStatus {
    pub peer_id: u64,
    pub peers: HashMap<String, PeerInfo>,
    pub raft_info: RaftInfo,
    pub consensus_thread_status: ConsensusThreadStatus,
    #[serde(default)]
    pub message_send_failures: HashMap<String, MessageSendErrors>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerInfo {
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaftInfo {
    pub term: u64,
    pub commit: u64,
    pub pending_operations: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<StateRole>,
    pub is_voter: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum StateRole {
    Follower,
    Candidate,
    Leader,
    PreCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusThreadStatus {
    pub consensus_thread_status: ConsensusThreadState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConsensusThreadState {
    Working,
    Stopped,
    #[serde(rename = "stopped_with_err")]
    #[strum(serialize = "stopped_with_err")]
    StoppedWithError,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSendErrors {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_error: Option<String>,
}

/// Result of `GET /collections/{name}/cluster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionClusterInfo {
    pub peer_id: u64,
    pub shard_count: u64,
    pub local_shards: Vec<LocalShardInfo>,
    pub remote_shards: Vec<RemoteShardInfo>,
    #[serde(default)]
    pub shard_transfers: Vec<ShardTransferInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalShardInfo {
    pub shard_id: u32,
    pub points_count: u64,
    pub state: ReplicaState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteShardInfo {
    pub shard_id: u32,
    pub peer_id: u64,
    pub state: ReplicaState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardTransferInfo {
    pub shard_id: u32,
    pub from: u64,
    pub to: u64,
    /// Transfer replays the full shard rather than just the diff.
    pub sync: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ReplicaState {
    Active,
    Dead,
    Partial,
    Initializing,
    Listener,
}

/// Result of `GET /telemetry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryData {
    pub id: String,
    pub app: AppBuildTelemetry,
    pub collections: CollectionsTelemetry,
    pub cluster: ClusterTelemetry,
    pub requests: RequestsTelemetry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppBuildTelemetry {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<AppFeaturesTelemetry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<RunningEnvironmentTelemetry>,
    pub startup: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppFeaturesTelemetry {
    pub debug: bool,
    pub web_feature: bool,
    pub service_debug_feature: bool,
    #[serde(default)]
    pub recovery_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningEnvironmentTelemetry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_version: Option<String>,
    pub is_docker: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_size: Option<u64>,
    #[serde(default)]
    pub cpu_flags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionsTelemetry {
    pub number_of_collections: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<CollectionTelemetryEnum>>,
}

/// Per-collection telemetry: full detail or the anonymized aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CollectionTelemetryEnum {
    Full(CollectionTelemetry),
    Aggregated(CollectionsAggregatedTelemetry),
}

impl CollectionTelemetryEnum {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["{id, ...}", "{vectors, ...}"];
        const UNION: &str = "CollectionTelemetryEnum";
        match value.as_object() {
            Some(object) if object.contains_key("id") => {
                decode_shape(UNION, SHAPES, value).map(CollectionTelemetryEnum::Full)
            }
            Some(object) if object.contains_key("vectors") => {
                decode_shape(UNION, SHAPES, value).map(CollectionTelemetryEnum::Aggregated)
            }
            _ => Err(UnionDecodeError::new(UNION, SHAPES, value)),
        }
    }
}

deserialize_via_from_json!(CollectionTelemetryEnum);

/// Shard and segment detail is passed through untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionTelemetry {
    pub id: String,
    pub init_time_ms: u64,
    pub config: Value,
    #[serde(default)]
    pub shards: Vec<Value>,
    #[serde(default)]
    pub transfers: Vec<ShardTransferInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionsAggregatedTelemetry {
    pub vectors: u64,
    pub optimizers_status: OptimizersStatus,
    pub params: CollectionParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterTelemetry {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClusterStatusTelemetry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ClusterConfigTelemetry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStatusTelemetry {
    pub number_of_peers: u64,
    pub term: u64,
    pub commit: u64,
    pub pending_operations: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<StateRole>,
    pub is_voter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_id: Option<u64>,
    pub consensus_thread_status: ConsensusThreadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfigTelemetry {
    pub grpc_timeout_ms: u64,
    pub p2p: P2pConfigTelemetry,
    pub consensus: ConsensusConfigTelemetry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct P2pConfigTelemetry {
    pub connection_pool_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusConfigTelemetry {
    pub max_message_queue_size: u64,
    pub tick_period_ms: u64,
    pub bootstrap_timeout_sec: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestsTelemetry {
    pub rest: WebApiTelemetry,
    pub grpc: GrpcTelemetry,
}

/// Keyed by endpoint, then by HTTP status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebApiTelemetry {
    #[serde(default)]
    pub responses: HashMap<String, HashMap<String, OperationDurationStatistics>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrpcTelemetry {
    #[serde(default)]
    pub responses: HashMap<String, OperationDurationStatistics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDurationStatistics {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_duration_micros: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration_micros: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_micros: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_responded: Option<DateTime<Utc>>,
}
