//! Point read/write requests and results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;

use super::filter::Filter;
use super::ids::{ExtendedPointId, GroupId};
use super::payload::{Payload, WithPayloadInterface, WithVector};
use super::vectors::{BatchVectorStruct, NamedVectorStruct, VectorStruct};
use crate::codec::{decode_shape, deserialize_via_from_json};
use crate::error::{QdrantError, QdrantResult, UnionDecodeError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointStruct {
    pub id: ExtendedPointId,
    pub vector: VectorStruct,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl PointStruct {
    pub fn new(id: impl Into<ExtendedPointId>, vector: impl Into<VectorStruct>) -> Self {
        Self {
            id: id.into(),
            vector: vector.into(),
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Column-oriented upsert: `ids[i]` goes with the i-th vector and payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub ids: Vec<ExtendedPointId>,
    pub vectors: BatchVectorStruct,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payloads: Option<Vec<Option<Payload>>>,
}

impl Batch {
    /// Check that every column has one entry per id.
    pub fn validate(&self) -> QdrantResult<()> {
        let ids = self.ids.len();
        match self.vectors.len() {
            Some(n) if n == ids => {}
            Some(n) => {
                return Err(QdrantError::Validation(format!(
                    "batch has {} ids but {} vectors",
                    ids, n
                )));
            }
            None => {
                return Err(QdrantError::Validation(
                    "batch named vectors have different lengths".to_string(),
                ));
            }
        }
        match &self.payloads {
            Some(payloads) if payloads.len() != ids => Err(QdrantError::Validation(format!(
                "batch has {} ids but {} payloads",
                ids,
                payloads.len()
            ))),
            _ => Ok(()),
        }
    }
}

/// Body of an upsert: `{"batch": ...}` or `{"points": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointInsertOperations {
    Batch(Batch),
    Points(Vec<PointStruct>),
}

impl PointInsertOperations {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["{batch}", "{points}"];
        const UNION: &str = "PointInsertOperations";
        match value.as_object() {
            Some(object) if object.contains_key("batch") => {
                decode_shape(UNION, SHAPES, &object["batch"]).map(PointInsertOperations::Batch)
            }
            Some(object) if object.contains_key("points") => {
                decode_shape(UNION, SHAPES, &object["points"]).map(PointInsertOperations::Points)
            }
            _ => Err(UnionDecodeError::new(UNION, SHAPES, value)),
        }
    }

    pub fn validate(&self) -> QdrantResult<()> {
        match self {
            PointInsertOperations::Batch(batch) => batch.validate(),
            PointInsertOperations::Points(_) => Ok(()),
        }
    }
}

deserialize_via_from_json!(PointInsertOperations);

impl From<Vec<PointStruct>> for PointInsertOperations {
    fn from(points: Vec<PointStruct>) -> Self {
        PointInsertOperations::Points(points)
    }
}

impl From<Batch> for PointInsertOperations {
    fn from(batch: Batch) -> Self {
        PointInsertOperations::Batch(batch)
    }
}

/// Which points an operation targets: `{"points": [...]}` or `{"filter": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsSelector {
    Points(Vec<ExtendedPointId>),
    Filter(Filter),
}

impl PointsSelector {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["{points}", "{filter}"];
        const UNION: &str = "PointsSelector";
        match value.as_object() {
            Some(object) if object.contains_key("points") => {
                decode_shape(UNION, SHAPES, &object["points"]).map(PointsSelector::Points)
            }
            Some(object) if object.contains_key("filter") => {
                decode_shape(UNION, SHAPES, &object["filter"]).map(PointsSelector::Filter)
            }
            _ => Err(UnionDecodeError::new(UNION, SHAPES, value)),
        }
    }
}

deserialize_via_from_json!(PointsSelector);

impl From<Vec<ExtendedPointId>> for PointsSelector {
    fn from(ids: Vec<ExtendedPointId>) -> Self {
        PointsSelector::Points(ids)
    }
}

impl From<Filter> for PointsSelector {
    fn from(filter: Filter) -> Self {
        PointsSelector::Filter(filter)
    }
}

/// Body of `POST /collections/{name}/points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRequest {
    pub ids: Vec<ExtendedPointId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<WithPayloadInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_vector: Option<WithVector>,
}

impl PointRequest {
    pub fn new<I: Into<ExtendedPointId>>(ids: impl IntoIterator<Item = I>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            with_payload: None,
            with_vector: None,
        }
    }

    pub fn with_payload(mut self, with_payload: impl Into<WithPayloadInterface>) -> Self {
        self.with_payload = Some(with_payload.into());
        self
    }

    pub fn with_vector(mut self, with_vector: impl Into<WithVector>) -> Self {
        self.with_vector = Some(with_vector.into());
        self
    }
}

/// Stored point as returned by retrieval and scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: ExtendedPointId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorStruct>,
}

/// Search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub id: ExtendedPointId,
    pub version: u64,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<VectorStruct>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Beam size during HNSW search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hnsw_ef: Option<u64>,
    /// Skip the index and compare against every point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantization: Option<QuantizationSearchParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantizationSearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rescore: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oversampling: Option<f64>,
}

/// Body of `POST /collections/{name}/points/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub vector: NamedVectorStruct,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<SearchParams>,
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<WithPayloadInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_vector: Option<WithVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
}

impl SearchRequest {
    pub fn new(vector: impl Into<NamedVectorStruct>, limit: u64) -> Self {
        Self {
            vector: vector.into(),
            filter: None,
            params: None,
            limit,
            offset: None,
            with_payload: None,
            with_vector: None,
            score_threshold: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_payload(mut self, with_payload: impl Into<WithPayloadInterface>) -> Self {
        self.with_payload = Some(with_payload.into());
        self
    }

    pub fn with_vector(mut self, with_vector: impl Into<WithVector>) -> Self {
        self.with_vector = Some(with_vector.into());
        self
    }

    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = Some(threshold);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequestBatch {
    pub searches: Vec<SearchRequest>,
}

/// Collection (and vector name) to take recommendation examples from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupLocation {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<String>,
}

/// Body of `POST /collections/{name}/points/recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub positive: Vec<ExtendedPointId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub negative: Vec<ExtendedPointId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<SearchParams>,
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<WithPayloadInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_vector: Option<WithVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
    /// Named vector to compare; default vector when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_from: Option<LookupLocation>,
}

impl RecommendRequest {
    pub fn new<I: Into<ExtendedPointId>>(positive: impl IntoIterator<Item = I>, limit: u64) -> Self {
        Self {
            positive: positive.into_iter().map(Into::into).collect(),
            negative: Vec::new(),
            filter: None,
            params: None,
            limit,
            offset: None,
            with_payload: None,
            with_vector: None,
            score_threshold: None,
            using: None,
            lookup_from: None,
        }
    }

    pub fn with_negative<I: Into<ExtendedPointId>>(
        mut self,
        negative: impl IntoIterator<Item = I>,
    ) -> Self {
        self.negative = negative.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_payload(mut self, with_payload: impl Into<WithPayloadInterface>) -> Self {
        self.with_payload = Some(with_payload.into());
        self
    }

    pub fn with_using(mut self, vector_name: impl Into<String>) -> Self {
        self.using = Some(vector_name.into());
        self
    }

    pub fn with_lookup_from(mut self, lookup_from: LookupLocation) -> Self {
        self.lookup_from = Some(lookup_from);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequestBatch {
    pub searches: Vec<RecommendRequest>,
}

/// Body of `POST /collections/{name}/points/scroll`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollRequest {
    /// Start from this id; first page when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<ExtendedPointId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<WithPayloadInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_vector: Option<WithVector>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollResult {
    pub points: Vec<Record>,
    /// Offset of the next page; `None` on the last page.
    #[serde(default)]
    pub next_page_offset: Option<ExtendedPointId>,
}

fn exact_by_default() -> bool {
    true
}

/// Body of `POST /collections/{name}/points/count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default = "exact_by_default")]
    pub exact: bool,
}

impl Default for CountRequest {
    fn default() -> Self {
        Self {
            filter: None,
            exact: true,
        }
    }
}

impl CountRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Trade accuracy for speed.
    pub fn approximate(mut self) -> Self {
        self.exact = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    pub count: u64,
}

/// Collection records are looked up from for each group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithLookup {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<WithPayloadInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_vectors: Option<WithVector>,
}

/// `with_lookup` of a group request: a bare collection name or [`WithLookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WithLookupInterface {
    Collection(String),
    WithLookup(WithLookup),
}

impl WithLookupInterface {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        const SHAPES: &[&str] = &["collection name", "{collection, with_payload, with_vectors}"];
        match value {
            Value::String(name) => Ok(WithLookupInterface::Collection(name.clone())),
            Value::Object(_) => decode_shape("WithLookupInterface", SHAPES, value)
                .map(WithLookupInterface::WithLookup),
            _ => Err(UnionDecodeError::new("WithLookupInterface", SHAPES, value)),
        }
    }
}

deserialize_via_from_json!(WithLookupInterface);

impl From<&str> for WithLookupInterface {
    fn from(collection: &str) -> Self {
        WithLookupInterface::Collection(collection.to_string())
    }
}

/// Body of `POST /collections/{name}/points/search/groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchGroupsRequest {
    pub vector: NamedVectorStruct,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<SearchParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<WithPayloadInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_vector: Option<WithVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
    /// Payload key to group by.
    pub group_by: String,
    /// Hits per group.
    pub group_size: u64,
    /// Number of groups.
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_lookup: Option<WithLookupInterface>,
}

impl SearchGroupsRequest {
    pub fn new(
        vector: impl Into<NamedVectorStruct>,
        group_by: impl Into<String>,
        group_size: u64,
        limit: u64,
    ) -> Self {
        Self {
            vector: vector.into(),
            filter: None,
            params: None,
            with_payload: None,
            with_vector: None,
            score_threshold: None,
            group_by: group_by.into(),
            group_size,
            limit,
            with_lookup: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_lookup(mut self, lookup: impl Into<WithLookupInterface>) -> Self {
        self.with_lookup = Some(lookup.into());
        self
    }
}

/// Body of `POST /collections/{name}/points/recommend/groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendGroupsRequest {
    pub positive: Vec<ExtendedPointId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub negative: Vec<ExtendedPointId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<SearchParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_payload: Option<WithPayloadInterface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_vector: Option<WithVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_from: Option<LookupLocation>,
    pub group_by: String,
    pub group_size: u64,
    pub limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub with_lookup: Option<WithLookupInterface>,
}

impl RecommendGroupsRequest {
    pub fn new<I: Into<ExtendedPointId>>(
        positive: impl IntoIterator<Item = I>,
        group_by: impl Into<String>,
        group_size: u64,
        limit: u64,
    ) -> Self {
        Self {
            positive: positive.into_iter().map(Into::into).collect(),
            negative: Vec::new(),
            filter: None,
            params: None,
            with_payload: None,
            with_vector: None,
            score_threshold: None,
            using: None,
            lookup_from: None,
            group_by: group_by.into(),
            group_size,
            limit,
            with_lookup: None,
        }
    }

    pub fn with_negative<I: Into<ExtendedPointId>>(
        mut self,
        negative: impl IntoIterator<Item = I>,
    ) -> Self {
        self.negative = negative.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_lookup(mut self, lookup: impl Into<WithLookupInterface>) -> Self {
        self.with_lookup = Some(lookup.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupsResult {
    pub groups: Vec<PointGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGroup {
    pub hits: Vec<ScoredPoint>,
    pub id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<Record>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UpdateStatus {
    /// Accepted; applied asynchronously.
    Acknowledged,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub operation_id: u64,
    pub status: UpdateStatus,
}

/// Body of the set/overwrite payload operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPayload {
    pub payload: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<ExtendedPointId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl SetPayload {
    pub fn for_points<I: Into<ExtendedPointId>>(
        payload: Payload,
        points: impl IntoIterator<Item = I>,
    ) -> Self {
        Self {
            payload,
            points: Some(points.into_iter().map(Into::into).collect()),
            filter: None,
        }
    }

    pub fn for_filter(payload: Payload, filter: Filter) -> Self {
        Self {
            payload,
            points: None,
            filter: Some(filter),
        }
    }
}

/// Body of `POST /collections/{name}/points/payload/delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePayload {
    pub keys: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<ExtendedPointId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl DeletePayload {
    pub fn for_points<I: Into<ExtendedPointId>>(
        keys: Vec<String>,
        points: impl IntoIterator<Item = I>,
    ) -> Self {
        Self {
            keys,
            points: Some(points.into_iter().map(Into::into).collect()),
            filter: None,
        }
    }

    pub fn for_filter(keys: Vec<String>, filter: Filter) -> Self {
        Self {
            keys,
            points: None,
            filter: Some(filter),
        }
    }
}

/// Body of `PUT /collections/{name}/points/vectors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateVectors {
    pub points: Vec<PointVectors>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointVectors {
    pub id: ExtendedPointId,
    /// Only the named vectors present here are replaced.
    pub vector: VectorStruct,
}

/// Body of `POST /collections/{name}/points/vectors/delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteVectors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<ExtendedPointId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Names of the vectors to drop.
    pub vector: Vec<String>,
}
