use std::sync::Arc;

use http::Method;

use super::{collection_path, execute, json_request, read_query, require_non_empty, write_query};
use super::{PayloadClient, VectorsClient};
use crate::error::{QdrantError, QdrantResult};
use crate::models::{
    CountRequest, CountResult, ExtendedPointId, GroupsResult, PointInsertOperations,
    PointRequest, PointsSelector, ReadParams, RecommendGroupsRequest, RecommendRequest,
    RecommendRequestBatch, Record, ScoredPoint, ScrollRequest, ScrollResult, SearchGroupsRequest,
    SearchRequest, SearchRequestBatch, UpdateResult, WriteParams,
};
use crate::transport::{ApiRequest, QueryParams, Transport, encode_segment};

/// Point operations on a single collection.
#[derive(Clone)]
pub struct PointsClient {
    transport: Arc<dyn Transport>,
    collection: String,
}

impl PointsClient {
    pub(crate) fn new(transport: Arc<dyn Transport>, collection: String) -> Self {
        Self {
            transport,
            collection,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Payload operations on the same collection.
    pub fn payload(&self) -> PayloadClient {
        PayloadClient::new(self.transport.clone(), self.collection.clone())
    }

    /// Named-vector operations on the same collection.
    pub fn vectors(&self) -> VectorsClient {
        VectorsClient::new(self.transport.clone(), self.collection.clone())
    }

    fn path(&self, tail: &str) -> QdrantResult<String> {
        collection_path(&self.collection, tail)
    }

    /// `GET /collections/{name}/points/{id}`
    pub async fn get(&self, id: &ExtendedPointId, params: ReadParams) -> QdrantResult<Record> {
        if let ExtendedPointId::String(s) = id {
            require_non_empty("point id", s)?;
        }
        let path = self.path(&format!("/points/{}", encode_segment(&id.to_string())))?;
        let request = ApiRequest::new(Method::GET, path).with_query(read_query(params));
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points`
    pub async fn get_many(
        &self,
        request: &PointRequest,
        params: ReadParams,
    ) -> QdrantResult<Vec<Record>> {
        let request = json_request(
            Method::POST,
            self.path("/points")?,
            read_query(params),
            request,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `PUT /collections/{name}/points`
    pub async fn upsert(
        &self,
        operations: &PointInsertOperations,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        operations.validate()?;
        let request = json_request(
            Method::PUT,
            self.path("/points")?,
            write_query(params),
            operations,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/delete`
    pub async fn delete(
        &self,
        selector: &PointsSelector,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        let request = json_request(
            Method::POST,
            self.path("/points/delete")?,
            write_query(params),
            selector,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/scroll`
    pub async fn scroll(
        &self,
        request: &ScrollRequest,
        params: ReadParams,
    ) -> QdrantResult<ScrollResult> {
        let request = json_request(
            Method::POST,
            self.path("/points/scroll")?,
            read_query(params),
            request,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/search`
    pub async fn search(
        &self,
        request: &SearchRequest,
        params: ReadParams,
    ) -> QdrantResult<Vec<ScoredPoint>> {
        let request = json_request(
            Method::POST,
            self.path("/points/search")?,
            read_query(params),
            request,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/recommend`
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
        params: ReadParams,
    ) -> QdrantResult<Vec<ScoredPoint>> {
        let request = json_request(
            Method::POST,
            self.path("/points/recommend")?,
            read_query(params),
            request,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/count`
    pub async fn count(&self, request: &CountRequest) -> QdrantResult<CountResult> {
        let request = json_request(
            Method::POST,
            self.path("/points/count")?,
            QueryParams::new(),
            request,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/search/batch`
    ///
    /// One result list per search, in request order.
    pub async fn search_batch(
        &self,
        batch: &SearchRequestBatch,
        params: ReadParams,
    ) -> QdrantResult<Vec<Vec<ScoredPoint>>> {
        if batch.searches.is_empty() {
            return Err(QdrantError::Validation(
                "search batch must contain at least one search".to_string(),
            ));
        }
        let request = json_request(
            Method::POST,
            self.path("/points/search/batch")?,
            read_query(params),
            batch,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/search/groups`
    pub async fn search_groups(
        &self,
        request: &SearchGroupsRequest,
        params: ReadParams,
    ) -> QdrantResult<GroupsResult> {
        let request = json_request(
            Method::POST,
            self.path("/points/search/groups")?,
            read_query(params),
            request,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/recommend/batch`
    pub async fn recommend_batch(
        &self,
        batch: &RecommendRequestBatch,
        params: ReadParams,
    ) -> QdrantResult<Vec<Vec<ScoredPoint>>> {
        if batch.searches.is_empty() {
            return Err(QdrantError::Validation(
                "recommend batch must contain at least one request".to_string(),
            ));
        }
        let request = json_request(
            Method::POST,
            self.path("/points/recommend/batch")?,
            read_query(params),
            batch,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/recommend/groups`
    pub async fn recommend_groups(
        &self,
        request: &RecommendGroupsRequest,
        params: ReadParams,
    ) -> QdrantResult<GroupsResult> {
        let request = json_request(
            Method::POST,
            self.path("/points/recommend/groups")?,
            read_query(params),
            request,
        )?;
        execute(self.transport.as_ref(), request).await
    }
}
