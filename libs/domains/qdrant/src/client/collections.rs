use std::sync::Arc;

use http::Method;

use super::{collection_path, execute, json_request, require_non_empty, write_query};
use crate::error::QdrantResult;
use crate::models::{
    ChangeAliasesOperation, CollectionClusterInfo, CollectionInfo, CollectionsAliasesResponse,
    CollectionsResponse, CreateCollection, CreateFieldIndex, UpdateCollection, UpdateResult,
    WriteParams,
};
use crate::transport::{ApiRequest, QueryParams, Transport, encode_segment};

/// Collection lifecycle, aliases and payload indexes.
#[derive(Clone)]
pub struct CollectionsClient {
    transport: Arc<dyn Transport>,
}

impl CollectionsClient {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /collections`
    pub async fn list(&self) -> QdrantResult<CollectionsResponse> {
        let request = ApiRequest::new(Method::GET, "/collections");
        execute(self.transport.as_ref(), request).await
    }

    /// `GET /collections/{name}`
    pub async fn info(&self, name: &str) -> QdrantResult<CollectionInfo> {
        let request = ApiRequest::new(Method::GET, collection_path(name, "")?);
        execute(self.transport.as_ref(), request).await
    }

    /// `PUT /collections/{name}`
    pub async fn create(&self, name: &str, parameters: &CreateCollection) -> QdrantResult<bool> {
        let request = json_request(
            Method::PUT,
            collection_path(name, "")?,
            QueryParams::new(),
            parameters,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `PATCH /collections/{name}`
    pub async fn update(&self, name: &str, parameters: &UpdateCollection) -> QdrantResult<bool> {
        let request = json_request(
            Method::PATCH,
            collection_path(name, "")?,
            QueryParams::new(),
            parameters,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `DELETE /collections/{name}`
    pub async fn delete(&self, name: &str) -> QdrantResult<bool> {
        let request = ApiRequest::new(Method::DELETE, collection_path(name, "")?);
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/aliases`, applied atomically.
    pub async fn update_aliases(&self, operations: &ChangeAliasesOperation) -> QdrantResult<bool> {
        for action in &operations.actions {
            for alias in action.alias_names() {
                require_non_empty("alias name", alias)?;
            }
        }
        let request = json_request(
            Method::POST,
            "/collections/aliases".to_string(),
            QueryParams::new(),
            operations,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `GET /aliases`
    pub async fn list_aliases(&self) -> QdrantResult<CollectionsAliasesResponse> {
        let request = ApiRequest::new(Method::GET, "/aliases");
        execute(self.transport.as_ref(), request).await
    }

    /// `GET /collections/{name}/aliases`
    pub async fn collection_aliases(&self, name: &str) -> QdrantResult<CollectionsAliasesResponse> {
        let request = ApiRequest::new(Method::GET, collection_path(name, "/aliases")?);
        execute(self.transport.as_ref(), request).await
    }

    /// `PUT /collections/{name}/index`
    pub async fn create_field_index(
        &self,
        name: &str,
        index: &CreateFieldIndex,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        require_non_empty("field name", &index.field_name)?;
        let request = json_request(
            Method::PUT,
            collection_path(name, "/index")?,
            write_query(params),
            index,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `DELETE /collections/{name}/index/{field}`
    pub async fn delete_field_index(
        &self,
        name: &str,
        field: &str,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        require_non_empty("field name", field)?;
        let path = collection_path(name, &format!("/index/{}", encode_segment(field)))?;
        let request = ApiRequest::new(Method::DELETE, path).with_query(write_query(params));
        execute(self.transport.as_ref(), request).await
    }

    /// `GET /collections/{name}/cluster`
    pub async fn cluster_info(&self, name: &str) -> QdrantResult<CollectionClusterInfo> {
        let request = ApiRequest::new(Method::GET, collection_path(name, "/cluster")?);
        execute(self.transport.as_ref(), request).await
    }
}
