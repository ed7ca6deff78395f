use std::sync::Arc;

use http::Method;

use super::{collection_path, execute, json_request, require_non_empty, write_query};
use crate::error::QdrantResult;
use crate::models::{DeleteVectors, UpdateResult, UpdateVectors, WriteParams};
use crate::transport::Transport;

/// Named-vector mutations on the collection this client is bound to.
#[derive(Clone)]
pub struct VectorsClient {
    transport: Arc<dyn Transport>,
    collection: String,
}

impl VectorsClient {
    pub(crate) fn new(transport: Arc<dyn Transport>, collection: String) -> Self {
        Self {
            transport,
            collection,
        }
    }

    /// `PUT /collections/{name}/points/vectors`
    pub async fn update(
        &self,
        vectors: &UpdateVectors,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        let request = json_request(
            Method::PUT,
            collection_path(&self.collection, "/points/vectors")?,
            write_query(params),
            vectors,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/vectors/delete`
    pub async fn delete(
        &self,
        vectors: &DeleteVectors,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        for name in &vectors.vector {
            require_non_empty("vector name", name)?;
        }
        let request = json_request(
            Method::POST,
            collection_path(&self.collection, "/points/vectors/delete")?,
            write_query(params),
            vectors,
        )?;
        execute(self.transport.as_ref(), request).await
    }
}
