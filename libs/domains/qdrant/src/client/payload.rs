use std::sync::Arc;

use http::Method;

use super::{collection_path, execute, json_request, require_non_empty, write_query};
use crate::error::QdrantResult;
use crate::models::{DeletePayload, PointsSelector, SetPayload, UpdateResult, WriteParams};
use crate::transport::Transport;

/// Payload mutations on the collection this client is bound to.
#[derive(Clone)]
pub struct PayloadClient {
    transport: Arc<dyn Transport>,
    collection: String,
}

impl PayloadClient {
    pub(crate) fn new(transport: Arc<dyn Transport>, collection: String) -> Self {
        Self {
            transport,
            collection,
        }
    }

    /// `POST /collections/{name}/points/payload`: merge keys into existing payloads.
    pub async fn set(&self, payload: &SetPayload, params: WriteParams) -> QdrantResult<UpdateResult> {
        let request = json_request(
            Method::POST,
            collection_path(&self.collection, "/points/payload")?,
            write_query(params),
            payload,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `PUT /collections/{name}/points/payload`: replace payloads wholesale.
    pub async fn overwrite(
        &self,
        payload: &SetPayload,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        let request = json_request(
            Method::PUT,
            collection_path(&self.collection, "/points/payload")?,
            write_query(params),
            payload,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/payload/delete`
    pub async fn delete(
        &self,
        keys: &DeletePayload,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        for key in &keys.keys {
            require_non_empty("payload key", key)?;
        }
        let request = json_request(
            Method::POST,
            collection_path(&self.collection, "/points/payload/delete")?,
            write_query(params),
            keys,
        )?;
        execute(self.transport.as_ref(), request).await
    }

    /// `POST /collections/{name}/points/payload/clear`
    pub async fn clear(
        &self,
        selector: &PointsSelector,
        params: WriteParams,
    ) -> QdrantResult<UpdateResult> {
        let request = json_request(
            Method::POST,
            collection_path(&self.collection, "/points/payload/clear")?,
            write_query(params),
            selector,
        )?;
        execute(self.transport.as_ref(), request).await
    }
}
