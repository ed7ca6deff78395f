//! Resource clients: one method per REST operation.

mod collections;
mod payload;
mod points;
mod service;
mod vectors;

use std::sync::Arc;

use core_config::FromEnv;
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::codec::{decode_response, encode_body};
use crate::error::{QdrantError, QdrantResult};
use crate::models::{ReadParams, WriteParams};
use crate::transport::{
    ApiRequest, QdrantConfig, QueryParams, ReqwestTransport, Transport, encode_segment,
};

pub use collections::CollectionsClient;
pub use payload::PayloadClient;
pub use points::PointsClient;
pub use service::ServiceClient;
pub use vectors::VectorsClient;

/// Entry point. Cheap to clone; every resource client shares the transport.
#[derive(Clone)]
pub struct Qdrant {
    transport: Arc<dyn Transport>,
}

impl Qdrant {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Client over the default reqwest transport.
    pub fn from_config(config: &QdrantConfig) -> QdrantResult<Self> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Client configured from `QDRANT_URL`, `QDRANT_API_KEY` and `QDRANT_TIMEOUT_SECS`.
    pub fn from_env() -> QdrantResult<Self> {
        let config = QdrantConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn collections(&self) -> CollectionsClient {
        CollectionsClient::new(self.transport.clone())
    }

    /// Point operations bound to `collection`.
    pub fn points(&self, collection: impl Into<String>) -> PointsClient {
        PointsClient::new(self.transport.clone(), collection.into())
    }

    pub fn service(&self) -> ServiceClient {
        ServiceClient::new(self.transport.clone())
    }
}

/// Send `request` and decode the envelope's `result`.
pub(crate) async fn execute<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
) -> QdrantResult<T> {
    let method = request.method.clone();
    let path = request.path.clone();
    debug!(method = %method, path = %path, query = %request.query, "Sending request");

    let response = transport.send(request).await?;
    let result = decode_response(&response);

    debug!(
        method = %method,
        path = %path,
        status = response.status.as_u16(),
        success = result.is_ok(),
        "Request completed"
    );
    result
}

/// Build a request carrying `body` as JSON.
pub(crate) fn json_request<B: Serialize + ?Sized>(
    method: Method,
    path: String,
    query: QueryParams,
    body: &B,
) -> QdrantResult<ApiRequest> {
    let body = encode_body(body)?;
    Ok(ApiRequest::new(method, path)
        .with_query(query)
        .with_json_body(body))
}

pub(crate) fn require_non_empty(kind: &str, value: &str) -> QdrantResult<()> {
    if value.trim().is_empty() {
        return Err(QdrantError::Validation(format!("{} must not be empty", kind)));
    }
    Ok(())
}

/// `/collections/{collection}{tail}` with the name percent-encoded.
pub(crate) fn collection_path(collection: &str, tail: &str) -> QdrantResult<String> {
    require_non_empty("collection name", collection)?;
    Ok(format!("/collections/{}{}", encode_segment(collection), tail))
}

pub(crate) fn write_query(params: WriteParams) -> QueryParams {
    let mut query = QueryParams::new();
    query
        .push_opt("wait", params.wait)
        .push_opt("ordering", params.ordering);
    query
}

pub(crate) fn read_query(params: ReadParams) -> QueryParams {
    let mut query = QueryParams::new();
    query.push_opt("consistency", params.consistency);
    query
}
