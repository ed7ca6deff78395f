use std::sync::Arc;

use http::Method;

use super::execute;
use crate::error::QdrantResult;
use crate::models::{ClusterStatus, TelemetryData};
use crate::transport::{ApiRequest, QueryParams, Transport};

/// Service-wide endpoints.
#[derive(Clone)]
pub struct ServiceClient {
    transport: Arc<dyn Transport>,
}

impl ServiceClient {
    pub(crate) fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// `GET /telemetry`
    pub async fn telemetry(&self, anonymize: Option<bool>) -> QdrantResult<TelemetryData> {
        let mut query = QueryParams::new();
        query.push_opt("anonymize", anonymize);
        let request = ApiRequest::new(Method::GET, "/telemetry").with_query(query);
        execute(self.transport.as_ref(), request).await
    }

    /// `GET /cluster`
    pub async fn cluster_status(&self) -> QdrantResult<ClusterStatus> {
        let request = ApiRequest::new(Method::GET, "/cluster");
        execute(self.transport.as_ref(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{MockTransport, RawResponse};
    use serde_json::json;

    #[tokio::test]
    async fn test_cluster_status_disabled() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.method == Method::GET && request.path_and_query() == "/cluster")
            .times(1)
            .returning(|_| {
                Ok(RawResponse::ok(
                    br#"{"time":0.0,"status":"ok","result":{"status":"disabled"}}"#.to_vec(),
                ))
            });

        let client = ServiceClient::new(Arc::new(transport));
        assert_eq!(client.cluster_status().await.unwrap(), ClusterStatus::Disabled);
    }

    #[tokio::test]
    async fn test_telemetry_anonymized() {
        let telemetry = json!({
            "id": "9f3c",
            "app": {"name": "qdrant", "version": "1.4.0", "startup": "2023-07-21T08:00:00Z"},
            "collections": {"number_of_collections": 1},
            "cluster": {"enabled": false},
            "requests": {"rest": {"responses": {}}, "grpc": {"responses": {}}}
        });
        let body = serde_json::to_vec(&json!({"time": 0.0, "status": "ok", "result": telemetry}))
            .unwrap();

        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.path_and_query() == "/telemetry?anonymize=true")
            .times(1)
            .returning(move |_| Ok(RawResponse::ok(body.clone())));

        let client = ServiceClient::new(Arc::new(transport));
        let data = client.telemetry(Some(true)).await.unwrap();
        assert_eq!(data.app.version, "1.4.0");
        assert_eq!(data.collections.number_of_collections, 1);
        assert!(!data.cluster.enabled);
    }
}
