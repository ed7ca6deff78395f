use async_trait::async_trait;
use core_config::FromEnv;
use reqwest::Client;
use tracing::debug;

use super::{ApiRequest, QdrantConfig, RawResponse, Transport};
use crate::error::{QdrantError, QdrantResult};

const API_KEY_HEADER: &str = "api-key";

/// Default [`Transport`] over a pooled `reqwest` client (rustls).
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &QdrantConfig) -> QdrantResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| QdrantError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing client; its own timeout settings apply.
    pub fn with_client(client: Client, config: &QdrantConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn from_env() -> QdrantResult<Self> {
        Self::new(&QdrantConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.path_and_query())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> QdrantResult<RawResponse> {
        let url = self.url_for(&request);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .headers(request.headers);

        if let Some(api_key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, api_key);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!(method = %request.method, url = %url, status = status.as_u16(), bytes = body.len(), "HTTP exchange");

        Ok(RawResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::QueryParams;
    use http::Method;

    #[test]
    fn test_url_for_joins_base_and_path() {
        let config = QdrantConfig::new("http://localhost:6333/");
        let transport = ReqwestTransport::new(&config).unwrap();

        let mut query = QueryParams::new();
        query.push("wait", true);
        let request = ApiRequest::new(Method::PUT, "/collections/docs/points").with_query(query);

        assert_eq!(transport.base_url(), "http://localhost:6333");
        assert_eq!(
            transport.url_for(&request),
            "http://localhost:6333/collections/docs/points?wait=true"
        );
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let config = QdrantConfig::new("ftp://nowhere");
        let err = ReqwestTransport::new(&config).unwrap_err();
        assert!(matches!(err, QdrantError::Config(_)));
    }

    #[test]
    fn test_from_env_uses_configured_url() {
        temp_env::with_vars(
            [
                ("QDRANT_URL", Some("http://qdrant:6333")),
                ("QDRANT_API_KEY", None),
                ("QDRANT_TIMEOUT_SECS", None),
            ],
            || {
                let transport = ReqwestTransport::from_env().unwrap();
                assert_eq!(transport.base_url(), "http://qdrant:6333");
            },
        );
    }
}
