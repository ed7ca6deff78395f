//! Qdrant REST Client Library
//!
//! Typed request/response models for the Qdrant vector database REST API,
//! plus thin resource clients that map each operation onto one HTTP call.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                   Qdrant                     │  ← Entry point
//! └──┬───────────┬──────────────┬─────────────┬──┘
//!    │           │              │             │
//! ┌──▼────────┐ ┌▼───────────┐ ┌▼──────────┐ ┌▼──────────┐
//! │Collections│ │  Points    │ │ Payload / │ │  Service  │  ← Resource clients
//! │  Client   │ │  Client    │ │ Vectors   │ │  Client   │
//! └──┬────────┘ └┬───────────┘ └┬──────────┘ └┬──────────┘
//!    │           │              │             │
//! ┌──▼───────────▼──────────────▼─────────────▼──┐
//! │        models + codec (envelope, unions)     │  ← Wire model
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────▼───────────────────────┐
//! │              Transport (trait)               │
//! └──────────────────────┬───────────────────────┘
//!                        │
//! ┌──────────────────────▼───────────────────────┐
//! │              ReqwestTransport                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Features
//!
//! - **Polymorphic wire model**: point ids, vectors, filter conditions, match
//!   clauses and quantization configs decode in a fixed, documented order
//! - **Envelope decoding**: `status` is checked before `result`, so service
//!   errors surface as [`QdrantError::Remote`]
//! - **Pluggable transport**: resource clients only see the [`Transport`] trait
//! - **Safe URLs**: path segments and query values are percent-encoded
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_qdrant::{
//!     Condition, CreateCollection, Distance, Filter, PointInsertOperations, PointStruct,
//!     Qdrant, QdrantConfig, ReadParams, SearchRequest, VectorsConfig, WriteParams,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Qdrant::from_config(&QdrantConfig::new("http://localhost:6333"))?;
//!
//! client
//!     .collections()
//!     .create("documents", &CreateCollection::new(VectorsConfig::single(4, Distance::Cosine)))
//!     .await?;
//!
//! let points = client.points("documents");
//! let upsert = PointInsertOperations::from(vec![PointStruct::new(1u64, vec![0.1, 0.2, 0.3, 0.4])]);
//! points.upsert(&upsert, WriteParams::new().wait(true)).await?;
//!
//! let search = SearchRequest::new(vec![0.1, 0.2, 0.3, 0.4], 5)
//!     .with_filter(Filter::must([Condition::matches("city", "Berlin")]));
//! let hits = points.search(&search, ReadParams::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod error;
pub mod models;
pub mod transport;

// Re-export commonly used types
pub use client::{CollectionsClient, PayloadClient, PointsClient, Qdrant, ServiceClient, VectorsClient};
pub use codec::{ApiStatus, Envelope, decode_envelope, decode_response, encode_body};
pub use core_config::FromEnv;
pub use error::{QdrantError, QdrantResult, UnionDecodeError};
pub use models::*;
pub use transport::{
    ApiRequest, QdrantConfig, QueryParams, RawResponse, ReqwestTransport, Transport,
    encode_segment,
};
