//! Shared test utilities for the client crates
//!
//! This crate provides reusable test infrastructure:
//! - `TestDataBuilder`: Deterministic collection names, point ids and vectors
//! - `fixtures`: Response envelopes exactly as the vector-database service emits them
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```
//! use test_utils::{fixtures, TestDataBuilder};
//!
//! let builder = TestDataBuilder::from_test_name("upsert_points");
//! let collection = builder.collection_name("main");
//! let body = fixtures::ok_envelope(serde_json::json!(true));
//! assert!(collection.starts_with("test-"));
//! assert!(!body.is_empty());
//! ```

use uuid::Uuid;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by deriving everything from a seed.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_collection");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a collection name unique to this test
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.collection_name("main"), "test-7-main");
    /// ```
    pub fn collection_name(&self, suffix: &str) -> String {
        format!("test-{}-{}", self.seed, suffix)
    }

    /// Generate a UUID suitable as a string point id
    pub fn point_uuid(&self, index: u64) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let idx = index.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..16].copy_from_slice(&idx);
        Uuid::from_bytes(uuid_bytes)
    }

    /// Generate a vector of `dim` components in `[0, 1)`
    ///
    /// Components are quantized to multiples of 1/1024 so they survive a JSON
    /// round trip through `f32` exactly.
    pub fn vector(&self, index: u64, dim: usize) -> Vec<f32> {
        let mut state = self.seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        (0..dim)
            .map(|_| {
                // xorshift64
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state % 1024) as f32 / 1024.0
            })
            .collect()
    }
}

/// Response envelopes as produced by the service
pub mod fixtures {
    use serde_json::{json, Value};

    /// Successful envelope wrapping `result`
    pub fn ok_envelope(result: Value) -> Vec<u8> {
        json!({ "time": 0.002, "status": "ok", "result": result })
            .to_string()
            .into_bytes()
    }

    /// Error envelope; `result` is omitted like the service does
    pub fn error_envelope(message: &str) -> Vec<u8> {
        json!({ "time": 0.001, "status": { "error": message } })
            .to_string()
            .into_bytes()
    }

    /// `UpdateResult` body for write operations
    pub fn update_result(operation_id: u64, status: &str) -> Value {
        json!({ "operation_id": operation_id, "status": status })
    }
}

/// Test assertion helpers
pub mod assertions {
    use serde_json::Value;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that a byte body parses as JSON equal to `expected`
    ///
    /// Compares values, not bytes, so key order does not matter.
    pub fn assert_json_body(body: Option<&[u8]>, expected: &Value, context: &str) {
        let body = body.unwrap_or_else(|| panic!("{}: expected a request body, got none", context));
        let actual: Value = serde_json::from_slice(body)
            .unwrap_or_else(|e| panic!("{}: body is not valid JSON: {}", context, e));
        assert_eq!(&actual, expected, "{}: JSON body mismatch", context);
    }
}
