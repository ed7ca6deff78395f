//! Stateless JSON codec: request bodies, response envelopes and the shared
//! plumbing used by the tagged-union decoders in [`crate::models`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{QdrantError, QdrantResult, UnionDecodeError};
use crate::transport::RawResponse;

/// Implement `Deserialize` by buffering into a [`Value`] and running the
/// type's `from_json` priority list.
macro_rules! deserialize_via_from_json {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    <$ty>::from_json(&value).map_err(serde::de::Error::custom)
                }
            }
        )*
    };
}

pub(crate) use deserialize_via_from_json;

/// Longest body excerpt carried by a transport error for a non-JSON reply.
const BODY_SNIPPET_LEN: usize = 200;

/// Wrapper every response body arrives in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// Server-side processing time in seconds.
    pub time: f64,
    pub status: ApiStatus,
    pub result: T,
}

/// `status` member of an [`Envelope`]: the literal `"ok"` or `{"error": msg}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Ok,
    Error(String),
}

impl ApiStatus {
    pub fn from_json(value: &Value) -> Result<Self, UnionDecodeError> {
        ok_or_error("ApiStatus", value).map(|status| match status {
            None => ApiStatus::Ok,
            Some(message) => ApiStatus::Error(message),
        })
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ApiStatus::Ok)
    }
}

impl Serialize for ApiStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let message = match self {
            ApiStatus::Ok => None,
            ApiStatus::Error(message) => Some(message.as_str()),
        };
        serialize_ok_or_error(message, serializer)
    }
}

deserialize_via_from_json!(ApiStatus);

/// Serialize a request model into a JSON body.
pub fn encode_body<T: Serialize + ?Sized>(value: &T) -> QdrantResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| QdrantError::Encode(e.to_string()))
}

/// Decode a response and return only its `result`.
pub fn decode_response<T: DeserializeOwned>(response: &RawResponse) -> QdrantResult<T> {
    decode_envelope(response).map(|envelope| envelope.result)
}

/// Decode a full response envelope.
///
/// `status` is examined before `result`: an error status short-circuits into
/// [`QdrantError::Remote`] and `result` is never looked at.
pub fn decode_envelope<T: DeserializeOwned>(response: &RawResponse) -> QdrantResult<Envelope<T>> {
    let http_status = response.status.as_u16();

    let mut object = match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(object)) if object.contains_key("status") => object,
        Ok(_) => return Err(not_an_envelope(response, "body is not a response envelope")),
        Err(e) => return Err(not_an_envelope(response, e)),
    };

    let status_value = object.remove("status").unwrap_or(Value::Null);
    let status = ApiStatus::from_json(&status_value)?;
    if let ApiStatus::Error(message) = status {
        warn!(status = http_status, message = %message, "Remote error");
        return Err(QdrantError::Remote {
            status: http_status,
            message,
        });
    }

    let time = object.get("time").and_then(Value::as_f64).unwrap_or(0.0);
    let result_value = object.remove("result").unwrap_or(Value::Null);
    let result = T::deserialize(result_value).map_err(|e| {
        let target = short_type_name::<T>();
        warn!(target_type = %target, error = %e, "Failed to decode result");
        QdrantError::decode(target, e)
    })?;

    Ok(Envelope {
        time,
        status,
        result,
    })
}

fn not_an_envelope(response: &RawResponse, reason: impl std::fmt::Display) -> QdrantError {
    if response.status.is_success() {
        QdrantError::decode("Envelope", reason)
    } else {
        QdrantError::Transport(format!(
            "HTTP {}: {}",
            response.status.as_u16(),
            body_snippet(&response.body)
        ))
    }
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.chars().count() <= BODY_SNIPPET_LEN {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(BODY_SNIPPET_LEN).collect();
    format!("{}...", cut)
}

/// `domain_qdrant::models::points::UpdateResult` -> `UpdateResult`, keeping
/// generic structure such as `Vec<Record>`.
fn short_type_name<T>() -> String {
    let full = std::any::type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            out.push_str(last_path_segment(&segment));
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(last_path_segment(&segment));
    out
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Shared decoder for the `"ok" | {"error": msg}` status unions.
///
/// Returns `None` for ok and `Some(message)` for the error form.
pub(crate) fn ok_or_error(
    union: &'static str,
    value: &Value,
) -> Result<Option<String>, UnionDecodeError> {
    const SHAPES: &[&str] = &["\"ok\"", "{\"error\": string}"];
    match value {
        Value::String(s) if s == "ok" => Ok(None),
        Value::Object(object) => match object.get("error") {
            Some(Value::String(message)) => Ok(Some(message.clone())),
            _ => Err(UnionDecodeError::new(union, SHAPES, value)
                .with_reason("object has no string `error` member")),
        },
        _ => Err(UnionDecodeError::new(union, SHAPES, value)),
    }
}

pub(crate) fn serialize_ok_or_error<S: Serializer>(
    message: Option<&str>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    match message {
        None => serializer.serialize_str("ok"),
        Some(message) => {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry("error", message)?;
            map.end()
        }
    }
}

/// Decode `value` as `T`, tagging a failure with the union and shape being
/// attempted.
pub(crate) fn decode_shape<'a, T: Deserialize<'a>>(
    union: &'static str,
    attempted: &'static [&'static str],
    value: &'a Value,
) -> Result<T, UnionDecodeError> {
    T::deserialize(value).map_err(|e| UnionDecodeError::new(union, attempted, value).with_reason(e))
}

/// Flat numeric array, or `None` if any element is not a number.
pub(crate) fn number_array(value: &Value) -> Option<Vec<f32>> {
    value
        .as_array()?
        .iter()
        .map(|n| n.as_f64().map(|f| f as f32))
        .collect()
}
