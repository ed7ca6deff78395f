use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Longest raw JSON excerpt kept inside a decode error.
const RAW_EXCERPT_LEN: usize = 120;

/// Errors surfaced by every resource-client operation.
///
/// Callers usually branch on the category: a [`QdrantError::Remote`] means the
/// service understood and rejected the request, [`QdrantError::Decode`] means
/// the response could not be understood, and [`QdrantError::Transport`] means
/// the request never completed a round trip.
#[derive(Debug, Error)]
pub enum QdrantError {
    /// Response bytes did not match the expected wire shape.
    #[error("Decode error ({target}): {message}")]
    Decode { target: String, message: String },

    /// A request value could not be serialized. Indicates a library bug.
    #[error("Encode error: {0}")]
    Encode(String),

    /// The service answered with an error envelope.
    #[error("Remote error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    /// Network failure or unusable response reported by the transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request rejected locally before reaching the transport.
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type QdrantResult<T> = Result<T, QdrantError>;

impl QdrantError {
    pub fn is_remote(&self) -> bool {
        matches!(self, QdrantError::Remote { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, QdrantError::Decode { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, QdrantError::Transport(_))
    }

    /// Message reported by the service, if this is a remote error.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            QdrantError::Remote { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Remote error with HTTP 404, e.g. a missing collection or point.
    pub fn is_not_found(&self) -> bool {
        matches!(self, QdrantError::Remote { status: 404, .. })
    }

    pub(crate) fn decode(target: impl Into<String>, message: impl fmt::Display) -> Self {
        QdrantError::Decode {
            target: target.into(),
            message: message.to_string(),
        }
    }
}

/// Failure to decode one of the tagged-union wire types.
///
/// Names the union, the candidate shapes in the order they were tried, and an
/// excerpt of the offending JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionDecodeError {
    pub union: &'static str,
    pub attempted: &'static [&'static str],
    pub raw: String,
    pub reason: Option<String>,
}

impl UnionDecodeError {
    pub fn new(union: &'static str, attempted: &'static [&'static str], raw: &Value) -> Self {
        Self {
            union,
            attempted,
            raw: excerpt(raw),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl fmt::Display) -> Self {
        self.reason = Some(reason.to_string());
        self
    }
}

impl fmt::Display for UnionDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: tried [{}] against {}",
            self.union,
            self.attempted.join(" -> "),
            self.raw
        )?;
        if let Some(reason) = &self.reason {
            write!(f, " ({})", reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnionDecodeError {}

fn excerpt(raw: &Value) -> String {
    let text = raw.to_string();
    if text.chars().count() <= RAW_EXCERPT_LEN {
        return text;
    }
    let cut: String = text.chars().take(RAW_EXCERPT_LEN).collect();
    format!("{}...", cut)
}

impl From<UnionDecodeError> for QdrantError {
    fn from(err: UnionDecodeError) -> Self {
        QdrantError::decode(err.union, &err)
    }
}

impl From<serde_json::Error> for QdrantError {
    fn from(err: serde_json::Error) -> Self {
        QdrantError::decode("json", err)
    }
}

impl From<reqwest::Error> for QdrantError {
    fn from(err: reqwest::Error) -> Self {
        QdrantError::Transport(err.to_string())
    }
}

impl From<core_config::ConfigError> for QdrantError {
    fn from(err: core_config::ConfigError) -> Self {
        QdrantError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_union_error_names_union_and_shapes() {
        let err = UnionDecodeError::new("ExtendedPointId", &["unsigned integer", "string"], &json!(-3));
        let text = err.to_string();
        assert!(text.contains("ExtendedPointId"));
        assert!(text.contains("unsigned integer -> string"));
        assert!(text.contains("-3"));
    }

    #[test]
    fn test_union_error_truncates_large_values() {
        let big = json!(vec!["x"; 500]);
        let err = UnionDecodeError::new("VectorStruct", &["array"], &big);
        assert!(err.raw.ends_with("..."));
        assert!(err.raw.chars().count() <= RAW_EXCERPT_LEN + 3);
    }

    #[test]
    fn test_union_error_converts_to_decode() {
        let err: QdrantError = UnionDecodeError::new("Match", &["value"], &json!({}))
            .with_reason("no match key present")
            .into();
        assert!(err.is_decode());
        assert!(err.to_string().contains("no match key present"));
    }

    #[test]
    fn test_remote_helpers() {
        let err = QdrantError::Remote {
            status: 404,
            message: "Not found: Collection `x` doesn't exist!".to_string(),
        };
        assert!(err.is_remote());
        assert!(err.is_not_found());
        assert_eq!(
            err.remote_message(),
            Some("Not found: Collection `x` doesn't exist!")
        );
        assert!(!err.is_transport());
    }
}
