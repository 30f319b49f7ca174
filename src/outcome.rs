//! Per-endpoint fetch outcomes.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::YesplanError;

/// Why a fetch produced no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// HTTP 401.
    Unauthorized,
    /// HTTP 404.
    NotFound,
    /// Any other non-200 status.
    Status(u16),
    /// Connection, DNS or timeout failure.
    Transport,
    /// The body of a 200 response was not valid JSON.
    Decode,
}

/// A failed fetch, with the detail needed for the console diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FailureKind,
    /// Response body, endpoint name or transport message depending on `kind`.
    pub detail: String,
}

impl From<YesplanError> for FetchFailure {
    fn from(err: YesplanError) -> Self {
        match err {
            YesplanError::Unauthorized { body } => Self {
                kind: FailureKind::Unauthorized,
                detail: body,
            },
            YesplanError::NotFound { endpoint } => Self {
                kind: FailureKind::NotFound,
                detail: endpoint,
            },
            YesplanError::InvalidEndpoint(endpoint) => Self {
                kind: FailureKind::NotFound,
                detail: endpoint,
            },
            YesplanError::ApiError {
                message,
                status_code,
            } => Self {
                kind: FailureKind::Status(status_code),
                detail: message,
            },
            YesplanError::ParseError(e) => Self {
                kind: FailureKind::Decode,
                detail: e.to_string(),
            },
            // reqwest reports body decode problems as transport errors too
            YesplanError::HttpError(e) if e.is_decode() => Self {
                kind: FailureKind::Decode,
                detail: e.to_string(),
            },
            YesplanError::HttpError(e) => Self {
                kind: FailureKind::Transport,
                detail: e.to_string(),
            },
            other => Self {
                kind: FailureKind::Transport,
                detail: other.to_string(),
            },
        }
    }
}

/// Result of fetching a single endpoint.
///
/// Serializes as the payload itself on success and as `null` on failure,
/// which is the shape written to the output file.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(Value),
    Failed(FetchFailure),
}

impl FetchOutcome {
    /// The payload, if the fetch succeeded.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            FetchOutcome::Fetched(v) => Some(v),
            FetchOutcome::Failed(_) => None,
        }
    }

    /// The failure, if the fetch did not succeed.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchOutcome::Fetched(_) => None,
            FetchOutcome::Failed(f) => Some(f),
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched(_))
    }
}

impl Serialize for FetchOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FetchOutcome::Fetched(v) => v.serialize(serializer),
            FetchOutcome::Failed(_) => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_serializes_as_null() {
        let outcome = FetchOutcome::Failed(FetchFailure {
            kind: FailureKind::NotFound,
            detail: "labels".to_string(),
        });
        assert_eq!(serde_json::to_value(&outcome).unwrap(), Value::Null);
    }

    #[test]
    fn test_fetched_serializes_as_payload() {
        let payload = json!({"data": [{"id": 1}]});
        let outcome = FetchOutcome::Fetched(payload.clone());
        assert_eq!(serde_json::to_value(&outcome).unwrap(), payload);
    }

    #[test]
    fn test_error_kinds_map_to_failure_kinds() {
        let f: FetchFailure = YesplanError::Unauthorized {
            body: "bad key".to_string(),
        }
        .into();
        assert_eq!(f.kind, FailureKind::Unauthorized);
        assert_eq!(f.detail, "bad key");

        let f: FetchFailure = YesplanError::ApiError {
            message: "boom".to_string(),
            status_code: 500,
        }
        .into();
        assert_eq!(f.kind, FailureKind::Status(500));

        let parse = serde_json::from_str::<Value>("{not json").unwrap_err();
        let f: FetchFailure = YesplanError::ParseError(parse).into();
        assert_eq!(f.kind, FailureKind::Decode);
    }
}
