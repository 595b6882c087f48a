//! Response normalization for the Orbital SDK.
//!
//! The agents API is not consistent about error encodings: some endpoints
//! return a bare string, some an `{"error": "..."}` object, and a few emit
//! arbitrary JSON. Everything is decoded here, once, into [`ErrorBody`]; the
//! rest of the SDK only ever sees [`OrbitalError`] variants.

use crate::error::{OrbitalError, OrbitalResult};
use serde::Deserialize;

pub(crate) const MISSING_DATA_MESSAGE: &str = "No response data received";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// The error payload shapes the API is known to produce.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorBody {
    /// `{"error": "message", ...}`
    Tagged { error: String },
    /// A bare JSON string.
    Text(String),
    /// Anything else; serialized back to compact JSON for display.
    Other(serde_json::Value),
}

impl ErrorBody {
    /// Decode a raw response body. Bodies that are not valid JSON are kept
    /// verbatim as text.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self::Text(body.to_string()))
    }

    /// Single human-readable message for this error payload.
    pub fn message(&self) -> String {
        let message = match self {
            Self::Tagged { error } => error.clone(),
            Self::Text(text) => text.clone(),
            Self::Other(value) => value.to_string(),
        };
        if message.is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// A decoded response: at most one of `data` and `error` is populated.
#[derive(Debug)]
pub(crate) struct Envelope<T> {
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
}

/// Collapse an envelope into the unwrapped data or a normalized failure.
///
/// `missing_data_message` overrides the default message raised when a
/// success response carries no data.
pub(crate) fn normalize<T>(
    envelope: Envelope<T>,
    missing_data_message: Option<&str>,
) -> OrbitalResult<T> {
    if let Some(error) = envelope.error {
        return Err(OrbitalError::Api {
            message: error.message(),
        });
    }

    match envelope.data {
        Some(data) => Ok(data),
        None => Err(OrbitalError::Api {
            message: missing_data_message
                .unwrap_or(MISSING_DATA_MESSAGE)
                .to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope<T>(data: Option<T>, error: Option<ErrorBody>) -> Envelope<T> {
        Envelope { data, error }
    }

    #[test]
    fn test_normalize_returns_data_unchanged() {
        let result: i32 = normalize(envelope(Some(42), None), None).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_error_as_string() {
        let body = ErrorBody::from_body("\"execution not found\"");
        assert_eq!(body.message(), "execution not found");
    }

    #[test]
    fn test_error_as_tagged_object() {
        let body = ErrorBody::from_body(r#"{"error": "msg", "details": "ignored"}"#);
        assert_eq!(body.message(), "msg");
    }

    #[test]
    fn test_error_as_arbitrary_object_serializes() {
        let body = ErrorBody::from_body(r#"{"code": 42, "kind": "proxy"}"#);
        assert_eq!(body.message(), json!({"code": 42, "kind": "proxy"}).to_string());
    }

    #[test]
    fn test_error_as_plain_text_body() {
        let body = ErrorBody::from_body("upstream unavailable");
        assert_eq!(body.message(), "upstream unavailable");
    }

    #[test]
    fn test_empty_error_falls_back_to_unknown() {
        let body = ErrorBody::from_body("");
        assert_eq!(body.message(), "Unknown error");

        let body = ErrorBody::from_body(r#"{"error": ""}"#);
        assert_eq!(body.message(), "Unknown error");
    }

    #[test]
    fn test_error_wins_over_data() {
        let err = normalize(
            envelope(Some(1), Some(ErrorBody::from_body("\"boom\""))),
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_missing_data_default_message() {
        let err = normalize::<i32>(envelope(None, None), None).unwrap_err();
        assert_eq!(err.to_string(), "No response data received");
    }

    #[test]
    fn test_missing_data_custom_message() {
        let err = normalize::<String>(envelope(None, None), Some("Public key not found"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Public key not found");
    }

    #[test]
    fn test_tagged_object_with_non_string_error_field() {
        // {"error": 5} does not match the tagged shape; it serializes whole.
        let body = ErrorBody::from_body(r#"{"error": 5}"#);
        assert_eq!(body.message(), r#"{"error":5}"#);
    }
}
