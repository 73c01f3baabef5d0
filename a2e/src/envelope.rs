//! The uniform response envelope wrapping every A2E response.
//!
//! Every endpoint answers with the same outer shape:
//!
//! ```json
//! { "code": 0, "message": "ok", "data": { ... } }
//! ```
//!
//! A `code` of `0` means success; any other value is an application-level
//! failure and the payload must be ignored. Decoding happens in two phases:
//! the envelope is parsed first with `data` held as raw JSON, and only after
//! the status check is the payload decoded into the operation-specific type.
//!
//! Both the envelope and every payload must be JSON objects. Arrays are
//! rejected even though derived struct impls would read them positionally.

use serde::de::{DeserializeOwned, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::ApiError;

/// Envelope code signalling success.
pub const SUCCESS_CODE: i64 = 0;

/// Response envelope with a deferred payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Status code; `0` is success.
    pub code: i64,

    /// Human-readable status message.
    #[serde(default)]
    pub message: String,

    /// Raw payload, present only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Box<RawValue>>,
}

/// Failure of the payload phase of envelope decoding.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    /// The envelope reported a non-zero code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The payload did not match the expected result shape.
    #[error("payload decode error: {0}")]
    Payload(#[source] serde_json::Error),
}

impl Envelope {
    /// Parses an envelope from a response body.
    ///
    /// Only the outer shape is checked here; the payload stays raw.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body is not valid JSON, is not
    /// a JSON object, or lacks a numeric `code`.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: &RawValue = serde_json::from_slice(body)?;
        serde_json::from_str(object_text(raw)?)
    }

    /// Builds a successful envelope around a serializable payload.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the payload cannot be serialized.
    pub fn success<T: Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            code: SUCCESS_CODE,
            message: "ok".to_owned(),
            data: Some(serde_json::value::to_raw_value(data)?),
        })
    }

    /// Builds a failing envelope with no payload.
    #[must_use]
    pub fn failure(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Returns `true` if the envelope code is `0`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Returns the raw payload, treating JSON `null` as absent.
    #[must_use]
    pub fn payload(&self) -> Option<&RawValue> {
        self.data
            .as_deref()
            .filter(|raw| raw.get().trim() != "null")
    }

    /// Checks the status code, discarding any payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the envelope code is non-zero.
    pub fn check(&self) -> Result<(), ApiError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_envelope(self.code, self.message.clone()))
        }
    }

    /// Checks the status code, then decodes the payload into `T`.
    ///
    /// A successful envelope without a payload yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::Api`] if the code is non-zero (the payload
    /// is not inspected), or [`EnvelopeError::Payload`] if the payload
    /// is not a JSON object or does not decode into `T`.
    pub fn into_result<T>(self) -> Result<T, EnvelopeError>
    where
        T: DeserializeOwned + Default,
    {
        self.check()?;
        match self.payload() {
            Some(raw) => object_text(raw)
                .and_then(serde_json::from_str::<T>)
                .map_err(EnvelopeError::Payload),
            None => Ok(T::default()),
        }
    }
}

/// Returns the raw text if it holds a JSON object.
fn object_text(raw: &RawValue) -> Result<&str, serde_json::Error> {
    let text = raw.get();
    let unexpected = match text.trim_start().as_bytes().first() {
        Some(b'{') => return Ok(text),
        Some(b'[') => Unexpected::Seq,
        Some(b'"') => Unexpected::Other("string"),
        Some(b't' | b'f') => Unexpected::Other("boolean"),
        Some(b'n') => Unexpected::Unit,
        _ => Unexpected::Other("number"),
    };
    Err(serde::de::Error::invalid_type(unexpected, &"a JSON object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ProtocolDocument;
    use crate::search::SearchResult;

    #[test]
    fn test_decode_success_with_payload() {
        let body = br#"{"code":0,"message":"ok","data":{"total":3,"list":[]}}"#;
        let envelope = Envelope::from_slice(body).unwrap();
        assert!(envelope.is_success());
        let result: SearchResult = envelope.into_result().unwrap();
        assert_eq!(result.total, 3);
        assert!(result.list.is_empty());
    }

    #[test]
    fn test_failure_ignores_payload() {
        let body = br#"{"code":401,"message":"unauthorized","data":{"total":"not a number"}}"#;
        let envelope = Envelope::from_slice(body).unwrap();
        let err = envelope.into_result::<SearchResult>().unwrap_err();
        match err {
            EnvelopeError::Api(api) => {
                assert_eq!(api.code, "401");
                assert_eq!(api.message, "unauthorized");
            }
            EnvelopeError::Payload(e) => panic!("unexpected payload error: {e}"),
        }
    }

    #[test]
    fn test_null_payload_yields_default() {
        let body = br#"{"code":0,"message":"ok","data":null}"#;
        let result: ProtocolDocument = Envelope::from_slice(body).unwrap().into_result().unwrap();
        assert_eq!(result, ProtocolDocument::default());
    }

    #[test]
    fn test_missing_payload_yields_default() {
        let body = br#"{"code":0,"message":"ok"}"#;
        let result: SearchResult = Envelope::from_slice(body).unwrap().into_result().unwrap();
        assert_eq!(result, SearchResult::default());
    }

    #[test]
    fn test_missing_message_defaults_to_empty() {
        let envelope = Envelope::from_slice(br#"{"code":500}"#).unwrap();
        let err = envelope.check().unwrap_err();
        assert_eq!(err.code, "500");
        assert_eq!(err.message, "");
    }

    #[test]
    fn test_payload_shape_mismatch_is_payload_error() {
        let body = br#"{"code":0,"message":"ok","data":{"total":"three","list":[]}}"#;
        let err = Envelope::from_slice(body)
            .unwrap()
            .into_result::<SearchResult>()
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::Payload(_)));
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        assert!(Envelope::from_slice(b"<html>502 Bad Gateway</html>").is_err());
        assert!(Envelope::from_slice(b"").is_err());
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let err = Envelope::from_slice(br#"[0,"ok",[7,[]]]"#).unwrap_err();
        assert!(err.to_string().contains("a JSON object"));
        assert!(Envelope::from_slice(b"0").is_err());
        assert!(Envelope::from_slice(br#""ok""#).is_err());
        assert!(Envelope::from_slice(b"null").is_err());
        assert!(Envelope::from_slice(b"  {\"code\":0}  ").is_ok());
    }

    #[test]
    fn test_array_payload_is_payload_error() {
        let body = br#"{"code":0,"message":"ok","data":["ct_x",60]}"#;
        let err = Envelope::from_slice(body)
            .unwrap()
            .into_result::<crate::auth::AuthResult>()
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::Payload(_)));

        let body = br#"{"code":0,"data":[]}"#;
        let err = Envelope::from_slice(body)
            .unwrap()
            .into_result::<ProtocolDocument>()
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::Payload(_)));
    }

    #[test]
    fn test_scalar_payload_is_payload_error() {
        let body = br#"{"code":0,"data":"done"}"#;
        let err = Envelope::from_slice(body)
            .unwrap()
            .into_result::<SearchResult>()
            .unwrap_err();
        assert!(matches!(err, EnvelopeError::Payload(_)));
    }

    #[test]
    fn test_body_without_code_is_not_an_envelope() {
        assert!(Envelope::from_slice(br#"{"message":"ok","data":{}}"#).is_err());
    }

    #[test]
    fn test_success_builder_wraps_payload() {
        let result = SearchResult {
            total: 7,
            list: vec![],
        };
        let envelope = Envelope::success(&result).unwrap();
        let bytes = serde_json::to_vec(&envelope).unwrap();
        let decoded: SearchResult = Envelope::from_slice(&bytes).unwrap().into_result().unwrap();
        assert_eq!(decoded, result);
    }

    #[test]
    fn test_failure_builder_serializes_without_data() {
        let envelope = Envelope::failure(404, "service not found");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({"code": 404, "message": "service not found"}));
    }
}
