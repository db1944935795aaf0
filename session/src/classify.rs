//! Response classification.
//!
//! Only a 401 whose JSON body carries `detail` equal to
//! [`SESSION_EXPIRED_DETAIL`] is treated as an expired session. Every other
//! 401 (and 403) is an ordinary client error and is never refreshed.

use serde_json::Value;
use tracing::debug;

use crate::error::{RequestError, RequestResult};
use crate::request::Reply;

/// Detail string the backend sends when a request carried no credentials.
pub const SESSION_EXPIRED_DETAIL: &str = "Authentication credentials were not provided.";

/// Parse a raw response body.
///
/// Empty bodies become `None`; bodies that are not JSON are kept as a JSON
/// string so callers can still surface them.
#[must_use]
pub fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

/// Whether a response signals an expired session.
#[must_use]
pub fn is_session_expiry(status: u16, body: Option<&Value>) -> bool {
    status == 401
        && body
            .and_then(|b| b.get("detail"))
            .and_then(Value::as_str)
            .is_some_and(|detail| detail == SESSION_EXPIRED_DETAIL)
}

/// Classify a received response.
///
/// # Errors
///
/// Returns the matching [`RequestError`] for any non-2xx status.
pub fn classify(status: u16, body: Option<Value>) -> RequestResult {
    let result = match status {
        200..=299 => Ok(Reply::new(status, body)),
        401 if is_session_expiry(status, body.as_ref()) => {
            Err(RequestError::UnauthorizedSession { body })
        }
        500.. => Err(RequestError::Server { status, body }),
        _ => Err(RequestError::Client { status, body }),
    };

    if let Err(err) = &result {
        debug!(status, kind = ?err.kind(), "Classified failed response");
    }
    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::FailureKind;

    #[test]
    fn test_success_range() {
        let reply = classify(201, Some(json!({ "id": 1 }))).unwrap();
        assert_eq!(reply.status, 201);
        assert!(classify(204, None).is_ok());
    }

    #[test]
    fn test_session_expiry_requires_exact_detail() {
        let body = json!({ "detail": SESSION_EXPIRED_DETAIL });
        let err = classify(401, Some(body)).unwrap_err();
        assert_eq!(err.kind(), FailureKind::UnauthorizedSession);

        let body = json!({ "detail": "Given token not valid for any token type" });
        let err = classify(401, Some(body)).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Client);
        assert_eq!(err.status(), Some(401));

        let err = classify(401, None).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Client);
    }

    #[test]
    fn test_sentinel_on_other_status_is_not_expiry() {
        let body = json!({ "detail": SESSION_EXPIRED_DETAIL });
        let err = classify(403, Some(body)).unwrap_err();
        assert_eq!(err.kind(), FailureKind::Client);
    }

    #[test]
    fn test_non_string_detail_is_not_expiry() {
        let body = json!({ "detail": [SESSION_EXPIRED_DETAIL] });
        assert!(!is_session_expiry(401, Some(&body)));
    }

    #[test]
    fn test_server_and_client_errors() {
        assert_eq!(classify(500, None).unwrap_err().kind(), FailureKind::Server);
        assert_eq!(classify(503, None).unwrap_err().kind(), FailureKind::Server);
        assert_eq!(classify(404, None).unwrap_err().kind(), FailureKind::Client);
        assert_eq!(classify(302, None).unwrap_err().kind(), FailureKind::Client);
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body("  \n"), None);
        assert_eq!(parse_body(r#"{"a":1}"#), Some(json!({ "a": 1 })));
        assert_eq!(parse_body("Bad Gateway"), Some(json!("Bad Gateway")));
    }
}
