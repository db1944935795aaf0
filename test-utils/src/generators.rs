//! Shared proptest generators.

use proptest::prelude::*;
use serde_json::{Value, json};

use faultfinder_session::SESSION_EXPIRED_DETAIL;

/// Generate 2xx status codes.
pub fn success_status_strategy() -> impl Strategy<Value = u16> {
    200u16..300
}

/// Generate 4xx status codes, including plain 401s.
pub fn client_status_strategy() -> impl Strategy<Value = u16> {
    400u16..500
}

/// Generate 5xx status codes.
pub fn server_status_strategy() -> impl Strategy<Value = u16> {
    500u16..600
}

/// Generate `detail` strings that are not the session-expired sentinel.
pub fn other_detail_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z ]{1,40}".prop_filter("must not be the session sentinel", |detail| {
        detail != SESSION_EXPIRED_DETAIL
    })
}

/// Generate JSON bodies that never carry the session-expired sentinel.
pub fn ordinary_body_strategy() -> impl Strategy<Value = Option<Value>> {
    prop_oneof![
        Just(None),
        other_detail_strategy().prop_map(|detail| Some(json!({ "detail": detail }))),
        ("[a-z]{1,10}", any::<i64>()).prop_map(|(key, value)| Some(json!({ key: value }))),
        "[a-z ]{1,20}".prop_map(|text| Some(Value::String(text))),
    ]
}

/// Generate relative API paths.
pub fn request_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("auth/user/".to_string()),
        Just("projects/user-projects".to_string()),
        (1u32..10_000).prop_map(|id| format!("projects/{id}")),
        "[a-z]{1,12}/[a-z]{1,12}/",
    ]
}

/// Generate a number of concurrent callers.
pub fn concurrency_strategy() -> impl Strategy<Value = usize> {
    1usize..=16
}
