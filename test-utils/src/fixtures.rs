//! Test fixtures with sample backend payloads.

use chrono::{DateTime, TimeZone, Utc};
use faultfinder_session::{Reply, RequestError, RequestResult, SESSION_EXPIRED_DETAIL};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Path of the refresh endpoint.
pub const REFRESH_PATH: &str = "auth/token/refresh/";

/// Body the backend sends when the session cookie is missing or expired.
#[must_use]
pub fn session_expired_body() -> Value {
    json!({ "detail": SESSION_EXPIRED_DETAIL })
}

/// Unauthorized-session failure, as classified.
#[must_use]
pub fn session_expired() -> RequestResult {
    Err(RequestError::UnauthorizedSession {
        body: Some(session_expired_body()),
    })
}

/// A 401 that is not a session expiry.
#[must_use]
pub fn bad_credentials() -> RequestResult {
    Err(RequestError::Client {
        status: 401,
        body: Some(json!({ "detail": "Unable to log in with provided credentials." })),
    })
}

/// Successful refresh exchange.
#[must_use]
pub fn refresh_succeeded() -> RequestResult {
    Ok(Reply::new(200, Some(json!({ "access": "refreshed" }))))
}

/// Refresh rejected by the backend.
#[must_use]
pub fn refresh_rejected() -> RequestResult {
    Err(RequestError::Client {
        status: 401,
        body: Some(json!({ "detail": "Token is invalid or expired", "code": "token_not_valid" })),
    })
}

/// Plain 200 with a JSON body.
#[must_use]
pub fn ok(body: Value) -> RequestResult {
    Ok(Reply::new(200, Some(body)))
}

/// Sample user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleUser {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Login name
    pub username: String,
}

impl SampleUser {
    /// A typical user.
    #[must_use]
    pub fn ada() -> Self {
        Self {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            username: "ada".to_string(),
        }
    }

    /// The user as the backend serializes it.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "first_name": self.first_name,
            "last_name": self.last_name,
            "email": self.email,
            "username": self.username,
        })
    }
}

/// Creation timestamp used by project fixtures.
#[must_use]
pub fn sample_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 3, 7, 14, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Update timestamp used by project fixtures.
#[must_use]
pub fn sample_updated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 11, 21, 9, 5, 12)
        .single()
        .unwrap_or_default()
}

/// A project list entry as the backend serializes it.
#[must_use]
pub fn sample_project_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "owner": "ada",
        "created_date": sample_created_at().to_rfc3339(),
        "updated_date": sample_updated_at().to_rfc3339(),
        "updated_by": null,
    })
}

/// A project list as the backend serializes it.
#[must_use]
pub fn sample_projects_json() -> Value {
    json!([
        sample_project_json(1, "Bridge survey"),
        sample_project_json(2, "Tunnel inspection"),
    ])
}

/// A project detail record as the backend serializes it. The id arrives as a
/// string on this endpoint.
#[must_use]
pub fn sample_project_detail_json(id: u64) -> Value {
    json!({
        "id": id.to_string(),
        "title": "Bridge survey",
        "description": "Load survey of the north bridge",
        "users": ["ada", "grace"],
        "created_date": sample_created_at().to_rfc3339(),
        "updated_date": sample_updated_at().to_rfc3339(),
        "owner_username": "ada",
        "updated_by_username": "grace",
    })
}
