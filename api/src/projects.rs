//! Project endpoints.

use chrono::{DateTime, NaiveDateTime};
use faultfinder_session::Request;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::client::ApiClient;
use crate::error::ApiResult;

const USER_PROJECTS_PATH: &str = "projects/user-projects";
const CREATE_PATH: &str = "projects/create";

/// A project as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    /// Project id
    #[serde(deserialize_with = "number_or_string")]
    pub id: u64,
    /// Title
    pub title: String,
    /// Owner's username
    #[serde(default)]
    pub owner: String,
    /// Creation date, reformatted by [`ProjectApi::list_user_projects`]
    pub created_date: String,
    /// Last update date, reformatted by [`ProjectApi::list_user_projects`]
    pub updated_date: String,
    /// Username of the last editor
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Full project record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectDetail {
    /// Project id
    #[serde(deserialize_with = "number_or_string")]
    pub id: u64,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Members' usernames
    #[serde(default)]
    pub users: Vec<String>,
    /// Creation timestamp, as sent by the server
    pub created_date: String,
    /// Last update timestamp, as sent by the server
    pub updated_date: String,
    /// Owner's username
    #[serde(default)]
    pub owner_username: String,
    /// Username of the last editor
    #[serde(default)]
    pub updated_by_username: Option<String>,
}

/// Title and description for create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDraft {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
}

impl ProjectDraft {
    /// Create a draft.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    fn to_json(&self) -> Value {
        serde_json::json!({ "title": self.title, "description": self.description })
    }
}

/// Project endpoints.
#[derive(Clone)]
pub struct ProjectApi {
    client: ApiClient,
}

impl ProjectApi {
    /// Create the endpoint group.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List the current user's projects with display-ready dates.
    ///
    /// # Errors
    ///
    /// Returns the request failure or a decode error.
    #[instrument(skip(self))]
    pub async fn list_user_projects(&self) -> ApiResult<Vec<Project>> {
        let projects: Vec<Project> = self.client.fetch(&Request::get(USER_PROJECTS_PATH)).await?;
        Ok(projects
            .into_iter()
            .map(|project| Project {
                created_date: format_short_date(&project.created_date),
                updated_date: format_short_date(&project.updated_date),
                ..project
            })
            .collect())
    }

    /// Create a project and return the server's record.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create_project(&self, draft: &ProjectDraft) -> ApiResult<Option<Value>> {
        let reply = self
            .client
            .send(&Request::post(CREATE_PATH, draft.to_json()))
            .await?;
        Ok(reply.body)
    }

    /// Fetch one project.
    ///
    /// # Errors
    ///
    /// Returns the request failure or a decode error.
    #[instrument(skip(self))]
    pub async fn project_details(&self, id: u64) -> ApiResult<ProjectDetail> {
        self.client.fetch(&Request::get(format!("projects/{id}"))).await
    }

    /// Update a project's title and description.
    ///
    /// # Errors
    ///
    /// Returns the request failure.
    #[instrument(skip(self, draft))]
    pub async fn update_project(&self, id: u64, draft: &ProjectDraft) -> ApiResult<Option<Value>> {
        let reply = self
            .client
            .send(&Request::patch(format!("projects/update/{id}"), draft.to_json()))
            .await?;
        Ok(reply.body)
    }
}

/// Reformat an ISO-8601 timestamp as `M/D/YYYY` in the timestamp's own offset.
///
/// Anything that does not parse is returned unchanged.
#[must_use]
pub fn format_short_date(raw: &str) -> String {
    const FORMAT: &str = "%-m/%-d/%Y";

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format(FORMAT).to_string();
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return timestamp.format(FORMAT).to_string();
    }
    raw.to_string()
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(id) => Ok(id),
        Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date("2023-03-07T14:30:00Z"), "3/7/2023");
        assert_eq!(format_short_date("2023-11-21T09:05:12.123456+02:00"), "11/21/2023");
        assert_eq!(format_short_date("2024-01-02T00:00:00"), "1/2/2024");
    }

    #[test]
    fn test_format_short_date_keeps_unparseable() {
        assert_eq!(format_short_date("yesterday"), "yesterday");
        assert_eq!(format_short_date(""), "");
    }

    #[test]
    fn test_detail_accepts_string_id() {
        let detail: ProjectDetail = serde_json::from_value(json!({
            "id": "12",
            "title": "Bridge",
            "description": "Survey",
            "users": ["ada"],
            "created_date": "2023-03-07T14:30:00Z",
            "updated_date": "2023-03-07T14:30:00Z",
            "owner_username": "ada",
            "updated_by_username": null,
        }))
        .unwrap();
        assert_eq!(detail.id, 12);
        assert_eq!(detail.users, vec!["ada".to_string()]);
    }

    #[test]
    fn test_draft_payload() {
        let draft = ProjectDraft::new("Bridge", "Survey");
        assert_eq!(draft.to_json(), json!({ "title": "Bridge", "description": "Survey" }));
    }
}
