//! Endpoint groups and the composition root over the scripted transport.

use std::sync::Arc;
use std::time::Duration;

use faultfinder_api::{ApiError, Dashboard, LoginCredentials, ProjectDraft};
use faultfinder_session::{
    AuthSnapshot, GuardDecision, Method, RequestError, RouteAccess, SessionConfig,
};
use serde_json::json;
use test_utils::ScriptedTransport;
use test_utils::fixtures::{
    REFRESH_PATH, SampleUser, bad_credentials, ok, refresh_rejected, refresh_succeeded,
    sample_project_detail_json, sample_projects_json, session_expired,
};

fn dashboard(transport: &Arc<ScriptedTransport>) -> Dashboard {
    let config = SessionConfig::default().with_refresh_timeout(Duration::from_secs(5));
    Dashboard::with_transport(transport.clone(), &config)
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_with_session() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("auth/user/", ok(SampleUser::ada().to_json())).await;
    let dashboard = dashboard(&transport);

    assert_eq!(
        RouteAccess::Private.decide(&dashboard.auth_state().snapshot()),
        GuardDecision::Pending
    );

    let user = dashboard.initial_load().await.unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(dashboard.auth_state().snapshot(), AuthSnapshot {
        authenticated: true,
        initializing: false,
    });
    assert_eq!(
        RouteAccess::Public.decide(&dashboard.auth_state().snapshot()),
        GuardDecision::Redirect("/dashboard")
    );
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_without_session() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("auth/user/", session_expired()).await;
    transport.respond(REFRESH_PATH, refresh_rejected()).await;
    let dashboard = dashboard(&transport);

    assert!(dashboard.initial_load().await.is_none());

    let snapshot = dashboard.auth_state().snapshot();
    assert!(!snapshot.authenticated);
    assert!(!snapshot.initializing);
    assert_eq!(
        RouteAccess::Private.decide(&snapshot),
        GuardDecision::Redirect("/login")
    );
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_is_idempotent() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("auth/user/", ok(SampleUser::ada().to_json())).await;
    let dashboard = dashboard(&transport);
    let mut reader = dashboard.auth_state();

    dashboard.initial_load().await;
    let first = reader.changed().await;
    dashboard.initial_load().await;

    assert_eq!(first.map(|s| s.initializing), Some(false));
    assert!(!dashboard.auth_state().is_initializing());
}

#[tokio::test(start_paused = true)]
async fn test_login_marks_authenticated() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("auth/login/", ok(json!({ "key": "abc" }))).await;
    let dashboard = dashboard(&transport);

    let body = dashboard
        .auth()
        .login(&LoginCredentials::new("ada", "pw"))
        .await
        .unwrap();

    assert_eq!(body, Some(json!({ "key": "abc" })));
    assert!(dashboard.auth_state().is_authenticated());
    let calls = transport.calls().await;
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].body, Some(json!({ "username": "ada", "password": "pw" })));
}

#[tokio::test(start_paused = true)]
async fn test_login_bad_credentials_does_not_refresh() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("auth/login/", bad_credentials()).await;
    let dashboard = dashboard(&transport);

    let err = dashboard
        .auth()
        .login(&LoginCredentials::new("ada", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(
        err.request_error().and_then(RequestError::status),
        Some(401)
    );
    assert_eq!(transport.call_count(REFRESH_PATH).await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_logout_always_logs_out() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("auth/login/", ok(json!({}))).await;
    transport
        .respond(
            "auth/logout/",
            Err(RequestError::Server {
                status: 500,
                body: None,
            }),
        )
        .await;
    let dashboard = dashboard(&transport);

    dashboard
        .auth()
        .login(&LoginCredentials::new("ada", "pw"))
        .await
        .unwrap();
    assert!(dashboard.auth_state().is_authenticated());

    assert!(dashboard.auth().logout().await.is_err());
    assert!(!dashboard.auth_state().is_authenticated());
    let calls = transport.calls().await;
    assert_eq!(calls[1].body, Some(json!({})));
}

#[tokio::test(start_paused = true)]
async fn test_list_projects_formats_dates() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond("projects/user-projects", ok(sample_projects_json()))
        .await;
    let dashboard = dashboard(&transport);

    let projects = dashboard.projects().list_user_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].title, "Bridge survey");
    assert_eq!(projects[0].created_date, "3/7/2023");
    assert_eq!(projects[0].updated_date, "11/21/2023");
}

#[tokio::test(start_paused = true)]
async fn test_list_projects_recovers_expired_session() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond_once("projects/user-projects", session_expired())
        .await;
    transport
        .respond("projects/user-projects", ok(sample_projects_json()))
        .await;
    transport.respond(REFRESH_PATH, refresh_succeeded()).await;
    let dashboard = dashboard(&transport);

    let projects = dashboard.projects().list_user_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(dashboard.metrics().retried_requests, 1);
}

#[tokio::test(start_paused = true)]
async fn test_project_details_and_update() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond("projects/12", ok(sample_project_detail_json(12)))
        .await;
    transport
        .respond("projects/update/12", ok(json!({ "id": 12 })))
        .await;
    let dashboard = dashboard(&transport);

    let detail = dashboard.projects().project_details(12).await.unwrap();
    assert_eq!(detail.id, 12);
    assert_eq!(detail.owner_username, "ada");

    dashboard
        .projects()
        .update_project(12, &ProjectDraft::new("Renamed", "New text"))
        .await
        .unwrap();

    let calls = transport.calls().await;
    assert_eq!(calls[1].method, Method::PATCH);
    assert_eq!(
        calls[1].body,
        Some(json!({ "title": "Renamed", "description": "New text" }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_create_project_validation_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .respond(
            "projects/create",
            Err(RequestError::Client {
                status: 400,
                body: Some(json!({ "title": ["This field may not be blank."] })),
            }),
        )
        .await;
    let dashboard = dashboard(&transport);

    let err = dashboard
        .projects()
        .create_project(&ProjectDraft::new("", "x"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Request(RequestError::Client { status: 400, .. })));
}

#[tokio::test(start_paused = true)]
async fn test_retrieve_user_decode_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.respond("auth/user/", ok(json!({ "unexpected": true }))).await;
    let dashboard = dashboard(&transport);

    let err = dashboard.auth().retrieve_user().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
}
