//! `HttpTransport` against a wiremock backend.

use faultfinder_session::{
    FailureKind, HttpTransport, Request, RequestError, SESSION_EXPIRED_DETAIL, SessionConfig,
    Transport,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(&SessionConfig::new(server.uri())).unwrap()
}

#[tokio::test]
async fn test_success_returns_parsed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "ada" })))
        .mount(&server)
        .await;

    let reply = transport_for(&server)
        .send(&Request::get("auth/user/"))
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, Some(json!({ "username": "ada" })));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/create"))
        .and(body_json(json!({ "title": "t", "description": "d" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = transport_for(&server)
        .send(&Request::post(
            "/projects/create",
            json!({ "title": "t", "description": "d" }),
        ))
        .await
        .unwrap();

    assert_eq!(reply.status, 201);
}

#[tokio::test]
async fn test_session_expired_401_is_classified() {
    let server = MockServer::start().await;
    Mock::given(path("/projects/user-projects"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": SESSION_EXPIRED_DETAIL })),
        )
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&Request::get("projects/user-projects"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::UnauthorizedSession);
}

#[tokio::test]
async fn test_other_401_is_client_error() {
    let server = MockServer::start().await;
    Mock::given(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&Request::post("auth/login/", json!({})))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Client);
    assert_eq!(err.detail(), Some("Bad credentials"));
}

#[tokio::test]
async fn test_server_error_with_text_body() {
    let server = MockServer::start().await;
    Mock::given(path("/projects/3"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = transport_for(&server)
        .send(&Request::get("projects/3"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RequestError::Server {
            status: 502,
            body: Some(json!("Bad Gateway")),
        }
    );
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let config = SessionConfig::new(uri).with_request_timeout(Duration::from_secs(2));
    let err = HttpTransport::new(&config)
        .unwrap()
        .send(&Request::get("auth/user/"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::Transport);
}

#[tokio::test]
async fn test_cookies_replayed_only_with_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sessionid=abc123; Path=/")
                .set_body_json(json!({ "key": "ok" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/user/"))
        .and(header("cookie", "sessionid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "username": "ada" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/public/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let transport = transport_for(&server);
    transport
        .send(&Request::post("auth/login/", json!({ "username": "ada", "password": "pw" })))
        .await
        .unwrap();
    transport.send(&Request::get("auth/user/")).await.unwrap();
    transport
        .send(&Request::get("public/").without_credentials())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let public = requests
        .iter()
        .find(|request| request.url.path() == "/public/")
        .unwrap();
    assert!(public.headers.get("cookie").is_none());
}
