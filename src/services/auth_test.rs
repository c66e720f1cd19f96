//! Integration tests for `AuthClient` using wiremock HTTP mocks.

use crate::model::SessionEvent;
use crate::services::auth::{AuthClient, SignUpOutcome};
use crate::services::error::ApiError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("runtime construction should not fail")
}

fn test_client(base_url: &str) -> AuthClient {
    AuthClient::new(base_url, "anon", None).expect("client should build")
}

#[test]
fn sign_in_returns_session_and_notifies_subscribers() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    let body = serde_json::json!({
        "access_token": "jwt-token",
        "token_type": "bearer",
        "refresh_token": "refresh",
        "user": { "id": "u1", "email": "jane@example.com" }
    });

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", "anon"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server),
    );

    let client = test_client(&server.uri());
    let events = client.subscribe();

    let session = client
        .sign_in_with_password("jane@example.com", "secret1")
        .expect("sign-in should succeed");

    assert_eq!(session.access_token, "jwt-token");
    assert_eq!(session.user.id, "u1");
    assert!(client.session().is_some());

    match events.try_recv() {
        Ok(SessionEvent::SignedIn(s)) => assert_eq!(s.user.email, "jane@example.com"),
        other => panic!("expected SignedIn event, got {other:?}"),
    }
}

#[test]
fn sign_in_surfaces_provider_message() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({ "error_description": "Invalid login credentials" }),
            ))
            .mount(&server),
    );

    let client = test_client(&server.uri());
    let err = client
        .sign_in_with_password("jane@example.com", "wrong-pass")
        .unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid login credentials");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(client.session().is_none());
}

#[test]
fn sign_up_without_session_awaits_confirmation() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    // Email-confirmation setups answer with a bare user record
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .and(query_param("redirect_to", "https://example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "u2",
                "email": "new@example.com",
                "confirmation_sent_at": "2025-06-01T10:00:00Z"
            })))
            .mount(&server),
    );

    let client = test_client(&server.uri());
    let outcome = client
        .sign_up("new@example.com", "secret1", "https://example.com")
        .expect("sign-up should succeed");

    assert!(matches!(outcome, SignUpOutcome::ConfirmationEmailSent));
    assert!(client.session().is_none());
}

#[test]
fn sign_up_with_autoconfirm_signs_in() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "jwt-token",
                "refresh_token": "refresh",
                "user": { "id": "u2", "email": "new@example.com" }
            })))
            .mount(&server),
    );

    let client = test_client(&server.uri());
    let events = client.subscribe();
    let outcome = client
        .sign_up("new@example.com", "secret1", "https://example.com")
        .expect("sign-up should succeed");

    assert!(matches!(outcome, SignUpOutcome::SignedIn(_)));
    assert!(matches!(events.try_recv(), Ok(SessionEvent::SignedIn(_))));
}

#[test]
fn sign_out_always_drops_local_session() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    // Even a rejected remote revocation must end in SignedOut
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server),
    );
    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "jwt-token",
                "refresh_token": "refresh",
                "user": { "id": "u1", "email": "jane@example.com" }
            })))
            .mount(&server),
    );

    let client = test_client(&server.uri());
    client
        .sign_in_with_password("jane@example.com", "secret1")
        .expect("sign-in should succeed");

    let events = client.subscribe();
    client.sign_out();

    assert!(client.session().is_none());
    assert!(matches!(events.try_recv(), Ok(SessionEvent::SignedOut)));
}
