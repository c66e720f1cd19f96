//! Integration tests for `SearchClient` using wiremock HTTP mocks.
//!
//! The blocking client runs on the test thread; the mock server lives on a
//! locally owned tokio runtime.

use crate::services::error::ApiError;
use crate::services::search_api::SearchClient;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("runtime construction should not fail")
}

#[test]
fn fetch_profiles_parses_result_array() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    let body = serde_json::json!([
        {
            "username": "tech_jane",
            "full_name": "Jane Doe",
            "category": "Technology",
            "creator_type": "UGC",
            "followers": 120000,
            "followings": 310,
            "engagement_rate": 4.2,
            "avg_likes": 5100.0,
            "avg_comments": 230.0,
            "media_count": 812,
            "highlight_reel_count": 12,
            "relevance_score": 0.93,
            "location": [{ "city": "Lisbon", "country": "PT" }],
            "interests": ["tech", "gadgets"]
        },
        { "username": "code_max", "followers": 80000 }
    ]);

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/fetch_profiles"))
            .and(body_json(serde_json::json!({ "query": "tech influencers" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server),
    );

    let client = SearchClient::new(&server.uri(), 5).expect("client should build");
    let profiles = client
        .fetch_profiles("tech influencers")
        .expect("should parse profiles");

    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].username, "tech_jane");
    assert_eq!(profiles[0].followers, 120000);
    assert_eq!(profiles[0].location_display(), "Lisbon, PT");
    assert_eq!(profiles[1].username, "code_max");
    assert!(profiles[1].interests.is_none());
}

#[test]
fn fetch_profiles_surfaces_non_2xx_as_status_error() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/fetch_profiles"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "message": "index unavailable" })),
            )
            .mount(&server),
    );

    let client = SearchClient::new(&server.uri(), 5).expect("client should build");
    let err = client.fetch_profiles("anything").unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "index unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn fetch_profiles_rejects_malformed_body() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/fetch_profiles"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "unexpected": "shape" })),
            )
            .mount(&server),
    );

    let client = SearchClient::new(&server.uri(), 5).expect("client should build");
    let err = client.fetch_profiles("anything").unwrap_err();

    assert!(matches!(err, ApiError::Deserialize { .. }));
}
