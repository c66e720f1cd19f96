//! Integration tests for `StoreClient` using wiremock HTTP mocks.

use crate::model::{AuthUser, CampaignInfluencer, Session};
use crate::services::error::ApiError;
use crate::services::store::StoreClient;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rt() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().expect("runtime construction should not fail")
}

fn test_session() -> Session {
    Session {
        access_token: "user-token".to_string(),
        refresh_token: String::new(),
        user: AuthUser {
            id: "u1".to_string(),
            email: "jane@example.com".to_string(),
        },
    }
}

#[test]
fn recent_searches_are_scoped_and_ordered() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    let body = serde_json::json!([
        { "id": "s2", "query": "beauty vloggers", "created_at": "2025-06-02T08:00:00Z" },
        { "id": "s1", "query": "tech influencers", "created_at": "2025-06-01T09:00:00Z" }
    ]);

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/rest/v1/recent_searches"))
            .and(query_param("user_id", "eq.u1"))
            .and(query_param("order", "created_at.desc"))
            .and(query_param("limit", "10"))
            .and(header("apikey", "anon"))
            .and(header("authorization", "Bearer user-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server),
    );

    let client = StoreClient::new(&server.uri(), "anon").expect("client should build");
    let searches = client
        .recent_searches(&test_session())
        .expect("should parse searches");

    assert_eq!(searches.len(), 2);
    assert_eq!(searches[0].query, "beauty vloggers");
}

#[test]
fn save_search_posts_query_with_user_id() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("POST"))
            .and(path("/rest/v1/recent_searches"))
            .and(header("prefer", "return=minimal"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server),
    );

    let client = StoreClient::new(&server.uri(), "anon").expect("client should build");
    client
        .save_search(&test_session(), "tech influencers")
        .expect("save should succeed");
}

#[test]
fn campaign_influencers_reads_single_row() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    let body = serde_json::json!([
        {
            "influencers": [
                {
                    "username": "tech_jane",
                    "full_name": "Jane Doe",
                    "category": "Technology",
                    "followers": 120000,
                    "engagement_rate": 4.2,
                    "added_at": "2025-06-01T10:00:00Z"
                }
            ]
        }
    ]);

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/rest/v1/campaigns"))
            .and(query_param("id", "eq.c1"))
            .and(query_param("user_id", "eq.u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server),
    );

    let client = StoreClient::new(&server.uri(), "anon").expect("client should build");
    let influencers = client
        .campaign_influencers(&test_session(), "c1")
        .expect("should parse influencers");

    assert_eq!(influencers.len(), 1);
    assert_eq!(influencers[0].username, "tech_jane");
}

#[test]
fn campaign_influencers_missing_campaign_is_not_found() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/rest/v1/campaigns"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server),
    );

    let client = StoreClient::new(&server.uri(), "anon").expect("client should build");
    let err = client
        .campaign_influencers(&test_session(), "missing")
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 404, .. }));
}

#[test]
fn set_campaign_influencers_patches_scoped_row() {
    let rt = rt();
    let server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/campaigns"))
            .and(query_param("id", "eq.c1"))
            .and(query_param("user_id", "eq.u1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server),
    );

    let influencers = vec![CampaignInfluencer {
        username: "tech_jane".to_string(),
        full_name: "Jane Doe".to_string(),
        category: "Technology".to_string(),
        followers: 120000,
        engagement_rate: 4.2,
        added_at: chrono::Utc::now(),
    }];

    let client = StoreClient::new(&server.uri(), "anon").expect("client should build");
    client
        .set_campaign_influencers(&test_session(), "c1", &influencers)
        .expect("update should succeed");
}
