/// API integration tests
/// Tests complete HTTP request/response cycles against a mock Plex server
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{create_test_app, create_test_app_with_web_dir, fixtures, mount_json};
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{header as header_matcher, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

async fn post_refresh(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/api/refresh")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

/// Mount the refresh endpoint for a section and return the mock server's
/// recorded refresh queries afterwards
async fn mount_refresh(server: &MockServer, section: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/library/sections/{}/refresh", section)))
        .and(header_matcher("X-Plex-Token", fixtures::TOKEN))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

async fn refresh_queries(server: &MockServer) -> Vec<(String, Option<String>)> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path().ends_with("/refresh"))
        .map(|r| {
            let path = r
                .url
                .query_pairs()
                .find(|(k, _)| k == "path")
                .map(|(_, v)| v.into_owned());
            (r.url.path().to_string(), path)
        })
        .collect()
}

/// Test GET /api/health
#[tokio::test]
async fn test_health() {
    let plex = MockServer::start().await;
    let (status, body) = get_json(create_test_app(&plex), "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    // Health never reaches upstream
    assert!(plex.received_requests().await.unwrap().is_empty());
}

/// Test GET /api/sections
#[tokio::test]
async fn test_list_sections() {
    let plex = MockServer::start().await;
    mount_json(&plex, "/library/sections", fixtures::sections()).await;

    let (status, body) = get_json(create_test_app(&plex), "/api/sections").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": "1", "title": "Movies", "type": "movie"},
            {"id": "2", "title": "TV Shows", "type": "show"}
        ])
    );
}

/// Test GET /api/sections/:id
#[tokio::test]
async fn test_list_items() {
    let plex = MockServer::start().await;
    mount_json(&plex, "/library/sections/1/all", fixtures::movies()).await;

    let (status, body) = get_json(create_test_app(&plex), "/api/sections/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Movies");
    assert_eq!(body["section_id"], "1");
    assert_eq!(body["items"][0]["id"], "100");
    assert_eq!(body["items"][0]["type"], "movie");
    assert_eq!(body["items"][0]["section_id"], "1");
    assert_eq!(body["items"][0]["path"], "/movies/Inception.mkv");
}

/// Test GET /api/shows/:id/seasons and /api/items/:id/children
#[tokio::test]
async fn test_list_seasons() {
    let plex = MockServer::start().await;
    mount_json(&plex, "/library/metadata/200/children", fixtures::seasons()).await;
    let app = create_test_app(&plex);

    let (status, body) = get_json(app.clone(), "/api/shows/200/seasons").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["show_id"], "200");
    assert_eq!(body["title"], "Show");
    assert_eq!(body["seasons"].as_array().unwrap().len(), 2);
    assert_eq!(body["seasons"][1]["index"], 2);

    let (status, body) = get_json(app, "/api/items/200/children").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["children"][0]["type"], "season");
}

/// Test GET /api/seasons/:id/episodes
#[tokio::test]
async fn test_list_episodes() {
    let plex = MockServer::start().await;
    mount_json(&plex, "/library/metadata/201/children", fixtures::episodes()).await;

    let (status, body) = get_json(create_test_app(&plex), "/api/seasons/201/episodes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["show_title"], "Show");
    assert_eq!(body["season_title"], "Season 1");
    assert_eq!(body["episodes"][0]["id"], "301");
    assert_eq!(body["episodes"][0]["path"], "/tv/Show/S01E01.mkv");
}

/// Test upstream 404 surfaces as not_found
#[tokio::test]
async fn test_unknown_section_not_found() {
    let plex = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/library/sections/99/all"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&plex)
        .await;

    let (status, body) = get_json(create_test_app(&plex), "/api/sections/99").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

/// Test a rejected token surfaces as auth_error
#[tokio::test]
async fn test_rejected_token() {
    let plex = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/library/sections"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&plex)
        .await;

    let (status, body) = get_json(create_test_app(&plex), "/api/sections").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "auth_error");
}

/// Test upstream failures surface as upstream_unavailable
#[tokio::test]
async fn test_upstream_failure() {
    let plex = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/library/sections"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&plex)
        .await;

    let (status, body) = get_json(create_test_app(&plex), "/api/sections").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "upstream_unavailable");
    assert!(body["error"].as_str().unwrap().contains("500"));
}

/// Browse sections and items, then refresh the movie with the item the
/// listing returned
#[tokio::test]
async fn test_refresh_movie_from_listing() {
    let plex = MockServer::start().await;
    mount_json(&plex, "/library/sections", fixtures::sections()).await;
    mount_json(&plex, "/library/sections/1/all", fixtures::movies()).await;
    mount_refresh(&plex, "1").await;
    let app = create_test_app(&plex);

    let (_, listing) = get_json(app.clone(), "/api/sections/1").await;
    let item = listing["items"][0].clone();

    let (status, body) = post_refresh(app, json!({"kind": "item", "item": item})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["section_id"], "1");
    assert_eq!(body["path"], "/movies/Inception.mkv");
    assert_eq!(
        refresh_queries(&plex).await,
        vec![(
            "/library/sections/1/refresh".to_string(),
            Some("/movies/Inception.mkv".to_string())
        )]
    );
}

/// Refreshing a section calls refresh without a path
#[tokio::test]
async fn test_refresh_library() {
    let plex = MockServer::start().await;
    mount_refresh(&plex, "1").await;

    let (status, body) = post_refresh(
        create_test_app(&plex),
        json!({"kind": "library", "section_id": "1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("path").is_none());
    assert_eq!(
        refresh_queries(&plex).await,
        vec![("/library/sections/1/refresh".to_string(), None)]
    );
}

/// Refreshing a show relies on the section alone
#[tokio::test]
async fn test_refresh_show_unscoped() {
    let plex = MockServer::start().await;
    mount_json(&plex, "/library/sections/2/all", fixtures::shows()).await;
    mount_refresh(&plex, "2").await;
    let app = create_test_app(&plex);

    let (_, listing) = get_json(app.clone(), "/api/sections/2").await;
    let show = listing["items"][0].clone();
    assert_eq!(show["location"], "/tv/Show");

    let (status, _) = post_refresh(app, json!({"kind": "item", "item": show})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        refresh_queries(&plex).await,
        vec![("/library/sections/2/refresh".to_string(), None)]
    );
}

/// Drill down show -> season -> episode and refresh the episode under the
/// section the show came from
#[tokio::test]
async fn test_refresh_episode_after_drill_down() {
    let plex = MockServer::start().await;
    mount_json(&plex, "/library/metadata/200/children", fixtures::seasons()).await;
    mount_json(&plex, "/library/metadata/201/children", fixtures::episodes()).await;
    mount_refresh(&plex, "1").await;
    let app = create_test_app(&plex);

    let (_, seasons) = get_json(app.clone(), "/api/shows/200/seasons").await;
    assert_eq!(seasons["seasons"].as_array().unwrap().len(), 2);

    let (_, episodes) = get_json(app.clone(), "/api/seasons/201/episodes").await;
    let episode = episodes["episodes"][0].clone();

    let (status, body) = post_refresh(
        app,
        json!({"kind": "episode", "section_id": "1", "episode": episode}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "/tv/Show/S01E01.mkv");
    assert_eq!(
        refresh_queries(&plex).await,
        vec![(
            "/library/sections/1/refresh".to_string(),
            Some("/tv/Show/S01E01.mkv".to_string())
        )]
    );
}

/// The bare {section_id, path} body is still accepted
#[tokio::test]
async fn test_refresh_direct_form() {
    let plex = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/library/sections/1/refresh"))
        .and(query_param("path", "/movies/Inception.mkv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&plex)
        .await;

    let (status, body) = post_refresh(
        create_test_app(&plex),
        json!({"section_id": "1", "path": "/movies/Inception.mkv"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Refresh triggered successfully");
}

/// The bare form without a section is rejected before any upstream call
#[tokio::test]
async fn test_refresh_requires_section() {
    let plex = MockServer::start().await;

    let (status, body) = post_refresh(create_test_app(&plex), json!({"path": "/a.mkv"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "section_id is required");
    assert!(plex.received_requests().await.unwrap().is_empty());
}

/// An episode without a file cannot be refreshed
#[tokio::test]
async fn test_refresh_episode_without_file() {
    let plex = MockServer::start().await;

    let (status, body) = post_refresh(
        create_test_app(&plex),
        json!({
            "kind": "episode",
            "section_id": "1",
            "episode": {"id": "302", "season_id": "201", "title": "Missing", "index": 2, "path": ""}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_target");
    assert!(plex.received_requests().await.unwrap().is_empty());
}

/// Unknown section on refresh: one upstream call, not_found surfaced
#[tokio::test]
async fn test_refresh_unknown_section() {
    let plex = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/library/sections/99/refresh"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&plex)
        .await;

    let (status, body) = post_refresh(
        create_test_app(&plex),
        json!({"kind": "library", "section_id": "99"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(plex.received_requests().await.unwrap().len(), 1);
}

/// Non-API paths fall back to the web UI's index.html
#[tokio::test]
async fn test_web_ui_fallback() {
    let plex = MockServer::start().await;
    let web_dir = tempfile::TempDir::new().unwrap();
    std::fs::write(web_dir.path().join("index.html"), "<h1>Plex Refresher</h1>").unwrap();

    let app = create_test_app_with_web_dir(&plex, web_dir.path().to_path_buf());

    for uri in ["/", "/sections/1"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(String::from_utf8_lossy(&body_bytes).contains("Plex Refresher"));
    }
}

/// Without an installed UI, unknown paths are 404
#[tokio::test]
async fn test_no_web_ui() {
    let plex = MockServer::start().await;

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = create_test_app(&plex).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Bodies that do not deserialize are answered with the JSON error shape
#[tokio::test]
async fn test_refresh_malformed_body() {
    let plex = MockServer::start().await;
    let app = create_test_app(&plex);

    for body in [
        json!({"section_id": 1}),
        json!({"section_id": "1", "force": true}),
        json!({"kind": "item", "section_id": "1"}),
    ] {
        let (status, reply) = post_refresh(app.clone(), body.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(reply["kind"], "bad_request");
        assert!(!reply["error"].as_str().unwrap().is_empty());
    }

    assert!(plex.received_requests().await.unwrap().is_empty());
}

/// Unparseable JSON gets the same treatment
#[tokio::test]
async fn test_refresh_invalid_json() {
    let plex = MockServer::start().await;

    let request = Request::builder()
        .uri("/api/refresh")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = create_test_app(&plex).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let reply: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(reply["kind"], "bad_request");
}

/// An unreadable index.html is an internal error, not a missing UI
#[tokio::test]
async fn test_web_ui_unreadable_index() {
    let plex = MockServer::start().await;
    let web_dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(web_dir.path().join("index.html")).unwrap();

    let app = create_test_app_with_web_dir(&plex, web_dir.path().to_path_buf());
    let (status, body) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["kind"], "internal_error");
}

/// Id lookups used by the command line
mod lookup {
    use super::common::{fixtures, mount_json};
    use plex_client::{PlexClient, PlexConfig};
    use plex_refresher::lookup::{find_episode, find_item};
    use refresher_core::{ItemId, SectionId};
    use wiremock::MockServer;

    fn client(plex: &MockServer) -> PlexClient {
        PlexClient::new(PlexConfig::new(plex.uri(), fixtures::TOKEN)).unwrap()
    }

    #[tokio::test]
    async fn test_find_item() {
        let plex = MockServer::start().await;
        mount_json(&plex, "/library/sections/1/all", fixtures::movies()).await;
        let client = client(&plex);

        let item = find_item(&client, &SectionId::new("1"), &ItemId::new("100"))
            .await
            .unwrap();
        assert_eq!(item.path.as_deref(), Some("/movies/Inception.mkv"));

        let err = find_item(&client, &SectionId::new("1"), &ItemId::new("999"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[tokio::test]
    async fn test_find_episode() {
        let plex = MockServer::start().await;
        mount_json(&plex, "/library/metadata/201/children", fixtures::episodes()).await;
        mount_json(&plex, "/library/metadata/200/children", fixtures::seasons()).await;
        let client = client(&plex);

        let episode = find_episode(&client, &ItemId::new("201"), &ItemId::new("301"))
            .await
            .unwrap();
        assert_eq!(episode.path, "/tv/Show/S01E01.mkv");

        // A season id is not an episode
        let err = find_episode(&client, &ItemId::new("200"), &ItemId::new("201"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "bad_request");
    }
}
