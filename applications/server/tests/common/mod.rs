/// Common test utilities and fixtures
use axum::Router;
use plex_client::{PlexClient, PlexConfig};
use plex_refresher::{create_router, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build the app against a mock Plex server, with no web UI installed
pub fn create_test_app(plex: &MockServer) -> Router {
    create_test_app_with_web_dir(plex, PathBuf::from("/nonexistent/web"))
}

pub fn create_test_app_with_web_dir(plex: &MockServer, web_dir: PathBuf) -> Router {
    let client = PlexClient::new(PlexConfig::new(plex.uri(), fixtures::TOKEN)).unwrap();
    create_router(AppState::new(Arc::new(client)), web_dir)
}

/// Mount a JSON reply for a GET path
pub async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Plex library fixtures: one movie section, one show section
pub mod fixtures {
    use serde_json::{json, Value};

    pub const TOKEN: &str = "test-token";

    pub fn sections() -> Value {
        json!({
            "MediaContainer": {
                "Directory": [
                    {"key": "1", "title": "Movies", "type": "movie"},
                    {"key": "2", "title": "TV Shows", "type": "show"}
                ]
            }
        })
    }

    pub fn movies() -> Value {
        json!({
            "MediaContainer": {
                "title1": "Movies",
                "Metadata": [{
                    "ratingKey": "100",
                    "title": "Inception",
                    "type": "movie",
                    "Media": [{"Part": [{"file": "/movies/Inception.mkv"}]}]
                }]
            }
        })
    }

    pub fn shows() -> Value {
        json!({
            "MediaContainer": {
                "title1": "TV Shows",
                "Metadata": [{
                    "ratingKey": "200",
                    "title": "Show",
                    "type": "show",
                    "Location": [{"path": "/tv/Show"}]
                }]
            }
        })
    }

    pub fn seasons() -> Value {
        json!({
            "MediaContainer": {
                "parentTitle": "Show",
                "Metadata": [
                    {"ratingKey": "201", "parentRatingKey": "200", "type": "season", "title": "Season 1", "index": 1},
                    {"ratingKey": "202", "parentRatingKey": "200", "type": "season", "title": "Season 2", "index": 2}
                ]
            }
        })
    }

    pub fn episodes() -> Value {
        json!({
            "MediaContainer": {
                "parentTitle": "Season 1",
                "grandparentTitle": "Show",
                "Metadata": [{
                    "ratingKey": "301",
                    "parentRatingKey": "201",
                    "type": "episode",
                    "title": "Pilot",
                    "index": 1,
                    "Media": [{"Part": [{"file": "/tv/Show/S01E01.mkv"}]}]
                }]
            }
        })
    }
}
