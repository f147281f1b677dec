/// HTTP router: JSON API under `/api`, web UI everywhere else
use crate::{api, error::ServerError, state::AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower::ServiceExt;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub fn create_router(app_state: AppState, web_dir: PathBuf) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        // Browse
        .route("/sections", get(api::library::list_sections))
        .route("/sections/:id", get(api::library::list_items))
        .route("/items/:id/children", get(api::library::list_children))
        .route("/shows/:id/seasons", get(api::library::list_seasons))
        .route("/seasons/:id/episodes", get(api::library::list_episodes))
        // Refresh
        .route("/refresh", post(api::refresh::refresh));

    let spa_fallback = move |req: Request<Body>| {
        let web_dir = web_dir.clone();
        async move { serve_web_ui(web_dir, req).await }
    };

    Router::new()
        .nest("/api", api_routes)
        .fallback(spa_fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Serve a static file from the web directory, falling back to `index.html`.
async fn serve_web_ui(web_dir: PathBuf, req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');
    let file_path = web_dir.join(path);

    if !path.is_empty() && file_path.is_file() {
        return match ServeDir::new(&web_dir).oneshot(req).await {
            Ok(res) => res.into_response(),
            Err(never) => match never {},
        };
    }

    let index_path = web_dir.join("index.html");
    match tokio::fs::read(&index_path).await {
        Ok(contents) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            contents,
        )
            .into_response(),
        // No web UI installed
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Failed to read {}", index_path.display());
            ServerError::Io(e).into_response()
        }
    }
}
