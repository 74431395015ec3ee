//! Web server for the earthquake map.
//!
//! Every request for `/` performs one fresh load and returns the finished
//! page, so reloading the browser is how a failed load is retried.

use std::sync::Arc;

use axum::{Router, extract::State, response::Html, routing::get};

use crate::client::Source;
use crate::pipeline::{LoadOutcome, render_page};
use crate::surface::MapView;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub view: MapView,
    pub source: Source,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

/// Create the Axum router with all routes.
pub fn create_router(config: ServerConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let app = create_router(config);

    tracing::info!("🌍 quakemap starting at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Main page handler - loads the feed and serves the map.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let (page, outcome) = render_page(&state.config.source, state.config.view).await;

    if let LoadOutcome::Rendered(summary) = &outcome {
        tracing::debug!("served page with {} markers", summary.rendered);
    }

    Html(page.to_html())
}

/// Health check endpoint.
async fn health_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::spawn_server;
    use crate::client::{FeedType, FileSource, UsgsClient};
    use crate::models::tests::{feed_json, quake_json};
    use axum::http::StatusCode;

    fn config(source: Source) -> ServerConfig {
        ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            view: MapView::default(),
            source,
        }
    }

    #[tokio::test]
    async fn test_health() {
        let source = Source::File(FileSource::new("/nonexistent.geojson"));
        let base = spawn_server(create_router(config(source))).await;

        let body = reqwest::get(format!("{base}/health"))
            .await
            .expect("request failed")
            .text()
            .await
            .expect("no body");
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_index_renders_upstream_feed() {
        let feed = feed_json(&[
            quake_json(
                "nc1",
                serde_json::json!([-122.4, 37.8, 5.0]),
                serde_json::json!(3.0),
                serde_json::json!("Test"),
            ),
            quake_json(
                "us2",
                serde_json::json!([142.3, 38.1, 35.0]),
                serde_json::json!(5.2),
                serde_json::json!("off the east coast of Honshu"),
            ),
        ]);
        let upstream = Router::new().route(
            &FeedType::ALL_WEEK.path(),
            get(move || async move { feed }),
        );
        let upstream_base = spawn_server(upstream).await;

        let client = UsgsClient::with_base_url(FeedType::ALL_WEEK, &upstream_base).expect("client");
        let base = spawn_server(create_router(config(Source::Usgs(client)))).await;

        let response = reqwest::get(format!("{base}/")).await.expect("request failed");
        assert_eq!(response.status(), StatusCode::OK);
        let html = response.text().await.expect("no body");

        assert_eq!(html.matches("L.circleMarker(").count(), 2);
        assert!(html.contains("L.circleMarker([37.8, -122.4], { radius: 15,"));
        assert!(html.contains("L.circleMarker([38.1, 142.3], { radius: 26, fillColor: \"orange\""));
        assert!(html.contains("\"bottomright\""));
    }

    #[tokio::test]
    async fn test_index_after_upstream_failure_serves_base_map() {
        let upstream = Router::new().route(
            &FeedType::ALL_WEEK.path(),
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let upstream_base = spawn_server(upstream).await;

        let client = UsgsClient::with_base_url(FeedType::ALL_WEEK, &upstream_base).expect("client");
        let base = spawn_server(create_router(config(Source::Usgs(client)))).await;

        let response = reqwest::get(format!("{base}/")).await.expect("request failed");
        assert_eq!(response.status(), StatusCode::OK);
        let html = response.text().await.expect("no body");

        assert!(html.contains("L.tileLayer("));
        assert!(!html.contains("L.circleMarker("));
        assert!(!html.contains("L.control("));
    }
}
