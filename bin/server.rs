// Portfolio Site - Web Server
// Serves the rendered pages plus a small read-only JSON API

use anyhow::{bail, Context, Result};
use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use portfolio::{current_year, logging, Frame, SiteContent, SiteRenderer, TextCycle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state. Content never changes after startup.
#[derive(Clone)]
struct AppState {
    renderer: Arc<SiteRenderer>,
    timeline: Arc<Vec<Frame>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Command-line options
struct ServerOptions {
    addr: String,
    content: Option<PathBuf>,
    static_dir: PathBuf,
}

fn parse_options(args: &[String]) -> Result<ServerOptions> {
    let mut options = ServerOptions {
        addr: "0.0.0.0:3000".to_string(),
        content: None,
        static_dir: PathBuf::from("public"),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--addr" => options.addr = iter.next().context("--addr needs host:port")?.clone(),
            "--content" => {
                options.content = Some(PathBuf::from(iter.next().context("--content needs a file path")?))
            }
            "--static" => {
                options.static_dir = PathBuf::from(iter.next().context("--static needs a directory")?)
            }
            other => bail!("Unknown option: {}", other),
        }
    }

    Ok(options)
}

// ============================================================================
// Page Handlers
// ============================================================================

/// GET / - Home page
async fn serve_home(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.renderer.render_home().into_string())
}

/// GET /projects/:slug - Embedded dashboard page
///
/// `Path` has already percent-decoded the segment once.
async fn serve_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.renderer.content().embed(&slug) {
        Some(page) => (StatusCode::OK, Html(state.renderer.render_embed(page).into_string())),
        None => {
            warn!(slug = %slug, "no embed page for slug");
            let path = format!("/projects/{}", slug);
            (
                StatusCode::NOT_FOUND,
                Html(state.renderer.render_not_found(&path).into_string()),
            )
        }
    }
}

/// Fallback - 404 page
async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Html(state.renderer.render_not_found(uri.path()).into_string()),
    )
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/content - Site content as JSON
async fn get_content(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.renderer.content().clone()))
}

/// GET /api/typewriter - One cycle of the hero animation
async fn get_typewriter(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.timeline.as_ref().clone()))
}

fn router(state: AppState, static_dir: PathBuf) -> Router {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/content", get(get_content))
        .route("/typewriter", get(get_typewriter))
        .with_state(state.clone());

    // Build main router
    Router::new()
        .route("/", get(serve_home))
        .route("/projects/:slug", get(serve_project))
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing("info,tower_http=debug");

    println!("🌐 Portfolio Site - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_options(&args)?;

    let content = SiteContent::load(options.content.as_deref())?;
    let timeline = TextCycle::timeline(&content.typewriter_config());
    info!(frames = timeline.len(), "typewriter timeline ready");

    // Create shared state
    let state = AppState {
        renderer: Arc::new(SiteRenderer::new(content, current_year())),
        timeline: Arc::new(timeline),
    };

    let app = router(state, options.static_dir.clone());

    // Start server
    let listener = tokio::net::TcpListener::bind(&options.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", options.addr))?;

    println!("\n🚀 Server running on http://{}", options.addr);
    println!("   Site: http://{}/", options.addr);
    println!("   API:  http://{}/api/content", options.addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let content = SiteContent::builtin();
        let timeline = TextCycle::timeline(&content.typewriter_config());
        let state = AppState {
            renderer: Arc::new(SiteRenderer::new(content, 2026)),
            timeline: Arc::new(timeline),
        };
        router(state, PathBuf::from("public"))
    }

    async fn get_page(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_home_page() {
        let (status, body) = get_page("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Chokepoint"));
    }

    #[tokio::test]
    async fn test_embed_page() {
        let (status, body) = get_page("/projects/chokepoint").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<iframe"));
        assert!(body.contains("https://chokepoint.vercel.app"));
    }

    #[tokio::test]
    async fn test_unknown_pages_are_404() {
        let (status, body) = get_page("/projects/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("/projects/nope"));

        let (status, _) = get_page("/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_slug_decoded_exactly_once() {
        let (status, _) = get_page("/projects/choke%70oint").await;
        assert_eq!(status, StatusCode::OK);

        // %25 decodes to a literal '%', leaving "choke%70oint"
        let (status, _) = get_page("/projects/choke%2570oint").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api() {
        let (status, body) = get_page("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");

        let (_, body) = get_page("/api/typewriter").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let frames = json["data"].as_array().unwrap();
        assert_eq!(frames.len(), "Hari Haran".chars().count() * 2 + 2);
        assert_eq!(frames[0]["text"], "");
    }

    #[test]
    fn test_parse_options() {
        let args: Vec<String> = ["--addr", "127.0.0.1:8080", "--static", "assets"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let options = parse_options(&args).unwrap();
        assert_eq!(options.addr, "127.0.0.1:8080");
        assert_eq!(options.static_dir, PathBuf::from("assets"));
        assert!(options.content.is_none());
        assert!(parse_options(&["--bogus".to_string()]).is_err());
    }
}
