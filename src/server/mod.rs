//! Development server
//!
//! Serves the public directory. Post pages missing from it are rendered on
//! demand and written next to the generated ones.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ContentError;
use crate::generator::Generator;
use crate::Blog;

/// Server state
struct ServerState {
    generator: Generator,
    public_dir: PathBuf,
}

/// Start the development server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let generator = Generator::new(blog, blog.client()?)?;
    let state = Arc::new(ServerState {
        generator,
        public_dir: blog.public_dir.clone(),
    });

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<ServerState>) -> Router {
    let static_files =
        ServeDir::new(&state.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/post/:slug", get(post_handler))
        .route("/post/:slug/", get(post_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve a generated post, rendering it first when it was never generated
async fn post_handler(State(state): State<Arc<ServerState>>, Path(slug): Path<String>) -> Response {
    let dir = match state.generator.post_dir(&slug) {
        Ok(dir) => dir,
        Err(_) => return not_found(&state),
    };

    let file_path = dir.join("index.html");
    if let Ok(content) = tokio::fs::read_to_string(&file_path).await {
        return Html(content).into_response();
    }

    tracing::info!("Rendering {} on demand", slug);
    let written = match state.generator.write_post(&slug).await {
        Ok(path) => path,
        Err(e) => {
            if e.downcast_ref::<ContentError>()
                .is_some_and(ContentError::is_not_found)
            {
                return not_found(&state);
            }
            tracing::error!("Failed to render {}: {:#}", slug, e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    match tokio::fs::read_to_string(&written).await {
        Ok(content) => Html(content).into_response(),
        Err(e) => {
            tracing::error!("Failed to read {:?}: {}", written, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn not_found(state: &ServerState) -> Response {
    match state.generator.render_not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::posts::summary::tests::raw_post;
    use crate::testing::StubClient;

    fn state(dir: &std::path::Path, client: StubClient) -> Arc<ServerState> {
        let blog = Blog::with_config(dir, SiteConfig::default());
        Arc::new(ServerState {
            generator: Generator::new(&blog, Arc::new(client)).unwrap(),
            public_dir: blog.public_dir,
        })
    }

    #[tokio::test]
    async fn test_renders_missing_post_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let client =
            StubClient::new().with_document(raw_post("A1", "hooks", Some("2021-03-15T10:00:00Z")));
        let state = state(dir.path(), client);

        let response = post_handler(State(state.clone()), Path("hooks".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.public_dir.join("post/hooks/index.html").exists());
    }

    #[tokio::test]
    async fn test_unknown_post_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path(), StubClient::new());

        let response = post_handler(State(state.clone()), Path("missing".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!state.public_dir.join("post/missing").exists());
    }

    #[tokio::test]
    async fn test_traversal_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path(), StubClient::new());
        let response = post_handler(State(state), Path("..".to_string())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_serves_generated_post() {
        let dir = tempfile::tempdir().unwrap();
        let state = state(dir.path(), StubClient::new());
        let post_dir = state.public_dir.join("post/cached");
        std::fs::create_dir_all(&post_dir).unwrap();
        std::fs::write(post_dir.join("index.html"), "<p>cached</p>").unwrap();

        let response = post_handler(State(state), Path("cached".to_string())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
