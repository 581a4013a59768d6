//! Blog web server

mod routes;
mod state;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Blog;

pub use routes::{ErrorPage, CONFIRMATION};
pub use state::AppState;

/// Build the router over a ready application context
pub fn router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route(
            "/",
            get(routes::list_posts).fallback(routes::method_not_allowed),
        )
        .route(
            "/about",
            get(routes::about_page).fallback(routes::method_not_allowed),
        )
        .route(
            "/contact",
            get(routes::contact_page).fallback(routes::method_not_allowed),
        )
        .route(
            "/blogpost/:index",
            get(routes::show_post).fallback(routes::method_not_allowed),
        )
        .route(
            "/form-entry",
            post(routes::receive_form).fallback(routes::method_not_allowed),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(AppState::build(blog).await?);
    tracing::info!("Serving {} posts", state.store.len());

    let app = router(state, &blog.static_dir);

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
