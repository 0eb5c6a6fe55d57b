//! Single-page HTTP front-end.
//!
//! `GET /` shows the empty form, `POST /generate` runs one generation and
//! re-renders the page with its outcome.

use crate::app::App;
use crate::render;
use crate::{Error, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub prompt: String,
}

pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .with_state(app)
}

async fn index_handler() -> Html<String> {
    Html(render::page("", None))
}

async fn generate_handler(
    State(app): State<Arc<App>>,
    Form(form): Form<GenerateForm>,
) -> Html<String> {
    let generation = app.generate(&form.prompt).await;
    Html(render::page(&form.prompt, Some(&generation)))
}

async fn health_handler() -> &'static str {
    "ok"
}

pub async fn serve(app: Arc<App>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("failed to bind {}: {}", addr, e)))?;
    info!("Serving Imaginate on http://{}", addr);

    axum::serve(listener, router(app))
        .await
        .map_err(|e| Error::Server(e.to_string()))
}
