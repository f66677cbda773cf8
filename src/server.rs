// SYNOID Sign Server
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::state::{SignState, SignStatus};

pub type AppState = Arc<SignState>;

#[derive(Deserialize)]
pub struct PoseRequest {
    #[serde(default)]
    pub words: Option<String>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pose", post(handle_pose))
        .route("/api/status", get(get_status))
        .with_state(state)
        .layer(CompressionLayer::new().gzip(true))
        // Chrome Private Network Access: public pages calling 127.0.0.1 need
        // the allow header on the preflight
        .layer(CorsLayer::permissive().allow_private_network(true))
}

pub async fn start_server(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("[SERVER] 🚀 SYNOID Sign running on http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_status(State(state): State<AppState>) -> Json<SignStatus> {
    Json(state.status())
}

async fn handle_pose(State(state): State<AppState>, Json(payload): Json<PoseRequest>) -> Response {
    let phrase = match payload.words.as_deref().map(str::trim) {
        Some(words) if !words.is_empty() => words.to_string(),
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };

    info!("[SERVER] Signing request: {}", phrase);
    match state.pipeline.translate(&phrase).await {
        Ok(frames) => Json(frames).into_response(),
        Err(e) => {
            error!("[SERVER] Pipeline failed for '{}': {}", phrase, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
