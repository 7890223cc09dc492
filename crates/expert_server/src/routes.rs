//! HTTP routes: the move endpoint, usage hint, CORS and request logging.

use crate::error::ApiError;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use expert_tictactoe::{Engine, Player};
use serde::Deserialize;
use std::time::Instant;
use tracing::{info, instrument};

/// Shown for any request other than `GET /move`.
pub const USAGE: &str = "Use /move?board=<board_state> to get the next move for a board state. \
     <board_state> is a string with length 9, with x's, o's and spaces";

const ALLOWED_HEADERS: &str = "origin, X-Requested-With,Content-Type,Accept, Authorization";

/// Shared, read-only handler state.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// The player the server moves for.
    pub player: Player,
    /// Configured engine.
    pub engine: Engine,
}

impl AppState {
    /// Creates handler state.
    pub fn new(player: Player, engine: Engine) -> Self {
        Self { player, engine }
    }
}

/// Query string of `GET /move`.
#[derive(Debug, Deserialize)]
pub struct MoveQuery {
    /// Nine characters over `x`, `o` and space.
    pub board: Option<String>,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/move", get(get_move).fallback(usage))
        .route("/move/", get(get_move).fallback(usage))
        .fallback(usage)
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Answers a board with the server player's move.
#[instrument(skip(state), fields(player = %state.player))]
async fn get_move(
    State(state): State<AppState>,
    query: Result<Query<MoveQuery>, QueryRejection>,
) -> Result<Json<String>, ApiError> {
    let Query(query) = query?;
    let raw = query.board.unwrap_or_default();
    let board = state.engine.respond(&raw, state.player)?;
    Ok(Json(board.to_string()))
}

async fn usage() -> Json<&'static str> {
    Json(USAGE)
}

/// Adds CORS headers everywhere and answers preflight requests directly.
async fn cors(req: Request, next: Next) -> Response {
    let preflight = req.method() == Method::OPTIONS;
    let mut response = if preflight {
        (StatusCode::OK, Json(serde_json::json!({}))).into_response()
    } else {
        next.run(req).await
    };

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    if preflight {
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET"));
    }
    response
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Request handled"
    );
    response
}
