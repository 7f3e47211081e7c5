//! HTTP service.
//!
//! Exposes the engine over plain `GET` routes so a chat bot's custom
//! commands can call it. Every play route also answers on the path used by
//! earlier deployments.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::engine::{Mode, RouletteEngine};
use crate::error::{InputError, ServerError};
use crate::input::{require_channel, require_player};
use crate::observability::metrics::record_request;
use crate::render::{self, LIVENESS_TEXT, PlayResponse, RecordResponse, ResponseFormat};

/// Query parameters accepted by the play routes.
#[derive(Debug, Default, Deserialize)]
pub struct PlayQuery {
    /// Player name.
    pub user: Option<String>,
    /// Channel name.
    pub channel: Option<String>,
    /// Response style.
    #[serde(default)]
    pub format: ResponseFormat,
}

/// Query parameters accepted by the record route.
#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    /// Channel name.
    pub channel: Option<String>,
    /// Response style.
    #[serde(default)]
    pub format: ResponseFormat,
}

/// Builds the router for `engine`.
pub fn build_router(engine: Arc<RouletteEngine>) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/roulette", get(handle_standard))
        .route("/roleta", get(handle_standard))
        .route("/roulette/limited", get(handle_limited))
        .route("/roletaLimitada", get(handle_limited))
        .route("/roulette/record", get(handle_record))
        .route("/roletaRecorde", get(handle_record))
        .layer(middleware::from_fn(track_request))
        .with_state(engine)
}

async fn handle_index() -> &'static str {
    LIVENESS_TEXT
}

async fn handle_standard(
    State(engine): State<Arc<RouletteEngine>>,
    Query(query): Query<PlayQuery>,
) -> Response {
    play(engine, Mode::Standard, query).await
}

async fn handle_limited(
    State(engine): State<Arc<RouletteEngine>>,
    Query(query): Query<PlayQuery>,
) -> Response {
    play(engine, Mode::Limited, query).await
}

async fn play(engine: Arc<RouletteEngine>, mode: Mode, query: PlayQuery) -> Response {
    let (channel, user) = match require_player(query.channel.as_deref(), query.user.as_deref()) {
        Ok((channel, user)) => (channel.to_string(), user.to_string()),
        Err(e) => return bad_request(&e, query.format),
    };

    // Ledger commits do blocking file I/O under the channel lock.
    let result = tokio::task::spawn_blocking({
        let (channel, user) = (channel.clone(), user.clone());
        move || engine.play(mode, &channel, &user)
    })
    .await;

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, %mode, "play task failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match query.format {
        ResponseFormat::Text => render::play_text(&user, &outcome).into_response(),
        ResponseFormat::Json => {
            Json(PlayResponse::new(mode, &channel, &user, &outcome)).into_response()
        }
    }
}

async fn handle_record(
    State(engine): State<Arc<RouletteEngine>>,
    Query(query): Query<RecordQuery>,
) -> Response {
    let channel = match require_channel(query.channel.as_deref()) {
        Ok(channel) => channel,
        Err(e) => return bad_request(&e, query.format),
    };

    let record = engine.record(channel);
    match query.format {
        ResponseFormat::Text => render::record_text(channel, record.as_ref()).into_response(),
        ResponseFormat::Json => Json(RecordResponse::new(channel, record.as_ref())).into_response(),
    }
}

fn bad_request(error: &InputError, format: ResponseFormat) -> Response {
    let message = error.to_string();
    match format {
        ResponseFormat::Text => (StatusCode::BAD_REQUEST, message).into_response(),
        ResponseFormat::Json => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response(),
    }
}

async fn track_request(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    let elapsed = started.elapsed();
    debug!(
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = elapsed.as_millis(),
        "request handled"
    );
    record_request(&path, elapsed);
    response
}

// ============================================================================
// Listener
// ============================================================================

/// Parses a bind address string into a full `host:port` form.
///
/// Accepts:
/// - `:8080` → `0.0.0.0:8080`
/// - `8080` → `0.0.0.0:8080`
/// - `1.2.3.4:8080` → as-is
///
/// # Errors
///
/// Returns [`ServerError::InvalidBindAddress`] if the result cannot be
/// parsed as a valid socket address.
pub fn parse_bind_addr(input: &str) -> Result<String, ServerError> {
    let addr = if input.starts_with(':') {
        format!("0.0.0.0{input}")
    } else if input.parse::<u16>().is_ok() {
        format!("0.0.0.0:{input}")
    } else {
        input.to_string()
    };
    addr.parse::<SocketAddr>()
        .map_err(|e| ServerError::InvalidBindAddress {
            input: input.to_string(),
            message: e.to_string(),
        })?;
    Ok(addr)
}

/// Binds a TCP listener for `bind`.
///
/// Returns the listener and the actual bound address (useful when binding
/// to port 0 in tests).
///
/// # Errors
///
/// Returns a [`ServerError`] if the address is invalid or cannot be bound.
pub async fn bind(bind: &str) -> Result<(TcpListener, SocketAddr), ServerError> {
    let addr = parse_bind_addr(bind)?;
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::BindFailed {
            addr: addr.clone(),
            source,
        })?;
    let bound = listener
        .local_addr()
        .map_err(|source| ServerError::BindFailed { addr, source })?;
    Ok((listener, bound))
}

/// Serves `router` on `listener` until `cancel` fires.
///
/// # Errors
///
/// Returns [`ServerError::Serve`] if the accept loop fails.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<(), ServerError> {
    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    info!(%addr, "roulette API listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await
        .map_err(ServerError::Serve)?;
    debug!("HTTP server shut down");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
