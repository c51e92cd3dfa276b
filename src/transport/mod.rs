//! HTTP/JSON transport for the cookbook.
//!
//! Routes:
//! - `POST /parse`: `{"input": ...}` to `{"msg": "<canonical name>"}`
//! - `POST /entry`: create an ingredient or recipe, `{}` on success
//! - `GET /entry/:name`: fetch a stored entry
//! - `GET /summary?name=...`: flattened recipe summary
//! - `GET /health`
//!
//! Failures are answered with a short plain-text reason and a 4xx status.
//! Only storage backend failures produce a 5xx.

use std::future::Future;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::cookbook::Cookbook;
use crate::error::{CookbookError, EntryError, NormalizeError, ResolutionError};

/// Shared handler state.
pub type SharedCookbook = Arc<Cookbook>;

#[derive(Debug, Serialize)]
struct ParseResponse {
    msg: String,
}

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    name: Option<String>,
}

/// Maps a cookbook error onto a status code and client-facing reason.
#[must_use]
pub fn status_from_error(err: &CookbookError) -> (StatusCode, &'static str) {
    match err {
        CookbookError::Normalize(_) => (StatusCode::BAD_REQUEST, "Invalid recipe name"),
        CookbookError::Entry(e) => match e {
            EntryError::MalformedEntry { .. } => (StatusCode::BAD_REQUEST, "invalid entry"),
            EntryError::DuplicateName { .. } => (StatusCode::BAD_REQUEST, "duplicate name"),
            EntryError::InvalidIngredient { .. } => (StatusCode::BAD_REQUEST, "invalid ingredient"),
            EntryError::InvalidRecipe { .. } => (StatusCode::BAD_REQUEST, "invalid recipe"),
        },
        CookbookError::Resolution(e) => match e {
            ResolutionError::NotFound { .. } => (StatusCode::BAD_REQUEST, "recipe not found"),
            ResolutionError::NotARecipe { .. } => (StatusCode::BAD_REQUEST, "not a recipe"),
            ResolutionError::InvalidGraph(_) => (StatusCode::BAD_REQUEST, "invalid recipe graph"),
            ResolutionError::Overflow { .. } => (StatusCode::BAD_REQUEST, "quantity overflow"),
            ResolutionError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage error"),
        },
        CookbookError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage error"),
    }
}

fn error_response(route: &'static str, err: &CookbookError) -> Response {
    let (status, reason) = status_from_error(err);
    if status.is_server_error() {
        tracing::error!(route, error = %err, "request failed");
    } else {
        tracing::warn!(route, error = %err, "request rejected");
    }
    (status, reason).into_response()
}

/// Build the application router.
pub fn router(cookbook: SharedCookbook, config: &ServerConfig) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %uuid::Uuid::new_v4(),
        )
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/parse", post(parse_name))
        .route("/entry", post(create_entry))
        .route("/entry/:name", get(get_entry))
        .route("/summary", get(summary))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(trace)
        .with_state(cookbook)
}

/// Bind `config.addr` and serve until `shutdown` resolves.
pub async fn serve<F>(cookbook: SharedCookbook, config: ServerConfig, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "cookbook listening");

    axum::serve(listener, router(cookbook, &config))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_check() -> &'static str {
    "OK"
}

/// POST /parse
async fn parse_name(State(cookbook): State<SharedCookbook>, body: Bytes) -> Response {
    // A missing `input` behaves like an empty string.
    let input = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(mut fields)) => fields
            .remove("input")
            .unwrap_or_else(|| Value::String(String::new())),
        _ => {
            let err = CookbookError::Normalize(NormalizeError::InvalidInput {
                reason: "body must be a JSON object",
            });
            return error_response("parse", &err);
        }
    };

    match cookbook.parse_name(&input) {
        Ok(msg) => Json(ParseResponse { msg }).into_response(),
        Err(err) => error_response("parse", &err),
    }
}

/// POST /entry
async fn create_entry(State(cookbook): State<SharedCookbook>, body: Bytes) -> Response {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            let err = CookbookError::Entry(EntryError::MalformedEntry {
                reason: format!("invalid JSON: {e}"),
            });
            return error_response("entry", &err);
        }
    };

    match cookbook.create_entry(&raw) {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
        Err(err) => error_response("entry", &err),
    }
}

/// GET /entry/:name
async fn get_entry(State(cookbook): State<SharedCookbook>, Path(name): Path<String>) -> Response {
    match cookbook.entry(&name) {
        Ok(Some(entry)) => Json(entry.as_ref()).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "entry not found").into_response(),
        Err(err) => error_response("entry_lookup", &err),
    }
}

/// GET /summary?name=...
async fn summary(State(cookbook): State<SharedCookbook>, Query(query): Query<SummaryQuery>) -> Response {
    let Some(name) = query.name else {
        let err = CookbookError::Resolution(ResolutionError::NotFound { name: String::new() });
        return error_response("summary", &err);
    };

    match cookbook.summarize(&name) {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => error_response("summary", &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GraphError, StorageError};

    #[test]
    fn client_errors_map_to_400() {
        let cases: Vec<(CookbookError, &str)> = vec![
            (
                EntryError::DuplicateName { name: "Egg".into() }.into(),
                "duplicate name",
            ),
            (
                EntryError::MalformedEntry { reason: "x".into() }.into(),
                "invalid entry",
            ),
            (
                ResolutionError::NotARecipe { name: "Egg".into() }.into(),
                "not a recipe",
            ),
            (
                ResolutionError::InvalidGraph(GraphError::Cycle { name: "X".into() }).into(),
                "invalid recipe graph",
            ),
            (
                ResolutionError::InvalidGraph(GraphError::DanglingReference { name: "G".into() }).into(),
                "invalid recipe graph",
            ),
        ];

        for (err, expected) in cases {
            let (status, reason) = status_from_error(&err);
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(reason, expected);
        }
    }

    #[test]
    fn storage_errors_map_to_500() {
        let err: CookbookError = StorageError::BackendError("poisoned lock".into()).into();
        assert_eq!(status_from_error(&err).0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
