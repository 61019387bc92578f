//! HTTP transport for the filter service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health` - `{ "ok": true }`
//! - `GET /filters/:id` - `{ "filter": {...}, "version": n }`
//! - `PUT /filters/:id` - create. Body = `{ "description"?, "items": [...] }`
//! - `POST /filters/:id/_update` - Body = `{ "description"?, "add_items": [...], "remove_items": [...] }`
//! - `DELETE /filters/:id`
//!
//! Errors are rendered as `{ "error": message }` with the status from
//! [`UpdateError::status_code`].

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::FilterService;
use crate::filter::{Filter, UpdateError, UpdateFilterRequest};
use crate::model::{ModelStore, Versioned};
use crate::notify::ChangeNotifier;

/// Body of `PUT /filters/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PutFilterBody {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Body of `POST /filters/:id/_update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFilterBody {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub add_items: BTreeSet<String>,
    #[serde(default)]
    pub remove_items: BTreeSet<String>,
}

type SharedService<S, N> = State<Arc<FilterService<S, N>>>;

/// Build an axum `Router` serving the given filter service.
pub fn router<S, N>(service: Arc<FilterService<S, N>>) -> Router
where
    S: ModelStore + 'static,
    N: ChangeNotifier + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/filters/:id",
            get(get_handler::<S, N>)
                .put(put_handler::<S, N>)
                .delete(delete_handler::<S, N>),
        )
        .route("/filters/:id/_update", post(update_handler::<S, N>))
        .with_state(service)
}

/// Serve the filter service over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<S, N>(service: Arc<FilterService<S, N>>, addr: &str) -> Result<(), std::io::Error>
where
    S: ModelStore + 'static,
    N: ChangeNotifier + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "filter service listening");
    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

async fn get_handler<S: ModelStore + 'static, N: ChangeNotifier + 'static>(
    State(service): SharedService<S, N>,
    Path(id): Path<String>,
) -> Response {
    match service.get(&id).await {
        Ok(versioned) => versioned_response(versioned),
        Err(e) => error_response(e),
    }
}

async fn put_handler<S: ModelStore + 'static, N: ChangeNotifier + 'static>(
    State(service): SharedService<S, N>,
    Path(id): Path<String>,
    Json(body): Json<PutFilterBody>,
) -> Response {
    let filter = match Filter::new(id, body.description, body.items) {
        Ok(filter) => filter,
        Err(e) => return error_response(e.into()),
    };
    match service.create(filter).await {
        Ok(versioned) => versioned_response(versioned),
        Err(e) => error_response(e),
    }
}

async fn update_handler<S: ModelStore + 'static, N: ChangeNotifier + 'static>(
    State(service): SharedService<S, N>,
    Path(id): Path<String>,
    Json(body): Json<UpdateFilterBody>,
) -> Response {
    let request = UpdateFilterRequest {
        filter_id: id,
        description: body.description,
        add_items: body.add_items,
        remove_items: body.remove_items,
    };
    match service.update(request).await {
        Ok(filter) => (StatusCode::OK, Json(json!({ "filter": filter }))).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_handler<S: ModelStore + 'static, N: ChangeNotifier + 'static>(
    State(service): SharedService<S, N>,
    Path(id): Path<String>,
) -> Response {
    match service.delete(&id).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "acknowledged": true }))).into_response(),
        Err(e) => error_response(e),
    }
}

fn versioned_response(versioned: Versioned<Filter>) -> Response {
    let body = json!({ "filter": versioned.data, "version": versioned.version });
    (StatusCode::OK, Json(body)).into_response()
}

fn error_response(err: UpdateError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
