//! Label endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{no_content, not_found, unprocessable};
use crate::mock_server::state::SharedState;
use crate::{CreateLabelParams, Label, UpdateLabelParams};

/// GET /v2/labels
pub async fn list_labels(State(state): State<SharedState>) -> Json<Vec<Label>> {
    let state = state.read().await;
    Json(state.labels.values().cloned().collect())
}

/// POST /v2/labels
pub async fn create_label(
    State(state): State<SharedState>,
    Json(params): Json<CreateLabelParams>,
) -> Response {
    if params.name.is_empty() {
        return unprocessable("name must not be empty");
    }

    let mut state = state.write().await;
    if state.labels.values().any(|l| l.name == params.name) {
        return unprocessable("label name already taken");
    }

    (StatusCode::CREATED, Json(state.create_label(params))).into_response()
}

/// GET /v2/labels/{id}
pub async fn get_label(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.read().await;
    match state.labels.get(&id) {
        Some(label) => Json(label.clone()).into_response(),
        None => not_found("label", id),
    }
}

/// PUT /v2/labels/{id}
pub async fn update_label(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(params): Json<UpdateLabelParams>,
) -> Response {
    let mut state = state.write().await;
    match state.update_label(id, params) {
        Some(label) => Json(label.clone()).into_response(),
        None => not_found("label", id),
    }
}

/// DELETE /v2/labels/{id}
pub async fn delete_label(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.write().await;
    match state.labels.remove(&id) {
        Some(_) => no_content(),
        None => not_found("label", id),
    }
}
