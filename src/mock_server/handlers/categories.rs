//! Category endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{no_content, not_found, unprocessable};
use crate::mock_server::state::SharedState;
use crate::{Category, CreateCategoryParams, UpdateCategoryParams};

/// GET /v2/categories
pub async fn list_categories(State(state): State<SharedState>) -> Json<Vec<Category>> {
    let state = state.read().await;
    Json(state.categories.values().cloned().collect())
}

/// POST /v2/categories
pub async fn create_category(
    State(state): State<SharedState>,
    Json(params): Json<CreateCategoryParams>,
) -> Response {
    if params.name.is_empty() {
        return unprocessable("name must not be empty");
    }

    let mut state = state.write().await;
    if state.categories.values().any(|c| c.name == params.name) {
        return unprocessable("category name already taken");
    }

    (StatusCode::CREATED, Json(state.create_category(params))).into_response()
}

/// GET /v2/categories/{id}
pub async fn get_category(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.read().await;
    match state.categories.get(&id) {
        Some(category) => Json(category.clone()).into_response(),
        None => not_found("category", id),
    }
}

/// PUT /v2/categories/{id}
pub async fn update_category(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(params): Json<UpdateCategoryParams>,
) -> Response {
    let mut state = state.write().await;
    match state.update_category(id, params) {
        Some(category) => Json(category.clone()).into_response(),
        None => not_found("category", id),
    }
}

/// DELETE /v2/categories/{id}
pub async fn delete_category(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.write().await;
    match state.categories.remove(&id) {
        Some(_) => no_content(),
        None => not_found("category", id),
    }
}
