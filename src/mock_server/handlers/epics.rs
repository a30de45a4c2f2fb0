//! Epic and epic discussion handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{no_content, not_found, unprocessable};
use crate::mock_server::state::SharedState;
use crate::{CreateCommentParams, CreateEpicParams, Epic, UpdateCommentParams, UpdateEpicParams};

/// GET /v2/epics
pub async fn list_epics(State(state): State<SharedState>) -> Json<Vec<Epic>> {
    let state = state.read().await;
    Json(state.epics.values().cloned().collect())
}

/// POST /v2/epics
pub async fn create_epic(
    State(state): State<SharedState>,
    Json(params): Json<CreateEpicParams>,
) -> Response {
    if params.name.is_empty() {
        return unprocessable("name must not be empty");
    }

    let mut state = state.write().await;
    (StatusCode::CREATED, Json(state.create_epic(params))).into_response()
}

/// GET /v2/epics/{id}
pub async fn get_epic(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.read().await;
    match state.epics.get(&id) {
        Some(epic) => {
            let mut epic = epic.clone();
            epic.comments = state.epic_comments.get(&id).cloned().unwrap_or_default();
            Json(epic).into_response()
        }
        None => not_found("epic", id),
    }
}

/// PUT /v2/epics/{id}
pub async fn update_epic(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(params): Json<UpdateEpicParams>,
) -> Response {
    if params.name.as_deref() == Some("") {
        return unprocessable("name must not be empty");
    }

    let mut state = state.write().await;
    match state.update_epic(id, params) {
        Some(epic) => Json(epic.clone()).into_response(),
        None => not_found("epic", id),
    }
}

/// DELETE /v2/epics/{id}
pub async fn delete_epic(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.write().await;
    match state.delete_epic(id) {
        Some(_) => no_content(),
        None => not_found("epic", id),
    }
}

/// GET /v2/epics/{id}/comments
pub async fn list_epic_comments(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.read().await;
    if !state.epics.contains_key(&id) {
        return not_found("epic", id);
    }
    Json(state.epic_comments.get(&id).cloned().unwrap_or_default()).into_response()
}

/// POST /v2/epics/{id}/comments
pub async fn create_epic_comment(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(params): Json<CreateCommentParams>,
) -> Response {
    if params.text.is_empty() {
        return unprocessable("text must not be empty");
    }

    let mut state = state.write().await;
    match state.create_epic_comment(id, params) {
        Some(comment) => (StatusCode::CREATED, Json(comment)).into_response(),
        None => not_found("epic", id),
    }
}

/// POST /v2/epics/{id}/comments/{comment_id}
pub async fn reply_to_epic_comment(
    State(state): State<SharedState>,
    Path((id, comment_id)): Path<(i64, i64)>,
    Json(params): Json<CreateCommentParams>,
) -> Response {
    if params.text.is_empty() {
        return unprocessable("text must not be empty");
    }

    let mut state = state.write().await;
    match state.reply_to_epic_comment(id, comment_id, params) {
        Some(reply) => (StatusCode::CREATED, Json(reply)).into_response(),
        None => not_found("comment", comment_id),
    }
}

/// GET /v2/epics/{id}/comments/{comment_id}
pub async fn get_epic_comment(
    State(state): State<SharedState>,
    Path((id, comment_id)): Path<(i64, i64)>,
) -> Response {
    let state = state.read().await;
    match state.get_epic_comment(id, comment_id) {
        Some(comment) => Json(comment.clone()).into_response(),
        None => not_found("comment", comment_id),
    }
}

/// PUT /v2/epics/{id}/comments/{comment_id}
pub async fn update_epic_comment(
    State(state): State<SharedState>,
    Path((id, comment_id)): Path<(i64, i64)>,
    Json(params): Json<UpdateCommentParams>,
) -> Response {
    let mut state = state.write().await;
    match state.update_epic_comment(id, comment_id, params.text) {
        Some(comment) => Json(comment.clone()).into_response(),
        None => not_found("comment", comment_id),
    }
}

/// DELETE /v2/epics/{id}/comments/{comment_id}
pub async fn delete_epic_comment(
    State(state): State<SharedState>,
    Path((id, comment_id)): Path<(i64, i64)>,
) -> Response {
    let mut state = state.write().await;
    if state.delete_epic_comment(id, comment_id) {
        no_content()
    } else {
        not_found("comment", comment_id)
    }
}
