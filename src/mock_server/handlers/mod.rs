//! HTTP request handlers for the mock server.

pub mod categories;
pub mod epics;
pub mod labels;
pub mod stories;

pub use categories::*;
pub use epics::*;
pub use labels::*;
pub use stories::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// 404 with the API's `{"message": ...}` body.
pub(crate) fn not_found(kind: &str, id: impl std::fmt::Display) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "message": format!("No {kind} found with id: {id}")
        })),
    )
        .into_response()
}

/// 422 with the API's `{"message": ...}` body.
pub(crate) fn unprocessable(message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}

/// 204 for successful deletes.
pub(crate) fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
