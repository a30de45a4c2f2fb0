//! Story, bulk story, and story search handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{no_content, not_found, unprocessable};
use crate::mock_server::state::SharedState;
use crate::{
    CreateStoryParams, SearchResults, Story, StorySearch, StorySlim, UpdateStoriesParams,
    UpdateStoryParams,
};

/// Body of POST /v2/stories/bulk.
#[derive(Debug, Deserialize)]
pub struct CreateStoriesBody {
    pub stories: Vec<CreateStoryParams>,
}

/// Body of DELETE /v2/stories/bulk.
#[derive(Debug, Deserialize)]
pub struct DeleteStoriesBody {
    pub story_ids: Vec<i64>,
}

/// Query parameters for GET /v2/search/stories.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    pub page_size: Option<usize>,
    /// Offset cursor handed out with the previous page.
    pub next: Option<String>,
}

/// Re-shape a full story into one of the API's reduced story views.
fn reshape<T: DeserializeOwned>(story: &Story) -> serde_json::Result<T> {
    serde_json::to_value(story).and_then(serde_json::from_value)
}

fn reshape_all<T: DeserializeOwned + Serialize>(stories: &[Story]) -> Response {
    match stories.iter().map(reshape).collect::<serde_json::Result<Vec<T>>>() {
        Ok(items) => Json(items).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

fn validate(params: &CreateStoryParams) -> Result<(), &'static str> {
    if params.name.is_empty() {
        return Err("name must not be empty");
    }
    if params.project_id <= 0 {
        return Err("project_id is required");
    }
    Ok(())
}

/// POST /v2/stories
pub async fn create_story(
    State(state): State<SharedState>,
    Json(params): Json<CreateStoryParams>,
) -> Response {
    if let Err(message) = validate(&params) {
        return unprocessable(message);
    }

    let mut state = state.write().await;
    (StatusCode::CREATED, Json(state.create_story(params))).into_response()
}

/// GET /v2/stories/{id}
pub async fn get_story(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.read().await;
    match state.stories.get(&id) {
        Some(story) => Json(story.clone()).into_response(),
        None => not_found("story", id),
    }
}

/// PUT /v2/stories/{id}
pub async fn update_story(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(params): Json<UpdateStoryParams>,
) -> Response {
    let mut state = state.write().await;
    match state.update_story(id, params) {
        Some(story) => Json(story.clone()).into_response(),
        None => not_found("story", id),
    }
}

/// DELETE /v2/stories/{id}
pub async fn delete_story(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.write().await;
    match state.stories.remove(&id) {
        Some(_) => no_content(),
        None => not_found("story", id),
    }
}

/// POST /v2/stories/bulk
pub async fn create_stories(
    State(state): State<SharedState>,
    Json(body): Json<CreateStoriesBody>,
) -> Response {
    if let Some(message) = body.stories.iter().find_map(|p| validate(p).err()) {
        return unprocessable(message);
    }

    let mut state = state.write().await;
    let created: Vec<Story> = body
        .stories
        .into_iter()
        .map(|p| state.create_story(p))
        .collect();

    let mut response = reshape_all::<StorySlim>(&created);
    if response.status() == StatusCode::OK {
        *response.status_mut() = StatusCode::CREATED;
    }
    response
}

/// PUT /v2/stories/bulk
pub async fn update_stories(
    State(state): State<SharedState>,
    Json(params): Json<UpdateStoriesParams>,
) -> Response {
    if params.story_ids.is_empty() {
        return unprocessable("story_ids must not be empty");
    }

    let mut state = state.write().await;
    match state.update_stories(params) {
        Some(updated) => reshape_all::<StorySlim>(&updated),
        None => unprocessable("one or more stories do not exist"),
    }
}

/// DELETE /v2/stories/bulk
pub async fn delete_stories(
    State(state): State<SharedState>,
    Json(body): Json<DeleteStoriesBody>,
) -> Response {
    let mut state = state.write().await;
    if !body.story_ids.iter().all(|id| state.stories.contains_key(id)) {
        return unprocessable("one or more stories do not exist");
    }
    for id in &body.story_ids {
        state.stories.remove(id);
    }
    no_content()
}

/// GET /v2/search/stories
///
/// `next` is an offset into the ordered matches. Pages other than the last
/// carry a `next` URL the way the API does: a path with the cursor buried
/// in its query string.
pub async fn search_stories(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let state = state.read().await;

    let offset = match query.next.as_deref() {
        None | Some("") => 0,
        Some(cursor) => match cursor.parse::<usize>() {
            Ok(offset) => offset,
            Err(_) => return unprocessable("invalid next cursor"),
        },
    };
    let page_size = query.page_size.unwrap_or(state.search_page_size).max(1);

    let matches = state.search_stories(&query.query);
    let total = matches.len();
    let end = (offset + page_size).min(total);

    let page: Vec<Story> = matches
        .get(offset..end)
        .unwrap_or_default()
        .iter()
        .map(|s| (*s).clone())
        .collect();

    let data = match page.iter().map(reshape).collect::<serde_json::Result<Vec<StorySearch>>>() {
        Ok(data) => data,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };

    let next = (end < total).then(|| {
        let query_string = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("query", &query.query)
            .append_pair("page_size", &page_size.to_string())
            .append_pair("next", &end.to_string())
            .finish();
        format!("/api/v2/search/stories?{query_string}")
    });

    Json(SearchResults {
        data,
        next,
        total: total as u64,
    })
    .into_response()
}
