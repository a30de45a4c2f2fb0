//! Mock Clubhouse API server.
//!
//! Provides an axum-based HTTP server that simulates the Clubhouse API.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::{MockState, SharedState};
use crate::{ClientConfig, ClubhouseClient};

/// Token the helper client sends.
pub const TEST_TOKEN: &str = "test-token";

/// A mock Clubhouse API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a stateful implementation of the API.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the root URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Client settings pointing at this server, without rate limiting.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_root_url(self.url.clone())
            .with_requests_per_second(0)
    }

    /// A client for this server using [`TEST_TOKEN`].
    pub fn client(&self) -> crate::Result<ClubhouseClient> {
        ClubhouseClient::with_config(TEST_TOKEN, self.client_config())
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> SharedState {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for category in scenario.categories {
            state = state.with_category(category);
        }
        for label in scenario.labels {
            state = state.with_label(label);
        }
        for epic in scenario.epics {
            state = state.with_epic(epic);
        }
        for (epic_id, comment) in scenario.epic_comments {
            state = state.with_epic_comment(epic_id, comment);
        }
        for story in scenario.stories {
            state = state.with_story(story);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: SharedState) -> Router {
        let api = Router::new()
            // Category routes
            .route(
                "/categories",
                get(handlers::list_categories).post(handlers::create_category),
            )
            .route(
                "/categories/:id",
                get(handlers::get_category)
                    .put(handlers::update_category)
                    .delete(handlers::delete_category),
            )
            // Label routes
            .route(
                "/labels",
                get(handlers::list_labels).post(handlers::create_label),
            )
            .route(
                "/labels/:id",
                get(handlers::get_label)
                    .put(handlers::update_label)
                    .delete(handlers::delete_label),
            )
            // Epic routes
            .route("/epics", get(handlers::list_epics).post(handlers::create_epic))
            .route(
                "/epics/:id",
                get(handlers::get_epic)
                    .put(handlers::update_epic)
                    .delete(handlers::delete_epic),
            )
            .route(
                "/epics/:id/comments",
                get(handlers::list_epic_comments).post(handlers::create_epic_comment),
            )
            .route(
                "/epics/:id/comments/:comment_id",
                get(handlers::get_epic_comment)
                    .post(handlers::reply_to_epic_comment)
                    .put(handlers::update_epic_comment)
                    .delete(handlers::delete_epic_comment),
            )
            // Story routes
            .route("/stories", axum::routing::post(handlers::create_story))
            .route(
                "/stories/bulk",
                axum::routing::post(handlers::create_stories)
                    .put(handlers::update_stories)
                    .delete(handlers::delete_stories),
            )
            .route(
                "/stories/:id",
                get(handlers::get_story)
                    .put(handlers::update_story)
                    .delete(handlers::delete_story),
            )
            // Search
            .route("/search/stories", get(handlers::search_stories))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

        Router::new()
            .nest("/v2", api)
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Reject requests whose `token` query parameter does not match.
async fn require_token(
    State(state): State<SharedState>,
    Query(query): Query<TokenQuery>,
    request: Request,
    next: Next,
) -> Response {
    let accepted = state.read().await.accepts_token(query.token.as_deref());
    if !accepted {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "Unauthorized" })),
        )
            .into_response();
    }
    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
