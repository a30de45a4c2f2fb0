//! Mock Clubhouse API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Clubhouse
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests and
//! applies partial updates the way the API does, so a test can reset a field
//! and then read it back.
//!
//! # Example
//!
//! ```ignore
//! use clubhouse::mock_server::MockServer;
//! use clubhouse::{Epic, Get, Nullable, Update, UpdateEpicParams};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = server.client().unwrap();
//!
//!     let params = UpdateEpicParams { milestone_id: Nullable::Reset, ..Default::default() };
//!     Epic::update(&client, 10, params).await.unwrap();
//!
//!     let epic = Epic::get(&client, 10).await.unwrap();
//!     assert!(epic.milestone_id.is_none());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::{MockServer, TEST_TOKEN};
pub use state::{MockState, SharedState};
