//! Clubhouse API client library.
//!
//! A Rust library for the Clubhouse project-management REST API using a
//! trait-based architecture where each operation (Get, List, Create,
//! Update, Delete) is a trait that resource types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use clubhouse::{ClubhouseClient, Epic, Get, List, Nullable, Update, UpdateEpicParams};
//!
//! #[tokio::main]
//! async fn main() -> clubhouse::Result<()> {
//!     // Create client from environment variables
//!     let client = ClubhouseClient::from_env()?;
//!
//!     let epics = Epic::list(&client).await?;
//!     println!("Found {} epics", epics.len());
//!
//!     // Rename an epic and clear its milestone in one request
//!     let params = UpdateEpicParams {
//!         name: Some("Checkout v2".to_string()),
//!         milestone_id: Nullable::Reset,
//!         ..Default::default()
//!     };
//!     let epic = Epic::update(&client, 17, params).await?;
//!     println!("Epic: {}", epic.name);
//!
//!     let epic = Epic::get(&client, 17).await?;
//!     assert!(epic.milestone_id.is_none());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Partial updates
//!
//! Update parameters distinguish three states for fields the API lets you
//! clear. [`Nullable::Unset`] leaves the field out of the request,
//! [`Nullable::Value`] sends a new value, and [`Nullable::Reset`] sends
//! `null` so the server clears the field.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CLUBHOUSE_API_TOKEN` (required) - Your API token
//! - `CLUBHOUSE_API_URL` (optional) - Root URL (defaults to `https://api.clubhouse.io/api/`)
//! - `CLUBHOUSE_API_VERSION` (optional) - API version (defaults to `v2`)
//! - `CLUBHOUSE_RATE_LIMIT` (optional) - Requests per second, `0` for unlimited (defaults to `3`)

pub mod cli;
mod client;
mod error;
#[cfg(feature = "test-server")]
pub mod mock_server;
mod models;
mod nullable;
pub mod output;
mod traits;

// Re-export core types
pub use client::{
    ClientConfig, ClubhouseClient, DEFAULT_REQUESTS_PER_SECOND, DEFAULT_ROOT_URL, DEFAULT_VERSION,
};
pub use error::{ClubhouseError, ErrorKind, RequestError, Result};
pub use nullable::{encode_params, Color, FieldState, Nullable};
pub use output::PrettyPrint;

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models
pub use models::{
    // Category types
    Category,
    CategoryType,
    CreateCategoryParams,
    UpdateCategoryParams,
    // Comment types
    Comment,
    CreateCommentParams,
    ThreadedComment,
    UpdateCommentParams,
    // Epic types
    CreateEpicParams,
    Epic,
    EpicState,
    EpicStats,
    UpdateEpicParams,
    // File types
    File,
    FileUpload,
    LinkedFile,
    UpdateFileParams,
    // Label types
    CreateLabelParams,
    Label,
    LabelStats,
    UpdateLabelParams,
    // Member types
    Icon,
    Member,
    Profile,
    // Milestone types
    CreateMilestoneParams,
    Milestone,
    MilestoneState,
    UpdateMilestoneParams,
    // Project types
    CreateProjectParams,
    Project,
    ProjectStats,
    UpdateProjectParams,
    // Repository types
    Repository,
    // Search types
    SearchParams,
    SearchResults,
    StorySearch,
    MAX_PAGES,
    // Story types
    Branch,
    Commit,
    CreateStoryParams,
    CreateTaskParams,
    Identity,
    PullRequest,
    Story,
    StorySlim,
    StoryType,
    Task,
    UpdateStoriesParams,
    UpdateStoryParams,
    // Story link types
    CreateStoryLinkParams,
    StoryLink,
    StoryVerb,
    TypedStoryLink,
    // Team types
    Team,
    Workflow,
    WorkflowState,
};

// Re-export convenience functions
pub use models::{
    create_epic_comment, create_epic_comment_reply, delete_epic_comment, get_epic_comment,
    list_epic_comments, update_epic_comment,
};
pub use models::{create_stories, delete_stories, update_stories};
pub use models::{search_stories, search_stories_all};
pub use models::upload_files;
