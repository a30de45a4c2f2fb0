//! Story model, bulk operations and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::models::comment::{Comment, CreateCommentParams};
use crate::models::file::{File, LinkedFile};
use crate::models::label::{CreateLabelParams, Label};
use crate::models::story_link::{CreateStoryLinkParams, TypedStoryLink};
use crate::nullable::Nullable;
use crate::traits::{Create, Delete, Get, Update};

/// Kinds of story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    Bug,
    Chore,
    #[default]
    Feature,
}

impl StoryType {
    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Chore => "chore",
            Self::Feature => "feature",
        }
    }
}

/// A story: the standard unit of work (a feature, bug, or chore).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Story {
    /// Link to the story in the web app.
    #[serde(default)]
    pub app_url: String,
    #[serde(default)]
    pub archived: bool,
    /// Whether another story blocks this one.
    #[serde(default)]
    pub blocked: bool,
    /// Whether this story blocks another one.
    #[serde(default)]
    pub blocker: bool,
    #[serde(default)]
    pub branches: Vec<Branch>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at_override: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub epic_id: Option<i64>,
    /// Points; `None` when unestimated.
    #[serde(default)]
    pub estimate: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub files: Vec<File>,
    #[serde(default)]
    pub follower_ids: Vec<String>,
    pub id: i64,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub linked_files: Vec<LinkedFile>,
    /// When the story last changed workflow state.
    #[serde(default)]
    pub moved_at: Option<DateTime<Utc>>,
    pub name: String,
    #[serde(default)]
    pub owner_ids: Vec<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub requested_by_id: Option<String>,
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at_override: Option<DateTime<Utc>>,
    #[serde(default)]
    pub story_links: Vec<TypedStoryLink>,
    #[serde(default)]
    pub story_type: StoryType,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub workflow_state_id: Option<i64>,
}

/// A pared-down story, returned by the bulk endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorySlim {
    #[serde(default)]
    pub app_url: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub blocker: bool,
    #[serde(default)]
    pub comment_ids: Vec<i64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at_override: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub epic_id: Option<i64>,
    #[serde(default)]
    pub estimate: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub file_ids: Vec<i64>,
    #[serde(default)]
    pub follower_ids: Vec<String>,
    pub id: i64,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub linked_file_ids: Vec<i64>,
    #[serde(default)]
    pub moved_at: Option<DateTime<Utc>>,
    pub name: String,
    #[serde(default)]
    pub owner_ids: Vec<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub requested_by_id: Option<String>,
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at_override: Option<DateTime<Utc>>,
    #[serde(default)]
    pub story_links: Vec<TypedStoryLink>,
    #[serde(default)]
    pub story_type: StoryType,
    #[serde(default)]
    pub task_ids: Vec<i64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub workflow_state_id: Option<i64>,
}

/// A checklist item on a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub id: i64,
    #[serde(default)]
    pub mention_ids: Vec<String>,
    #[serde(default)]
    pub owner_ids: Vec<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub story_id: i64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A VCS feature branch associated with a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub entity_type: String,
    pub id: i64,
    #[serde(default)]
    pub merged_branch_ids: Vec<i64>,
    pub name: String,
    #[serde(default)]
    pub persistent: bool,
    #[serde(default)]
    pub pull_requests: Vec<PullRequest>,
    #[serde(default)]
    pub repository_id: i64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: String,
}

/// A commit associated with a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub author_identity: Identity,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    pub hash: String,
    pub id: i64,
    #[serde(default)]
    pub merged_branch_ids: Vec<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub repository_id: i64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: String,
}

/// A VCS login, used to match commits to members.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub entity_type: String,
    pub name: String,
    #[serde(rename = "type")]
    pub identity_type: String,
}

/// A pull request attached to a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub branch_id: i64,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    pub id: i64,
    #[serde(default)]
    pub num_added: u32,
    #[serde(default)]
    pub num_commits: u32,
    #[serde(default)]
    pub num_removed: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub target_branch_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: String,
}

/// Parameters for creating a task along with a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskParams {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Parameters for creating a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStoryParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<CreateCommentParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_override: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<CreateLabelParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_file_ids: Vec<i64>,
    /// Story title (required).
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_ids: Vec<String>,
    /// Project the story belongs to (required).
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_override: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub story_links: Vec<CreateStoryLinkParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_type: Option<StoryType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<CreateTaskParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_state_id: Option<i64>,
}

/// Parameters for updating a single story.
///
/// The epic, the estimate, the deadline and both override timestamps can be
/// cleared with [`Nullable::Reset`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStoryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commit_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub completed_at_override: Nullable<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub deadline: Nullable<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub epic_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub estimate: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<CreateLabelParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_file_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by_id: Option<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub started_at_override: Nullable<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_type: Option<StoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_state_id: Option<i64>,
}

/// Parameters for updating many stories at once.
///
/// List fields here add or remove entries instead of replacing the list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStoriesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub deadline: Nullable<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub epic_id: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub estimate: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids_add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids_remove: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels_add: Vec<CreateLabelParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels_remove: Vec<CreateLabelParams>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_ids_add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_ids_remove: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_by_id: Option<String>,
    /// Stories to update (required).
    pub story_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_type: Option<StoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_state_id: Option<i64>,
}

#[derive(Serialize)]
struct CreateStoriesBody<'a> {
    stories: &'a [CreateStoryParams],
}

#[derive(Serialize)]
struct DeleteStoriesBody<'a> {
    story_ids: &'a [i64],
}

fn story_path(id: i64) -> String {
    format!("stories/{id}")
}

#[async_trait]
impl Create for Story {
    type Params = CreateStoryParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self> {
        client.post("stories", &params).await
    }
}

#[async_trait]
impl Get for Story {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&story_path(id)).await
    }
}

#[async_trait]
impl Update for Story {
    type Id = i64;
    type Params = UpdateStoryParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ClubhouseClient, id: i64, params: Self::Params) -> Result<Self> {
        client.put(&story_path(id), &params).await
    }
}

#[async_trait]
impl Delete for Story {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&story_path(id)).await
    }
}

/// Create several stories in one request.
#[tracing::instrument(skip(client, stories), fields(count = stories.len()))]
pub async fn create_stories(
    client: &ClubhouseClient,
    stories: &[CreateStoryParams],
) -> Result<Vec<StorySlim>> {
    client.post("stories/bulk", &CreateStoriesBody { stories }).await
}

/// Apply one update to several stories.
#[tracing::instrument(skip(client))]
pub async fn update_stories(
    client: &ClubhouseClient,
    params: &UpdateStoriesParams,
) -> Result<Vec<StorySlim>> {
    client.put("stories/bulk", params).await
}

/// Delete several stories in one request.
#[tracing::instrument(skip(client))]
pub async fn delete_stories(client: &ClubhouseClient, story_ids: &[i64]) -> Result<()> {
    client
        .request_empty(Method::DELETE, "stories/bulk", &DeleteStoriesBody { story_ids })
        .await
}
