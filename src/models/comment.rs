//! Comment models and epic discussion endpoints.
//!
//! Epic discussions are threaded: a comment can carry replies, and replies
//! are created by posting to the parent comment.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;

/// A comment in an epic discussion, with its replies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadedComment {
    /// UUID of the member who wrote the comment.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Replies to this comment.
    #[serde(default)]
    pub comments: Vec<ThreadedComment>,

    /// When the comment was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Whether the comment was deleted (replies keep it in the thread).
    #[serde(default)]
    pub deleted: bool,

    #[serde(default)]
    pub entity_type: String,

    #[serde(default)]
    pub external_id: Option<String>,

    /// Unique ID.
    pub id: i64,

    /// UUIDs of members mentioned in the text.
    #[serde(default)]
    pub mention_ids: Vec<String>,

    /// Comment body, in Markdown.
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A comment on a story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub external_id: Option<String>,
    pub id: i64,
    #[serde(default)]
    pub mention_ids: Vec<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub story_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parameters for creating a comment on an epic or story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentParams {
    /// Author UUID; defaults to the token owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,

    /// Backdate the comment, for imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Comment body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

impl CreateCommentParams {
    /// Comment parameters with just a body.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// Parameters for editing a comment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCommentParams {
    /// Replacement body.
    pub text: String,
}

fn epic_comments_path(epic_id: i64) -> String {
    format!("epics/{epic_id}/comments")
}

fn epic_comment_path(epic_id: i64, comment_id: i64) -> String {
    format!("epics/{epic_id}/comments/{comment_id}")
}

/// Add a top-level comment to an epic.
#[tracing::instrument(skip(client))]
pub async fn create_epic_comment(
    client: &ClubhouseClient,
    epic_id: i64,
    params: &CreateCommentParams,
) -> Result<ThreadedComment> {
    client.post(&epic_comments_path(epic_id), params).await
}

/// Reply to an existing epic comment.
#[tracing::instrument(skip(client))]
pub async fn create_epic_comment_reply(
    client: &ClubhouseClient,
    epic_id: i64,
    comment_id: i64,
    params: &CreateCommentParams,
) -> Result<ThreadedComment> {
    client.post(&epic_comment_path(epic_id, comment_id), params).await
}

/// List the top-level comments of an epic, with replies nested.
#[tracing::instrument(skip(client))]
pub async fn list_epic_comments(
    client: &ClubhouseClient,
    epic_id: i64,
) -> Result<Vec<ThreadedComment>> {
    client.get(&epic_comments_path(epic_id)).await
}

/// Fetch one epic comment and its replies.
#[tracing::instrument(skip(client))]
pub async fn get_epic_comment(
    client: &ClubhouseClient,
    epic_id: i64,
    comment_id: i64,
) -> Result<ThreadedComment> {
    client.get(&epic_comment_path(epic_id, comment_id)).await
}

/// Replace the text of an epic comment.
#[tracing::instrument(skip(client))]
pub async fn update_epic_comment(
    client: &ClubhouseClient,
    epic_id: i64,
    comment_id: i64,
    params: &UpdateCommentParams,
) -> Result<ThreadedComment> {
    client.put(&epic_comment_path(epic_id, comment_id), params).await
}

/// Delete an epic comment.
#[tracing::instrument(skip(client))]
pub async fn delete_epic_comment(
    client: &ClubhouseClient,
    epic_id: i64,
    comment_id: i64,
) -> Result<()> {
    client.delete(&epic_comment_path(epic_id, comment_id)).await
}
