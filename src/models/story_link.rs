//! Story links: semantic relationships between two stories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::traits::{Create, Delete, Get};

/// How the subject story relates to the object story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryVerb {
    Blocks,
    Duplicates,
    #[serde(rename = "relates to")]
    RelatesTo,
}

/// A link as returned by the story link endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryLink {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    pub id: i64,
    pub object_id: i64,
    pub subject_id: i64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub verb: StoryVerb,
}

/// A link as embedded in a story, tagged with which side the story is on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypedStoryLink {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    pub id: i64,
    #[serde(default)]
    pub object_id: i64,
    #[serde(default)]
    pub subject_id: i64,
    /// Either `subject` or `object`.
    #[serde(default, rename = "type")]
    pub link_type: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub verb: String,
}

/// Parameters for linking two stories.
///
/// When used inside story creation, one of the ids may be left out and the
/// new story fills that side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStoryLinkParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    pub verb: StoryVerb,
}

impl CreateStoryLinkParams {
    /// Link `subject` to `object` with `verb`.
    pub fn new(subject_id: i64, verb: StoryVerb, object_id: i64) -> Self {
        Self {
            object_id: Some(object_id),
            subject_id: Some(subject_id),
            verb,
        }
    }
}

fn story_link_path(id: i64) -> String {
    format!("story-links/{id}")
}

#[async_trait]
impl Create for StoryLink {
    type Params = CreateStoryLinkParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self> {
        client.post("story-links", &params).await
    }
}

#[async_trait]
impl Get for StoryLink {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&story_link_path(id)).await
    }
}

#[async_trait]
impl Delete for StoryLink {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&story_link_path(id)).await
    }
}
