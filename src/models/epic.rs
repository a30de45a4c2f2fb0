//! Epic model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::models::comment::ThreadedComment;
use crate::models::label::{CreateLabelParams, Label};
use crate::nullable::Nullable;
use crate::traits::{Create, Delete, Get, List, Update};

/// An epic: a collection of stories that make up a larger initiative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Epic {
    #[serde(default)]
    pub archived: bool,

    /// Discussion on the epic.
    #[serde(default)]
    pub comments: Vec<ThreadedComment>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Manually set completion time.
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
    pub external_id: Option<String>,

    /// UUIDs of members following the epic.
    #[serde(default)]
    pub follower_ids: Vec<String>,

    /// Unique ID.
    pub id: i64,

    #[serde(default)]
    pub labels: Vec<Label>,

    /// Milestone the epic belongs to, if any.
    #[serde(default)]
    pub milestone_id: Option<i64>,

    pub name: String,

    /// UUIDs of members who own the epic.
    #[serde(default)]
    pub owner_ids: Vec<String>,

    #[serde(default)]
    pub position: i64,

    #[serde(default)]
    pub project_ids: Vec<i64>,

    #[serde(default)]
    pub started: bool,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    /// Manually set start time.
    #[serde(default)]
    pub started_at_override: Option<DateTime<Utc>>,

    #[serde(default)]
    pub state: EpicState,

    #[serde(default)]
    pub stats: EpicStats,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Calculated values for an epic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpicStats {
    pub last_story_update: Option<DateTime<Utc>>,
    pub num_points: u32,
    pub num_points_done: u32,
    pub num_points_started: u32,
    pub num_points_unstarted: u32,
    pub num_stories_done: u32,
    pub num_stories_started: u32,
    pub num_stories_unestimated: u32,
    pub num_stories_unstarted: u32,
}

/// Workflow states of an epic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpicState {
    #[default]
    #[serde(rename = "to do")]
    ToDo,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl EpicState {
    /// The state name as the API spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "to do",
            Self::InProgress => "in progress",
            Self::Done => "done",
        }
    }
}

/// Parameters for creating an epic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateEpicParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_override: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids: Vec<String>,

    /// Labels to attach; created if they do not exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<CreateLabelParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<i64>,

    /// Epic name (required).
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_override: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EpicState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Parameters for updating an epic.
///
/// The override timestamps, the deadline and the milestone can be cleared
/// with [`Nullable::Reset`]. Lists replace the stored list when non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEpicParams {
    /// Move the epic after this epic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// Move the epic before this epic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub completed_at_override: Nullable<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub deadline: Nullable<DateTime<FixedOffset>>,

    /// New description. `Some("")` empties it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<CreateLabelParams>,

    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub milestone_id: Nullable<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owner_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub started_at_override: Nullable<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EpicState>,
}

fn epic_path(id: i64) -> String {
    format!("epics/{id}")
}

#[async_trait]
impl List for Epic {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("epics").await
    }
}

#[async_trait]
impl Create for Epic {
    type Params = CreateEpicParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self> {
        client.post("epics", &params).await
    }
}

#[async_trait]
impl Get for Epic {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&epic_path(id)).await
    }
}

#[async_trait]
impl Update for Epic {
    type Id = i64;
    type Params = UpdateEpicParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ClubhouseClient, id: i64, params: Self::Params) -> Result<Self> {
        client.put(&epic_path(id), &params).await
    }
}

#[async_trait]
impl Delete for Epic {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&epic_path(id)).await
    }
}
