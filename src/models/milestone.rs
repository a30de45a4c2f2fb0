//! Milestone model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::models::category::{Category, CreateCategoryParams};
use crate::nullable::Nullable;
use crate::traits::{Create, Delete, Get, List, Update};

/// A milestone: a collection of epics for a release or large initiative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at_override: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_type: String,
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at_override: Option<DateTime<Utc>>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Workflow states of a milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MilestoneState {
    #[serde(rename = "to do")]
    ToDo,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

/// Parameters for creating a milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMilestoneParams {
    /// Categories to attach; created if they do not exist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CreateCategoryParams>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_override: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Milestone name (required).
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at_override: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MilestoneState>,
}

/// Parameters for updating a milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMilestoneParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CreateCategoryParams>,

    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub completed_at_override: Nullable<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub started_at_override: Nullable<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MilestoneState>,
}

fn milestone_path(id: i64) -> String {
    format!("milestones/{id}")
}

#[async_trait]
impl Create for Milestone {
    type Params = CreateMilestoneParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self> {
        client.post("milestones", &params).await
    }
}

#[async_trait]
impl List for Milestone {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("milestones").await
    }
}

#[async_trait]
impl Get for Milestone {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&milestone_path(id)).await
    }
}

#[async_trait]
impl Update for Milestone {
    type Id = i64;
    type Params = UpdateMilestoneParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ClubhouseClient, id: i64, params: Self::Params) -> Result<Self> {
        client.put(&milestone_path(id), &params).await
    }
}

#[async_trait]
impl Delete for Milestone {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&milestone_path(id)).await
    }
}
