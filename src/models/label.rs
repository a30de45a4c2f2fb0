//! Label model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::nullable::{Color, Nullable};
use crate::traits::{Create, Delete, Get, List, Update};

/// A label, used to tag and filter stories and epics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Label {
    /// Whether the label is archived.
    #[serde(default)]
    pub archived: bool,

    /// Hex color, if one is set.
    #[serde(default)]
    pub color: Option<String>,

    /// When the label was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Always "label".
    #[serde(default)]
    pub entity_type: String,

    /// ID from an external tool, if imported.
    #[serde(default)]
    pub external_id: Option<String>,

    /// Unique ID.
    pub id: i64,

    /// Label name.
    pub name: String,

    /// Usage counts. Only returned by the label endpoints.
    #[serde(default)]
    pub stats: Option<LabelStats>,

    /// When the label was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Calculated values for a label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStats {
    pub num_epics: u32,
    pub num_points_completed: u32,
    pub num_points_in_progress: u32,
    pub num_points_total: u32,
    pub num_stories_completed: u32,
    pub num_stories_in_progress: u32,
    pub num_stories_total: u32,
    pub num_stories_unestimated: u32,
}

/// Parameters for creating a label, alone or attached to a story or epic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLabelParams {
    /// Hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// ID from an external tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Label name.
    pub name: String,
}

impl CreateLabelParams {
    /// Label parameters with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Parameters for updating a label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLabelParams {
    /// Archive or unarchive the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// New color, or [`Nullable::Reset`] to remove it.
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub color: Nullable<Color>,

    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn label_path(id: i64) -> String {
    format!("labels/{id}")
}

#[async_trait]
impl Create for Label {
    type Params = CreateLabelParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self> {
        client.post("labels", &params).await
    }
}

#[async_trait]
impl List for Label {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("labels").await
    }
}

#[async_trait]
impl Get for Label {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&label_path(id)).await
    }
}

#[async_trait]
impl Update for Label {
    type Id = i64;
    type Params = UpdateLabelParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ClubhouseClient, id: i64, params: Self::Params) -> Result<Self> {
        client.put(&label_path(id), &params).await
    }
}

#[async_trait]
impl Delete for Label {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&label_path(id)).await
    }
}
