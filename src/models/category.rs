//! Category model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::nullable::{Color, Nullable};
use crate::traits::{Create, Delete, Get, List, Update};

/// A category, used to group milestones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    /// Whether the category is archived.
    #[serde(default)]
    pub archived: bool,

    /// Hex color, if one is set.
    #[serde(default)]
    pub color: Option<String>,

    /// When the category was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Always "category".
    #[serde(default)]
    pub entity_type: String,

    /// ID from an external tool, if imported.
    #[serde(default)]
    pub external_id: Option<String>,

    /// Unique ID.
    pub id: i64,

    /// Category name.
    pub name: String,

    /// Category type; currently always "milestone".
    #[serde(rename = "type", default)]
    pub category_type: String,

    /// When the category was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Kinds of category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// The only kind the API accepts.
    #[default]
    Milestone,
}

/// Parameters for creating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCategoryParams {
    /// Hex color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// ID from an external tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Category name; must be unique.
    pub name: String,

    /// Category type, `milestone` unless set.
    #[serde(rename = "type", default)]
    pub category_type: CategoryType,
}

/// Parameters for updating a category.
///
/// Fields are declared in JSON key order, so encoded bodies are
/// alphabetical.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryParams {
    /// Archive or unarchive the category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// New color, or [`Nullable::Reset`] to remove it.
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub color: Nullable<Color>,

    /// New name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn category_path(id: i64) -> String {
    format!("categories/{id}")
}

#[async_trait]
impl Create for Category {
    type Params = CreateCategoryParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self> {
        client.post("categories", &params).await
    }
}

#[async_trait]
impl List for Category {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("categories").await
    }
}

#[async_trait]
impl Get for Category {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&category_path(id)).await
    }
}

#[async_trait]
impl Update for Category {
    type Id = i64;
    type Params = UpdateCategoryParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ClubhouseClient, id: i64, params: Self::Params) -> Result<Self> {
        client.put(&category_path(id), &params).await
    }
}

#[async_trait]
impl Delete for Category {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&category_path(id)).await
    }
}
