//! Project model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::nullable::{Color, Nullable};
use crate::traits::{Create, Delete, Get, List, Update};

/// A Clubhouse project.
///
/// Projects usually map to teams (Frontend, Backend, Mobile) but can
/// represent any open-ended product, component, or initiative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    /// Short name used in story references.
    #[serde(default)]
    pub abbreviation: Option<String>,

    #[serde(default)]
    pub archived: bool,

    /// Hex color, if one is set.
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Days before the thermometer appears on the story summary.
    #[serde(default)]
    pub days_to_thermometer: i64,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub entity_type: String,

    #[serde(default)]
    pub external_id: Option<String>,

    #[serde(default)]
    pub follower_ids: Vec<String>,

    /// Unique ID.
    pub id: i64,

    /// Iteration length in weeks.
    #[serde(default)]
    pub iteration_length: i64,

    pub name: String,

    #[serde(default)]
    pub show_thermometer: bool,

    /// Date the project started.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub stats: ProjectStats,

    /// Team that owns the project.
    #[serde(default)]
    pub team_id: Option<i64>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Calculated values for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectStats {
    /// Total points of the project's stories.
    pub num_points: u32,
    /// Number of stories in the project.
    pub num_stories: u32,
}

/// Parameters for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iteration_length: Option<i64>,

    /// Project name (required).
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<FixedOffset>>,

    /// Owning team (required by workspaces with multiple teams).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Parameters for updating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,

    /// New color, or [`Nullable::Reset`] to remove it.
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub color: Nullable<Color>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_to_thermometer: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub follower_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_thermometer: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

fn project_path(id: i64) -> String {
    format!("projects/{id}")
}

#[async_trait]
impl Create for Project {
    type Params = CreateProjectParams;

    #[tracing::instrument(skip(client))]
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self> {
        client.post("projects", &params).await
    }
}

#[async_trait]
impl List for Project {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("projects").await
    }
}

#[async_trait]
impl Get for Project {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&project_path(id)).await
    }
}

#[async_trait]
impl Update for Project {
    type Id = i64;
    type Params = UpdateProjectParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ClubhouseClient, id: i64, params: Self::Params) -> Result<Self> {
        client.put(&project_path(id), &params).await
    }
}

#[async_trait]
impl Delete for Project {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&project_path(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nullable::encode_params;

    #[test]
    fn test_update_project_params_thermometer() {
        let params = UpdateProjectParams {
            show_thermometer: Some(false),
            days_to_thermometer: Some(5),
            ..Default::default()
        };
        assert_eq!(
            encode_params(&params).unwrap(),
            br#"{"days_to_thermometer":5,"show_thermometer":false}"#.to_vec()
        );
    }

    #[test]
    fn test_update_project_params_empty_color_is_reset() {
        let params = UpdateProjectParams {
            color: Nullable::Value(Color::new("")),
            ..Default::default()
        };
        assert_eq!(encode_params(&params).unwrap(), br#"{"color":null}"#.to_vec());
    }

    #[test]
    fn test_project_deserialize() {
        let json = r##"{
            "id": 4,
            "name": "Backend",
            "abbreviation": "BE",
            "color": "#3366cc",
            "show_thermometer": true,
            "days_to_thermometer": 7,
            "team_id": 2,
            "stats": {"num_points": 40, "num_stories": 12}
        }"##;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.abbreviation.as_deref(), Some("BE"));
        assert!(project.show_thermometer);
        assert_eq!(project.stats.num_stories, 12);
        assert_eq!(project.team_id, Some(2));
    }
}
