//! Teams and their workflows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::traits::{Get, List};

/// A group of projects sharing one workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Team {
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
    pub project_ids: Vec<i64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub workflow: Workflow,
}

/// The ordered workflow states of a team. Read-only through the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Workflow {
    pub created_at: Option<DateTime<Utc>>,
    pub default_state_id: i64,
    pub description: String,
    pub entity_type: String,
    pub id: i64,
    pub name: String,
    pub states: Vec<WorkflowState>,
    pub team_id: i64,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A workflow column. `state_type` is one of `unstarted`, `started`, `done`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowState {
    pub color: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub description: String,
    pub entity_type: String,
    pub id: i64,
    pub name: String,
    pub num_stories: u32,
    pub position: i64,
    #[serde(rename = "type")]
    pub state_type: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub verb: Option<String>,
}

impl Workflow {
    /// Look up a state by name, ignoring case.
    pub fn state_named(&self, name: &str) -> Option<&WorkflowState> {
        self.states
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

#[async_trait]
impl List for Team {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("teams").await
    }
}

#[async_trait]
impl Get for Team {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&format!("teams/{id}")).await
    }
}
