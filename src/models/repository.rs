//! VCS repositories connected to the workspace.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::traits::{Get, List};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub external_id: Option<String>,
    /// `owner/name`.
    #[serde(default)]
    pub full_name: String,
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub repository_type: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: String,
}

#[async_trait]
impl List for Repository {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("repositories").await
    }
}

#[async_trait]
impl Get for Repository {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&format!("repositories/{id}")).await
    }
}
