//! Workspace members.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::traits::{Get, List};

/// A user in the workspace that issued the token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub entity_type: String,
    /// Member UUID.
    pub id: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub deactivated: bool,
    pub display_icon: Option<Icon>,
    pub email_address: Option<String>,
    pub entity_type: String,
    pub gravatar_hash: Option<String>,
    pub id: String,
    /// The `@name` used for mentions.
    pub mention_name: String,
    pub name: Option<String>,
    pub two_factor_auth_activated: bool,
}

/// An image attached to a member or organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entity_type: String,
    pub id: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub url: String,
}

#[async_trait]
impl List for Member {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("members").await
    }
}

#[async_trait]
impl Get for Member {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: String) -> Result<Self> {
        client
            .get(&format!("members/{}", urlencoding::encode(&id)))
            .await
    }
}
