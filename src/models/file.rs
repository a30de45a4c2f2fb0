//! Uploaded and linked files.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::client::{decode, ClubhouseClient};
use crate::error::Result;
use crate::traits::{Delete, Get, List, Update};

/// A document uploaded to the workspace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct File {
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entity_type: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub filename: String,
    pub id: i64,
    #[serde(default)]
    pub mention_ids: Vec<String>,
    #[serde(default)]
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub story_ids: Vec<i64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub uploader_id: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// A file stored with a third party (Google Drive, Dropbox, Box, URL)
/// and linked to stories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkedFile {
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entity_type: String,
    pub id: i64,
    #[serde(default)]
    pub mention_ids: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub story_ids: Vec<i64>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default, rename = "type")]
    pub file_type: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub uploader_id: Option<String>,
    #[serde(default)]
    pub url: String,
}

/// Parameters for updating a file's metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFileParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader_id: Option<String>,
}

/// One file to upload: its name and contents.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub name: String,
    pub contents: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Read a file from disk, naming the upload after the file.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { name, contents })
    }
}

/// Build the multipart form, one `file{i}` part per upload.
fn upload_form(uploads: Vec<FileUpload>) -> Form {
    uploads
        .into_iter()
        .enumerate()
        .fold(Form::new(), |form, (i, upload)| {
            let part = Part::bytes(upload.contents).file_name(upload.name);
            form.part(format!("file{i}"), part)
        })
}

/// Upload files in a single multipart request.
#[tracing::instrument(skip(client, uploads), fields(count = uploads.len()))]
pub async fn upload_files(client: &ClubhouseClient, uploads: Vec<FileUpload>) -> Result<Vec<File>> {
    let bytes = client.send_multipart("files", upload_form(uploads)).await?;
    decode(&bytes)
}

fn file_path(id: i64) -> String {
    format!("files/{id}")
}

#[async_trait]
impl List for File {
    #[tracing::instrument(skip(client))]
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>> {
        client.get("files").await
    }
}

#[async_trait]
impl Get for File {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &ClubhouseClient, id: i64) -> Result<Self> {
        client.get(&file_path(id)).await
    }
}

#[async_trait]
impl Update for File {
    type Id = i64;
    type Params = UpdateFileParams;

    #[tracing::instrument(skip(client))]
    async fn update(client: &ClubhouseClient, id: i64, params: Self::Params) -> Result<Self> {
        client.put(&file_path(id), &params).await
    }
}

#[async_trait]
impl Delete for File {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &ClubhouseClient, id: i64) -> Result<()> {
        client.delete(&file_path(id)).await
    }
}
