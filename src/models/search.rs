//! Story search, with cursor pagination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::ClubhouseClient;
use crate::error::Result;
use crate::models::label::Label;
use crate::models::story::{StoryType, Task};
use crate::models::story_link::TypedStoryLink;

/// Upper bound on pages fetched by [`search_stories_all`].
pub const MAX_PAGES: usize = 1000;

/// Query parameters for `search/stories`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Cursor from the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Search query, in the web app's search syntax.
    pub query: String,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub data: Vec<StorySearch>,
    /// Full URL of the next page, absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: u64,
}

/// A story as returned by search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorySearch {
    #[serde(default)]
    pub app_url: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub blocker: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
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
    pub epic_id: Option<i64>,
    #[serde(default)]
    pub estimate: Option<i64>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub follower_ids: Vec<String>,
    pub id: i64,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub moved_at: Option<DateTime<Utc>>,
    pub name: String,
    #[serde(default)]
    pub owner_ids: Vec<String>,
    #[serde(default)]
    pub position: i64,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub requested_by_id: Option<String>,
    #[serde(default)]
    pub started: bool,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at_override: Option<DateTime<Utc>>,
    #[serde(default)]
    pub story_links: Vec<TypedStoryLink>,
    #[serde(default)]
    pub story_type: StoryType,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub workflow_state_id: Option<i64>,
}

/// Fetch one page of stories matching `params`.
#[tracing::instrument(skip(client))]
pub async fn search_stories(client: &ClubhouseClient, params: &SearchParams) -> Result<SearchResults> {
    client.get_with_query("search/stories", params).await
}

/// Fetch every page of stories matching `params`.
///
/// The API hands back the next page as a full URL; only its `next` query
/// value is carried into the following request. A `next` URL without that
/// value ends the walk.
///
/// # Errors
///
/// Fails on the first failed page, or with
/// [`ClubhouseError::InvalidUrl`](crate::ClubhouseError::InvalidUrl) if a
/// `next` URL cannot be parsed.
#[tracing::instrument(skip(client))]
pub async fn search_stories_all(
    client: &ClubhouseClient,
    params: &SearchParams,
) -> Result<Vec<StorySearch>> {
    let mut params = params.clone();
    let mut collected = Vec::new();

    for page_number in 1..=MAX_PAGES {
        let page = search_stories(client, &params).await?;
        collected.extend(page.data);

        let Some(next_url) = page.next.filter(|n| !n.is_empty()) else {
            return Ok(collected);
        };

        match next_cursor(&next_url)? {
            Some(cursor) if !cursor.is_empty() => params.next = Some(cursor),
            _ => return Ok(collected),
        }
        tracing::debug!(page_number, fetched = collected.len(), "fetching next search page");
    }

    tracing::warn!(
        max_pages = MAX_PAGES,
        fetched = collected.len(),
        "search stopped at page limit"
    );
    Ok(collected)
}

/// Pull the `next` query value out of a next-page URL.
///
/// The API returns paths like `/api/v2/search/stories?query=x&next=abc`, so
/// relative URLs are resolved against a placeholder base.
fn next_cursor(next_url: &str) -> Result<Option<String>> {
    let url = match Url::parse(next_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("https://api.clubhouse.io")?.join(next_url)?
        }
        Err(err) => return Err(err.into()),
    };

    Ok(url
        .query_pairs()
        .find(|(key, _)| key == "next")
        .map(|(_, value)| value.into_owned()))
}
