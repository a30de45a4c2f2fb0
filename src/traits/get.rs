//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::ClubhouseClient;
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// # Example
///
/// ```ignore
/// use clubhouse::{ClubhouseClient, Category, Get};
///
/// let client = ClubhouseClient::from_env()?;
/// let category = Category::get(&client, 17).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this resource (numeric for most, UUID for members).
    type Id: Send;

    /// Fetch the resource by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or the request fails.
    async fn get(client: &ClubhouseClient, id: Self::Id) -> Result<Self>;
}
