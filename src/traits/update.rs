//! Update trait for modifying resources.

use async_trait::async_trait;

use crate::client::ClubhouseClient;
use crate::error::Result;

/// Update an existing resource.
///
/// Update parameters only send the fields that were mentioned. Fields of
/// type [`crate::Nullable`] can additionally be cleared.
///
/// # Example
///
/// ```ignore
/// use clubhouse::{ClubhouseClient, Category, Nullable, Update, UpdateCategoryParams};
///
/// let client = ClubhouseClient::from_env()?;
/// let updated = Category::update(
///     &client,
///     17,
///     UpdateCategoryParams {
///         color: Nullable::Reset,
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this resource.
    type Id: Send;

    /// Parameters for the update.
    type Params: Send;

    /// Update the resource and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or the request fails.
    async fn update(client: &ClubhouseClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
