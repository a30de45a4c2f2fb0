//! Create trait for new resources.

use async_trait::async_trait;

use crate::client::ClubhouseClient;
use crate::error::Result;

/// Create a new resource.
///
/// # Example
///
/// ```ignore
/// use clubhouse::{ClubhouseClient, CreateLabelParams, Create, Label};
///
/// let client = ClubhouseClient::from_env()?;
/// let label = Label::create(
///     &client,
///     CreateLabelParams {
///         name: "backend".to_string(),
///         color: Some("#ff0000".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Create: Sized {
    /// Parameters for the new resource.
    type Params: Send;

    /// Create the resource and return it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the parameters or the
    /// request fails.
    async fn create(client: &ClubhouseClient, params: Self::Params) -> Result<Self>;
}
