//! Delete trait for removing resources.

use async_trait::async_trait;

use crate::client::ClubhouseClient;
use crate::error::Result;

/// Delete a resource by ID.
#[async_trait]
pub trait Delete {
    /// The ID type for this resource.
    type Id: Send;

    /// Delete the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource does not exist or the request fails.
    async fn delete(client: &ClubhouseClient, id: Self::Id) -> Result<()>;
}
