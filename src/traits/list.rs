//! List trait for fetching every resource of a kind.

use async_trait::async_trait;

use crate::client::ClubhouseClient;
use crate::error::Result;

/// List all resources of a kind.
///
/// Clubhouse list endpoints are not paginated; one request returns the
/// whole collection. Story search is the paginated exception, see
/// [`crate::search_stories_all`].
#[async_trait]
pub trait List: Sized + Send {
    /// Fetch the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list(client: &ClubhouseClient) -> Result<Vec<Self>>;
}
