use async_trait::async_trait;
use contracts::domain::common::{Payload, Resource};

use super::error::ResourceError;
use super::query::filter_by_search;

/// Remote collection behind a list screen
///
/// Bodies are JSON objects keyed by the wire names of [`Resource::fields`].
#[async_trait(?Send)]
pub trait ResourceClient<E: Resource> {
    async fn list(&self) -> Result<Vec<E>, ResourceError>;

    async fn create(&self, payload: &Payload) -> Result<E, ResourceError>;

    async fn update(&self, id: &E::Id, payload: &Payload) -> Result<E, ResourceError>;

    async fn delete(&self, id: &E::Id) -> Result<(), ResourceError>;

    /// Server-side search; collections without an endpoint filter the full list locally
    async fn search(&self, query: &str) -> Result<Vec<E>, ResourceError> {
        let items = self.list().await?;
        Ok(filter_by_search(items.iter(), query).cloned().collect())
    }
}
