use crate::error::AppError;
use crate::model::content::{SearchHit, SearchQuery, ThumbnailSize};
use crate::model::entity::EntityType;
use crate::model::paging::{PageRequest, PagedSet};
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::path::Path;

/// Interface for the content API
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Gets one page of search hits
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<PagedSet<SearchHit>, AppError>;

    /// Lazily lists every hit of a query
    fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxStream<'a, Result<SearchHit, AppError>>;

    /// Gets the thumbnail image of an entity
    async fn thumbnail(
        &self,
        entity_type: EntityType,
        reference: &str,
        size: ThumbnailSize,
    ) -> Result<Vec<u8>, AppError>;

    /// Downloads the preferred bitstream of an entity into `path`
    ///
    /// # Returns
    /// * Number of bytes written
    async fn download(
        &self,
        entity_type: EntityType,
        reference: &str,
        path: &Path,
    ) -> Result<u64, AppError>;
}
