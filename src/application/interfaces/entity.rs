use crate::error::AppError;
use crate::model::entity::{Entity, EntityRef, EntityType, ProgressStatus};
use crate::model::paging::{PageRequest, PagedSet};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Interface for the entity API
#[async_trait]
pub trait EntityService: Send + Sync {
    /// Gets a single entity by reference
    ///
    /// # Errors
    /// * `AppError::NotFound` carrying `reference` if no such entity exists
    async fn get_entity(&self, entity_type: EntityType, reference: &str)
    -> Result<Entity, AppError>;

    /// Gets one page of the children of a folder, or of the root when `folder` is None
    async fn children_page(
        &self,
        folder: Option<&str>,
        page: PageRequest,
    ) -> Result<PagedSet<EntityRef>, AppError>;

    /// Lazily lists every child of a folder, or of the root when `folder` is None
    fn children<'a>(&'a self, folder: Option<&'a str>) -> BoxStream<'a, Result<EntityRef, AppError>>;

    /// Starts changing the security tag of an entity
    ///
    /// # Returns
    /// * A progress token for [`EntityService::get_async_progress`]
    async fn change_security_tag(
        &self,
        entity_type: EntityType,
        reference: &str,
        tag: &str,
        include_descendants: bool,
    ) -> Result<String, AppError>;

    /// Polls a long-running operation by its progress token
    async fn get_async_progress(&self, progress_token: &str) -> Result<ProgressStatus, AppError>;
}
