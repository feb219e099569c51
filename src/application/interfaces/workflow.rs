use crate::error::AppError;
use crate::model::paging::{PageRequest, PagedSet};
use crate::model::workflow::{WorkflowInstance, WorkflowQuery};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Interface for the workflow API
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Gets one workflow instance
    async fn workflow_instance(&self, id: &str) -> Result<WorkflowInstance, AppError>;

    /// Gets one page of the workflow instances matching `query`
    async fn instances_page(
        &self,
        query: &WorkflowQuery,
        page: PageRequest,
    ) -> Result<PagedSet<WorkflowInstance>, AppError>;

    /// Lazily lists every workflow instance matching `query`
    fn instances<'a>(
        &'a self,
        query: &'a WorkflowQuery,
    ) -> BoxStream<'a, Result<WorkflowInstance, AppError>>;
}
