use crate::error::AppError;
use crate::model::monitor::{Message, Monitor};
use crate::model::paging::{PageRequest, PagedSet};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Interface for the process monitor API
#[async_trait]
pub trait MonitorService: Send + Sync {
    /// Gets all process monitors
    async fn monitors(&self) -> Result<Vec<Monitor>, AppError>;

    /// Gets one page of the messages of a monitor
    async fn messages_page(
        &self,
        monitor_id: &str,
        page: PageRequest,
    ) -> Result<PagedSet<Message>, AppError>;

    /// Lazily lists every message of a monitor
    fn messages<'a>(&'a self, monitor_id: &'a str) -> BoxStream<'a, Result<Message, AppError>>;
}
