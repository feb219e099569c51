use crate::application::client::Client;
use crate::application::interfaces::monitor::MonitorService;
use crate::error::AppError;
use crate::model::monitor::{Message, MessagePage, Monitor, MonitorList};
use crate::model::paging::{PageRequest, PagedSet, paginate};
use crate::model::requests::{ApiRequest, ResponseFormat};
use crate::model::responses::Envelope;
use async_trait::async_trait;
use futures::stream::BoxStream;
use tracing::debug;

#[async_trait]
impl MonitorService for Client {
    async fn monitors(&self) -> Result<Vec<Monitor>, AppError> {
        let request = ApiRequest::get("api/processmonitor/monitors").accept(ResponseFormat::Json);
        let envelope: Envelope<MonitorList> = self.http_client().json(&request).await?;
        let monitors = envelope.into_value()?.monitors;
        debug!("Monitors obtained: {}", monitors.len());
        Ok(monitors)
    }

    async fn messages_page(
        &self,
        monitor_id: &str,
        page: PageRequest,
    ) -> Result<PagedSet<Message>, AppError> {
        let request = match page.cursor {
            Some(next) => ApiRequest::get(next),
            None => ApiRequest::get("api/processmonitor/messages")
                .query("monitor", monitor_id)
                .query("start", 0)
                .query("max", page.page_size),
        }
        .accept(ResponseFormat::Json)
        .for_reference(monitor_id);

        let envelope: Envelope<MessagePage> = self.http_client().json(&request).await?;
        let value = envelope.into_value()?;
        let next = value.paging.next.filter(|n| !n.is_empty());

        debug!(
            "Messages page obtained: {} of {}",
            value.messages.len(),
            value.paging.total_results
        );
        Ok(PagedSet::new(value.messages, value.paging.total_results, next))
    }

    fn messages<'a>(&'a self, monitor_id: &'a str) -> BoxStream<'a, Result<Message, AppError>> {
        paginate(self.page_size(), move |page| self.messages_page(monitor_id, page))
    }
}
