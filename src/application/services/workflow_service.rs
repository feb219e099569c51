use crate::application::client::Client;
use crate::application::interfaces::workflow::WorkflowService;
use crate::error::AppError;
use crate::model::paging::{PageRequest, PagedSet, paginate};
use crate::model::requests::{ApiRequest, ResponseFormat};
use crate::model::workflow::{WorkflowInstance, WorkflowQuery};
use crate::model::xml::XmlNode;
use async_trait::async_trait;
use futures::stream::BoxStream;
use tracing::debug;

const INSTANCES_PATH: &str = "sdb/rest/workflow/instances";

#[async_trait]
impl WorkflowService for Client {
    async fn workflow_instance(&self, id: &str) -> Result<WorkflowInstance, AppError> {
        let request = ApiRequest::get(format!("{INSTANCES_PATH}/{id}"))
            .accept(ResponseFormat::Xml)
            .for_reference(id);
        let doc = self.http_client().xml(&request).await?;
        let node = if doc.name == "WorkflowInstance" {
            &doc
        } else {
            doc.descendant("WorkflowInstance").ok_or_else(|| {
                AppError::Deserialization("response has no WorkflowInstance".to_string())
            })?
        };
        WorkflowInstance::from_xml(node)
    }

    async fn instances_page(
        &self,
        query: &WorkflowQuery,
        page: PageRequest,
    ) -> Result<PagedSet<WorkflowInstance>, AppError> {
        let start = match page.cursor.as_deref() {
            Some(cursor) => cursor.parse::<u64>().map_err(|_| {
                AppError::InvalidInput(format!("bad workflow cursor '{cursor}'"))
            })?,
            None => 0,
        };

        let mut request = ApiRequest::get(INSTANCES_PATH);
        for (key, value) in query.params() {
            request = request.query(key, value);
        }
        let request = request
            .query("start", start)
            .query("max", page.page_size)
            .accept(ResponseFormat::Xml)
            .for_reference("workflow instances");

        let doc = self.http_client().xml(&request).await?;
        let instances = WorkflowInstance::list_from_xml(&doc)?;
        let (total, next) = window(&doc, start, page.page_size, instances.len())?;

        debug!(
            "Workflow instances page obtained: {} from {} (more: {})",
            instances.len(),
            start,
            next.is_some()
        );
        Ok(PagedSet::new(instances, total, next))
    }

    fn instances<'a>(
        &'a self,
        query: &'a WorkflowQuery,
    ) -> BoxStream<'a, Result<WorkflowInstance, AppError>> {
        paginate(self.page_size(), move |page| self.instances_page(query, page))
    }
}

/// Total and next offset of a workflow page
///
/// Older servers send no `TotalResults`; there a full page means more may
/// follow and the total is a lower bound until a short page arrives.
fn window(
    doc: &XmlNode,
    start: u64,
    page_size: u32,
    count: usize,
) -> Result<(u64, Option<String>), AppError> {
    let end = start + count as u64;
    let reported = match doc.descendant("TotalResults") {
        Some(total) => Some(total.text.trim().parse::<u64>().map_err(|e| {
            AppError::Deserialization(format!("bad TotalResults '{}': {e}", total.text))
        })?),
        None => None,
    };

    Ok(match reported {
        Some(total) => (total, (count > 0 && end < total).then(|| end.to_string())),
        None if count > 0 && count as u64 >= u64::from(page_size) => {
            (end + 1, Some(end.to_string()))
        }
        None => (end, None),
    })
}
