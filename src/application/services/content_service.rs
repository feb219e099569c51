use crate::application::client::Client;
use crate::application::interfaces::content::ContentService;
use crate::error::AppError;
use crate::model::content::{SearchHit, SearchQuery, SearchResult, ThumbnailSize};
use crate::model::entity::EntityType;
use crate::model::paging::{PageRequest, PagedSet, paginate};
use crate::model::requests::{ApiRequest, Payload, ResponseFormat};
use crate::model::responses::Envelope;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::path::Path;
use tracing::{debug, info};

#[async_trait]
impl ContentService for Client {
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: PageRequest,
    ) -> Result<PagedSet<SearchHit>, AppError> {
        // the cursor is the offset of the next hit
        let start = match page.cursor.as_deref() {
            Some(cursor) => cursor.parse::<u64>().map_err(|_| {
                AppError::InvalidInput(format!("bad search cursor '{cursor}'"))
            })?,
            None => 0,
        };
        info!("Searching '{}' from {}", query.query, start);

        let request = ApiRequest::post("api/content/search")
            .payload(Payload::Form(query.to_form(start, page.page_size)))
            .accept(ResponseFormat::Json);
        let envelope: Envelope<SearchResult> = self.http_client().json(&request).await?;
        let result = envelope.into_value()?;

        let total = result.total_hits;
        let hits = result.into_hits()?;
        let end = start + hits.len() as u64;
        let next = (!hits.is_empty() && end < total).then(|| end.to_string());

        debug!("Search page obtained: {} hits of {}", hits.len(), total);
        Ok(PagedSet::new(hits, total, next))
    }

    fn search<'a>(&'a self, query: &'a SearchQuery) -> BoxStream<'a, Result<SearchHit, AppError>> {
        paginate(self.page_size(), move |page| self.search_page(query, page))
    }

    async fn thumbnail(
        &self,
        entity_type: EntityType,
        reference: &str,
        size: ThumbnailSize,
    ) -> Result<Vec<u8>, AppError> {
        let request = ApiRequest::get("api/content/thumbnail")
            .query("id", entity_type.object_id(reference))
            .query("size", size.as_str())
            .accept(ResponseFormat::Binary)
            .for_reference(reference);
        let bytes = self.http_client().bytes(&request).await?;
        debug!("Thumbnail of {} obtained: {} bytes", reference, bytes.len());
        Ok(bytes)
    }

    async fn download(
        &self,
        entity_type: EntityType,
        reference: &str,
        path: &Path,
    ) -> Result<u64, AppError> {
        info!("Downloading {} to {}", reference, path.display());
        let request = ApiRequest::get("api/content/download")
            .query("id", entity_type.object_id(reference))
            .accept(ResponseFormat::Binary)
            .for_reference(reference);
        self.http_client().download(&request, path).await
    }
}
