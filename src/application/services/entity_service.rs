use crate::application::client::Client;
use crate::application::interfaces::entity::EntityService;
use crate::error::AppError;
use crate::model::entity::{Entity, EntityRef, EntityType, ProgressStatus};
use crate::model::paging::{PageRequest, PagedSet, paginate};
use crate::model::requests::{ApiRequest, Payload, ResponseFormat};
use async_trait::async_trait;
use futures::stream::BoxStream;
use tracing::{debug, info};

#[async_trait]
impl EntityService for Client {
    async fn get_entity(
        &self,
        entity_type: EntityType,
        reference: &str,
    ) -> Result<Entity, AppError> {
        let path = format!("api/entity/{}/{}", entity_type.path_segment(), reference);
        info!("Getting entity: {} {}", entity_type, reference);

        let request = ApiRequest::get(path)
            .accept(ResponseFormat::Xml)
            .for_reference(reference);
        let doc = self.http_client().xml(&request).await?;
        let entity = Entity::from_xml(&doc, entity_type)?;

        debug!("Entity obtained: {}", entity);
        Ok(entity)
    }

    async fn children_page(
        &self,
        folder: Option<&str>,
        page: PageRequest,
    ) -> Result<PagedSet<EntityRef>, AppError> {
        let request = match page.cursor {
            Some(next) => ApiRequest::get(next),
            None => {
                let path = match folder {
                    Some(folder) => format!("api/entity/structural-objects/{folder}/children"),
                    None => "api/entity/root/children".to_string(),
                };
                ApiRequest::get(path)
                    .query("start", 0)
                    .query("max", page.page_size)
            }
        }
        .accept(ResponseFormat::Xml)
        .for_reference(folder.unwrap_or("root"));

        let doc = self.http_client().xml(&request).await?;

        let results = match doc.child("Children") {
            Some(children) => children
                .children_named("Child")
                .map(EntityRef::from_child)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        let total = match doc.text_of("Paging/TotalResults") {
            Some(total) => total.trim().parse::<u64>().map_err(|e| {
                AppError::Deserialization(format!("bad TotalResults '{total}': {e}"))
            })?,
            None => results.len() as u64,
        };
        let next = doc.text_of("Paging/Next").map(|n| n.trim().to_string());

        debug!(
            "Children page obtained: {} of {} (more: {})",
            results.len(),
            total,
            next.is_some()
        );
        Ok(PagedSet::new(results, total, next))
    }

    fn children<'a>(
        &'a self,
        folder: Option<&'a str>,
    ) -> BoxStream<'a, Result<EntityRef, AppError>> {
        paginate(self.page_size(), move |page| self.children_page(folder, page))
    }

    async fn change_security_tag(
        &self,
        entity_type: EntityType,
        reference: &str,
        tag: &str,
        include_descendants: bool,
    ) -> Result<String, AppError> {
        if tag.trim().is_empty() {
            return Err(AppError::InvalidInput("security tag is empty".to_string()));
        }
        let path = format!(
            "api/entity/{}/{}/security-descriptor",
            entity_type.path_segment(),
            reference
        );
        info!("Changing security tag of {} {} to {}", entity_type, reference, tag);

        let request = ApiRequest::put(path)
            .query("includeDescendants", include_descendants)
            .payload(Payload::Text(tag.to_string()))
            .accept(ResponseFormat::Text)
            .for_reference(reference);
        let token = self.http_client().text(&request).await?.trim().to_string();
        if token.is_empty() {
            return Err(AppError::Deserialization(
                "server returned no progress token".to_string(),
            ));
        }

        debug!("Security tag change started, progress token: {}", token);
        Ok(token)
    }

    async fn get_async_progress(&self, progress_token: &str) -> Result<ProgressStatus, AppError> {
        let request = ApiRequest::get(format!("api/entity/progress/{progress_token}"))
            .accept(ResponseFormat::Xml)
            .for_reference(progress_token);
        let doc = self.http_client().xml(&request).await?;
        ProgressStatus::from_xml(&doc)
    }
}
