/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 9/10/26
******************************************************************************/
use crate::error::AppError;
use crate::model::entity::EntityType;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

/// Field filter of a search query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchField {
    /// Index field name, e.g. `xip.security_descriptor`
    pub name: String,
    /// Accepted values
    pub values: Vec<String>,
}

/// Full text query against the content search index
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SearchQuery {
    /// Free text query; `%` matches everything
    pub query: String,
    /// Field filters combined with AND
    pub fields: Vec<SearchField>,
    /// Index fields returned for every hit
    pub metadata: Vec<String>,
}

impl SearchQuery {
    /// Query for the given text with no filters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Adds a field filter
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.fields.push(SearchField {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });
        self
    }

    /// Asks for an extra index field on every hit
    #[must_use]
    pub fn with_metadata(mut self, field: impl Into<String>) -> Self {
        self.metadata.push(field.into());
        self
    }

    /// Form fields for one page of this query
    #[must_use]
    pub fn to_form(&self, start: u64, max: u32) -> Vec<(String, String)> {
        let q = json!({
            "q": self.query,
            "fields": self.fields,
        });
        let mut form = vec![
            ("q".to_string(), q.to_string()),
            ("start".to_string(), start.to_string()),
            ("max".to_string(), max.to_string()),
        ];
        if !self.metadata.is_empty() {
            form.push(("metadata".to_string(), self.metadata.join(",")));
        }
        form
    }
}

/// One search result
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// Reference of the matching entity
    pub reference: String,
    /// Kind of the matching entity
    pub entity_type: EntityType,
    /// Requested index fields, by name
    pub metadata: HashMap<String, Value>,
}

/// `value` of a search response
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SearchResult {
    /// Total number of matches for the query
    #[serde(rename = "totalHits", default)]
    pub total_hits: u64,
    /// Object ids of this page, e.g. `sdb:IO|<ref>`
    #[serde(rename = "objectIds", default)]
    pub object_ids: Vec<String>,
    /// Index fields per hit, aligned with `object_ids`
    #[serde(default)]
    pub metadata: Vec<Vec<MetadataValue>>,
}

/// Name/value pair of a search hit
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct MetadataValue {
    /// Index field name
    pub name: String,
    /// Field value as returned by the index
    #[serde(default)]
    pub value: Value,
}

impl SearchResult {
    /// Pairs object ids with their metadata
    pub fn into_hits(self) -> Result<Vec<SearchHit>, AppError> {
        let mut metadata = self.metadata.into_iter();
        self.object_ids
            .into_iter()
            .map(|object_id| {
                let (entity_type, reference) = EntityType::parse_object_id(&object_id)?;
                let fields = metadata
                    .next()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|m| (m.name, m.value))
                    .collect();
                Ok(SearchHit {
                    reference,
                    entity_type,
                    metadata: fields,
                })
            })
            .collect()
    }
}

/// Size of a rendered thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThumbnailSize {
    /// Small icon
    Small,
    /// Medium preview
    #[default]
    Medium,
    /// Large preview
    Large,
}

impl ThumbnailSize {
    /// Value of the `size` query parameter
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailSize::Small => "small",
            ThumbnailSize::Medium => "medium",
            ThumbnailSize::Large => "large",
        }
    }
}
