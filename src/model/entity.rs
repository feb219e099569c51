/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 8/10/26
******************************************************************************/
use crate::error::AppError;
use crate::model::xml::XmlNode;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of repository object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Folder (structural object)
    #[serde(rename = "SO")]
    Folder,
    /// Asset (information object)
    #[serde(rename = "IO")]
    Asset,
    /// Content object
    #[serde(rename = "CO")]
    ContentObject,
}

impl EntityType {
    /// Two-letter code used in object ids and child listings
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            EntityType::Folder => "SO",
            EntityType::Asset => "IO",
            EntityType::ContentObject => "CO",
        }
    }

    /// Path segment of the entity API
    #[must_use]
    pub fn path_segment(&self) -> &'static str {
        match self {
            EntityType::Folder => "structural-objects",
            EntityType::Asset => "information-objects",
            EntityType::ContentObject => "content-objects",
        }
    }

    /// Element name of the object inside an entity response
    #[must_use]
    pub fn element_name(&self) -> &'static str {
        match self {
            EntityType::Folder => "StructuralObject",
            EntityType::Asset => "InformationObject",
            EntityType::ContentObject => "ContentObject",
        }
    }

    /// Object id used by the content API, e.g. `sdb:IO|<ref>`
    #[must_use]
    pub fn object_id(&self, reference: &str) -> String {
        format!("sdb:{}|{}", self.code(), reference)
    }

    /// Splits an object id such as `sdb:SO|<ref>` into type and reference
    pub fn parse_object_id(object_id: &str) -> Result<(EntityType, String), AppError> {
        let rest = object_id.strip_prefix("sdb:").unwrap_or(object_id);
        let (code, reference) = rest
            .split_once('|')
            .ok_or_else(|| AppError::Deserialization(format!("bad object id '{object_id}'")))?;
        Ok((code.parse()?, reference.to_string()))
    }
}

impl FromStr for EntityType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SO" | "STRUCTURALOBJECT" | "FOLDER" => Ok(EntityType::Folder),
            "IO" | "INFORMATIONOBJECT" | "ASSET" => Ok(EntityType::Asset),
            "CO" | "CONTENTOBJECT" => Ok(EntityType::ContentObject),
            other => Err(AppError::Deserialization(format!(
                "unknown entity type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A repository object as returned by the entity API
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    /// Stable reference of the object
    pub reference: String,
    /// Kind of object
    pub entity_type: EntityType,
    /// Title
    pub title: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Security tag controlling access
    pub security_tag: Option<String>,
    /// Reference of the parent folder; None for top level folders
    pub parent: Option<String>,
}

impl Entity {
    /// Reads an entity from an `EntityResponse` document
    pub fn from_xml(doc: &XmlNode, entity_type: EntityType) -> Result<Self, AppError> {
        let node = if doc.name == entity_type.element_name() {
            doc
        } else {
            doc.descendant(entity_type.element_name()).ok_or_else(|| {
                AppError::Deserialization(format!(
                    "response has no {} element",
                    entity_type.element_name()
                ))
            })?
        };

        let reference = node
            .text_of("Ref")
            .ok_or_else(|| AppError::Deserialization("entity has no Ref".to_string()))?
            .to_string();
        let field = |name: &str| node.text_of(name).map(str::to_string);

        Ok(Self {
            reference,
            entity_type,
            title: field("Title"),
            description: field("Description"),
            security_tag: field("SecurityTag"),
            parent: field("Parent"),
        })
    }
}

/// Child entry of a folder listing
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntityRef {
    /// Stable reference of the child
    pub reference: String,
    /// Kind of child
    pub entity_type: EntityType,
    /// Title of the child
    pub title: Option<String>,
}

impl EntityRef {
    /// Reads a `<Child ref=".." type=".." title="..">` element
    pub fn from_child(node: &XmlNode) -> Result<Self, AppError> {
        let reference = node
            .attr("ref")
            .ok_or_else(|| AppError::Deserialization("child has no ref".to_string()))?
            .to_string();
        let entity_type = node
            .attr("type")
            .ok_or_else(|| AppError::Deserialization("child has no type".to_string()))?
            .parse()?;
        Ok(Self {
            reference,
            entity_type,
            title: node.attr("title").map(str::to_string),
        })
    }
}

/// State of a long-running server operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationState {
    /// Still running
    Active,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Any status this client does not know
    Other(String),
}

impl OperationState {
    /// True once the operation will make no further progress
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, OperationState::Completed | OperationState::Failed)
    }
}

impl From<&str> for OperationState {
    fn from(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "ACTIVE" | "RUNNING" | "PENDING" => OperationState::Active,
            "COMPLETED" | "FINISHED" => OperationState::Completed,
            "FAILED" | "ERROR" => OperationState::Failed,
            _ => OperationState::Other(value.trim().to_string()),
        }
    }
}

/// Progress of an asynchronous operation polled by its progress token
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressStatus {
    /// Current state
    pub state: OperationState,
    /// Completion percentage, when reported
    pub percentage: Option<u8>,
    /// Seconds since the operation started, when reported
    pub seconds_elapsed: Option<u64>,
    /// Human readable status message
    pub message: Option<String>,
}

impl ProgressStatus {
    /// Reads a `ProgressResponse` document
    pub fn from_xml(doc: &XmlNode) -> Result<Self, AppError> {
        let state = doc
            .text_of("Status")
            .ok_or_else(|| AppError::Deserialization("progress has no Status".to_string()))?;
        Ok(Self {
            state: OperationState::from(state),
            percentage: doc.text_of("Percentage").and_then(|p| p.trim().parse().ok()),
            seconds_elapsed: doc
                .text_of("SecondsElapsed")
                .and_then(|s| s.trim().parse().ok()),
            message: doc.text_of("Message").map(str::to_string),
        })
    }
}
