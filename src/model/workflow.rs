use crate::error::AppError;
use crate::model::xml::XmlNode;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};

/// Filters of the workflow instance listing; unset filters are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowQuery {
    /// Instance state, e.g. `Active` or `Failed`
    pub state: Option<String>,
    /// Workflow type, e.g. `Ingest`
    pub workflow_type: Option<String>,
    /// Workflow context (definition) the instances belong to
    pub context_id: Option<String>,
    /// User that started the instances
    pub creator: Option<String>,
}

impl WorkflowQuery {
    /// Query matching every instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn workflow_type(mut self, workflow_type: impl Into<String>) -> Self {
        self.workflow_type = Some(workflow_type.into());
        self
    }

    #[must_use]
    pub fn context_id(mut self, context_id: impl Into<String>) -> Self {
        self.context_id = Some(context_id.into());
        self
    }

    #[must_use]
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Query parameters for the filters that are set
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        [
            ("state", &self.state),
            ("type", &self.workflow_type),
            ("contextId", &self.context_id),
            ("creator", &self.creator),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }
}

/// A running or finished workflow
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowInstance {
    /// Instance identifier
    pub id: String,
    /// Context (definition) the instance runs
    pub context_id: Option<String>,
    /// Name of that context
    pub context_name: Option<String>,
    /// Machine state, e.g. `Active`
    pub state: Option<String>,
    /// State as shown to users
    pub display_state: Option<String>,
    /// User that started the instance
    pub creator: Option<String>,
    /// Start timestamp as sent by the server
    pub started: Option<String>,
    /// Finish timestamp, absent while running
    pub finished: Option<String>,
}

impl WorkflowInstance {
    /// Reads one `WorkflowInstance` element
    pub fn from_xml(node: &XmlNode) -> Result<Self, AppError> {
        let id = node
            .attr("id")
            .or_else(|| node.text_of("Id"))
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Deserialization("workflow instance has no id".to_string()))?;
        let field = |name: &str| node.text_of(name).map(str::to_string);

        Ok(Self {
            id,
            context_id: field("WorkflowContextId"),
            context_name: field("WorkflowContextName"),
            state: field("State"),
            display_state: field("DisplayState"),
            creator: field("Creator"),
            started: field("StartedDate"),
            finished: field("FinishedDate"),
        })
    }

    /// Reads every instance of a listing response
    pub fn list_from_xml(doc: &XmlNode) -> Result<Vec<Self>, AppError> {
        let list = if doc.name == "WorkflowInstances" {
            Some(doc)
        } else {
            doc.descendant("WorkflowInstances")
        };
        match list {
            Some(list) => list
                .children_named("WorkflowInstance")
                .map(Self::from_xml)
                .collect(),
            None => Ok(Vec::new()),
        }
    }
}
