use serde::{Serialize, Deserialize};

/// The serialized workflow document submitted to the execution service.
/// This is an external contract; field names follow the service's JSON
/// shape, not this crate's conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    /// Fixed classification tag, e.g. "document-workflow".
    #[serde(rename = "type")]
    pub kind: String,
    pub stages: Vec<Stage>,
    pub transitions: Vec<Transition>,
}

/// One task node rendered into the definition. `order` is 1-based and
/// follows the graph's node insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub order: usize,
    pub required: bool,
    pub roles: Vec<String>,
    pub actions: Vec<StageAction>,
}

/// An outgoing edge as seen from its source stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageAction {
    pub id: String,
    pub label: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// One transition edge in the flat edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub from: String,
    pub to: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}
