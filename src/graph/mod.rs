pub mod error;
pub mod model;

pub use error::{GraphError, ValidationReason};
pub use model::WorkflowGraph;

use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// 2D canvas coordinate of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Grid snapping configuration. When enabled, stored node positions are
/// rounded to the nearest multiple of `cell_size` (on add and on move).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub enabled: bool,
    pub cell_size: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self { enabled: true, cell_size: 20.0 }
    }
}

impl GridSettings {
    pub fn snap(&self, position: Position) -> Position {
        if !self.enabled || self.cell_size <= 0.0 {
            return position;
        }
        Position {
            x: (position.x / self.cell_size).round() * self.cell_size,
            y: (position.y / self.cell_size).round() * self.cell_size,
        }
    }
}

/// Descriptive node state for the UI. Has no effect on validation or
/// serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    #[default]
    Pending,
    Active,
    Error,
}

/// One task step placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
    pub id: String,
    pub task_type: String,
    pub label: String,
    pub position: Position,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub requires_approval: bool,
    #[serde(default)]
    pub allowed_roles: Vec<String>,
    #[serde(default)]
    pub time_limit_hours: Option<u32>,
}

/// A directed transition between two task nodes. `condition` is an opaque
/// expression string carried through to serialization, never evaluated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub require_comment: bool,
}

/// Default action label for freshly drawn edges.
pub const DEFAULT_EDGE_LABEL: &str = "Proceed";

/// Partial update for a node. `None` fields are left untouched;
/// `time_limit_hours` is doubly optional so a patch can clear the limit.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub label: Option<String>,
    pub task_type: Option<String>,
    pub requires_approval: Option<bool>,
    pub allowed_roles: Option<Vec<String>>,
    pub time_limit_hours: Option<Option<u32>>,
}

/// Partial update for an edge. Connection rules are not re-checked here,
/// only at edge creation.
#[derive(Debug, Clone, Default)]
pub struct EdgePatch {
    pub label: Option<String>,
    pub condition: Option<Option<String>>,
    pub require_comment: Option<bool>,
}

pub(crate) fn new_node_id() -> String {
    format!("node_{}", Uuid::new_v4().simple())
}

pub(crate) fn new_edge_id() -> String {
    format!("edge_{}", Uuid::new_v4().simple())
}

/// Fallback display name for task types absent from the catalog:
/// "SIGN_AND_SEAL" becomes "Sign And Seal".
pub(crate) fn display_label(task_type: &str) -> String {
    task_type
        .split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
