use crate::definition::{Stage, StageAction, Transition, WorkflowDefinition};
use crate::graph::{TransitionEdge, WorkflowGraph};
use std::collections::HashMap;
use uuid::Uuid;

/// Roles assigned to a stage when its node has none.
const DEFAULT_ROLES: [&str; 1] = ["Admin"];

/// Translates a [`WorkflowGraph`] into the [`WorkflowDefinition`] document.
///
/// Stages are emitted in node insertion order with a 1-based `order` index;
/// each stage's actions follow edge insertion order among that node's
/// outgoing edges. Deterministic apart from the fresh top-level id, which
/// lives in its own `workflow_` namespace so it can never collide with a
/// stage or transition id.
#[derive(Debug, Clone)]
pub struct Exporter {
    pub version: String,
    pub kind: String,
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            kind: "document-workflow".to_string(),
        }
    }
}

impl Exporter {
    pub fn new(version: &str, kind: &str) -> Self {
        Self {
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn export(&self, graph: &WorkflowGraph) -> WorkflowDefinition {
        // Outgoing-edge adjacency, keyed by source node id.
        let mut outgoing: HashMap<&str, Vec<&TransitionEdge>> = HashMap::new();
        for edge in graph.edges() {
            outgoing.entry(edge.source.as_str()).or_default().push(edge);
        }

        let stages = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(idx, node)| {
                let actions = outgoing
                    .get(node.id.as_str())
                    .map(|edges| edges.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .map(|edge| StageAction {
                        id: edge.id.clone(),
                        label: edge.label.clone(),
                        target: edge.target.clone(),
                        condition: edge.condition.clone(),
                    })
                    .collect();
                let roles = if node.allowed_roles.is_empty() {
                    DEFAULT_ROLES.iter().map(|r| r.to_string()).collect()
                } else {
                    node.allowed_roles.clone()
                };
                Stage {
                    id: node.id.clone(),
                    name: node.label.clone(),
                    task_type: node.task_type.clone(),
                    order: idx + 1,
                    required: true,
                    roles,
                    actions,
                }
            })
            .collect();

        let transitions = graph
            .edges()
            .iter()
            .map(|edge| Transition {
                id: edge.id.clone(),
                from: edge.source.clone(),
                to: edge.target.clone(),
                label: edge.label.clone(),
                condition: edge.condition.clone(),
            })
            .collect();

        WorkflowDefinition {
            id: new_definition_id(),
            name: graph.name.clone(),
            description: graph.description.clone(),
            version: self.version.clone(),
            kind: self.kind.clone(),
            stages,
            transitions,
        }
    }
}

fn new_definition_id() -> String {
    format!("workflow_{}", Uuid::new_v4().simple())
}
