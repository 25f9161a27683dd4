use crate::catalog::TaskCatalog;
use crate::definition::WorkflowDefinition;
use crate::export::Exporter;
use crate::graph::error::{GraphError, ValidationReason};
use crate::graph::{
    DEFAULT_EDGE_LABEL, EdgePatch, GridSettings, NodePatch, NodeStatus, Position, TaskNode,
    TransitionEdge, display_label, new_edge_id, new_node_id,
};
use std::sync::Arc;

/// The authoritative in-memory workflow graph for one authoring session.
///
/// Owns its nodes and edges in insertion order, enforces the structural
/// invariants on every mutation (no dangling edges, no self-loops, no
/// duplicate parallel edges, no back-to-back approval steps), and serializes
/// into a [`WorkflowDefinition`] on demand. All operations are synchronous
/// and either fully apply or fully reject.
#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    pub name: String,
    pub description: String,
    catalog: Arc<TaskCatalog>,
    grid: GridSettings,
    nodes: Vec<TaskNode>,
    edges: Vec<TransitionEdge>,
}

impl WorkflowGraph {
    pub fn new(catalog: Arc<TaskCatalog>) -> Self {
        Self {
            name: "Untitled Workflow".to_string(),
            description: String::new(),
            catalog,
            grid: GridSettings::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn set_grid(&mut self, grid: GridSettings) {
        self.grid = grid;
    }

    pub fn grid(&self) -> GridSettings {
        self.grid
    }

    pub fn catalog(&self) -> &Arc<TaskCatalog> {
        &self.catalog
    }

    pub fn nodes(&self) -> &[TaskNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[TransitionEdge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&TaskNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&TransitionEdge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }

    fn node_index(&self, node_id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == node_id)
    }

    /// Place a new task node. Display defaults come from the catalog; an
    /// unknown `task_type` is not an error, the node just gets a label
    /// derived from the raw identifier. Always succeeds.
    pub fn add_node(&mut self, task_type: &str, position: Position) -> TaskNode {
        let position = self.grid.snap(position);
        let (label, requires_approval) = match self.catalog.get(task_type) {
            Some(cfg) => (cfg.name.clone(), cfg.requires_approval),
            None => (display_label(task_type), false),
        };
        let node = TaskNode {
            id: new_node_id(),
            task_type: task_type.to_string(),
            label,
            position,
            status: NodeStatus::Pending,
            requires_approval,
            allowed_roles: Vec::new(),
            time_limit_hours: None,
        };
        self.nodes.push(node.clone());
        node
    }

    /// Reposition a node, applying the same grid snapping as `add_node`.
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<(), GraphError> {
        let position = self.grid.snap(position);
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        node.position = position;
        Ok(())
    }

    /// Apply a partial update. Changing `task_type` re-derives the label and
    /// approval default from the catalog first; explicit fields in the same
    /// patch then override the re-derived values.
    pub fn update_node(&mut self, node_id: &str, patch: NodePatch) -> Result<(), GraphError> {
        let idx = self
            .node_index(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;

        if let Some(task_type) = patch.task_type {
            let (label, requires_approval) = match self.catalog.get(&task_type) {
                Some(cfg) => (cfg.name.clone(), cfg.requires_approval),
                None => (display_label(&task_type), false),
            };
            let node = &mut self.nodes[idx];
            node.task_type = task_type;
            node.label = label;
            node.requires_approval = requires_approval;
        }

        let node = &mut self.nodes[idx];
        if let Some(label) = patch.label {
            node.label = label;
        }
        if let Some(requires_approval) = patch.requires_approval {
            node.requires_approval = requires_approval;
        }
        if let Some(allowed_roles) = patch.allowed_roles {
            node.allowed_roles = allowed_roles;
        }
        if let Some(time_limit_hours) = patch.time_limit_hours {
            node.time_limit_hours = time_limit_hours;
        }
        Ok(())
    }

    /// Remove a node and every edge incident to it. Dangling edges are never
    /// left behind.
    pub fn remove_node(&mut self, node_id: &str) -> Result<(), GraphError> {
        let idx = self
            .node_index(node_id)
            .ok_or_else(|| GraphError::NodeNotFound(node_id.to_string()))?;
        self.nodes.remove(idx);
        self.edges.retain(|e| e.source != node_id && e.target != node_id);
        Ok(())
    }

    /// Draw a new transition edge. Connection rules are checked in order;
    /// the first violation is reported and nothing is modified:
    /// 1. both endpoints must exist,
    /// 2. no self-loops,
    /// 3. no duplicate (source, target) pairs,
    /// 4. no edge between two approval-category tasks.
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        label: Option<&str>,
        condition: Option<&str>,
    ) -> Result<TransitionEdge, GraphError> {
        let source_node = self.node(source);
        let target_node = self.node(target);
        let (Some(source_node), Some(target_node)) = (source_node, target_node) else {
            return Err(ValidationReason::NodeNotFound.into());
        };
        if source == target {
            return Err(ValidationReason::SelfLoop.into());
        }
        if self.edges.iter().any(|e| e.source == source && e.target == target) {
            return Err(ValidationReason::DuplicateEdge.into());
        }
        if self.catalog.is_approval(&source_node.task_type)
            && self.catalog.is_approval(&target_node.task_type)
        {
            return Err(ValidationReason::IllegalApprovalChain.into());
        }

        let edge = TransitionEdge {
            id: new_edge_id(),
            source: source.to_string(),
            target: target.to_string(),
            label: label.unwrap_or(DEFAULT_EDGE_LABEL).to_string(),
            condition: condition.map(str::to_string),
            require_comment: false,
        };
        self.edges.push(edge.clone());
        Ok(edge)
    }

    /// Patch an edge's label, condition or comment flag. The connection
    /// rules only apply at creation and are not re-run here.
    pub fn update_edge(&mut self, edge_id: &str, patch: EdgePatch) -> Result<(), GraphError> {
        let edge = self
            .edges
            .iter_mut()
            .find(|e| e.id == edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        if let Some(label) = patch.label {
            edge.label = label;
        }
        if let Some(condition) = patch.condition {
            edge.condition = condition;
        }
        if let Some(require_comment) = patch.require_comment {
            edge.require_comment = require_comment;
        }
        Ok(())
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<(), GraphError> {
        let idx = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| GraphError::EdgeNotFound(edge_id.to_string()))?;
        self.edges.remove(idx);
        Ok(())
    }

    /// Replace the entire graph contents with a template's node and edge
    /// lists. Templates are trusted as pre-validated; the `add_edge` rules
    /// are not replayed here (see `WorkflowTemplate::validate_against` for
    /// untrusted sources).
    pub fn load_template(&mut self, nodes: Vec<TaskNode>, edges: Vec<TransitionEdge>) {
        self.nodes = nodes;
        self.edges = edges;
    }

    /// Serialize the current graph into the definition document the
    /// execution service consumes. Pure apart from the freshly generated
    /// top-level id.
    pub fn serialize(&self) -> WorkflowDefinition {
        Exporter::default().export(self)
    }
}
