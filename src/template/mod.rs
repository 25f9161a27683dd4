use crate::catalog::TaskCatalog;
use crate::graph::{
    NodeStatus, Position, TaskNode, TransitionEdge, ValidationReason, WorkflowGraph,
};
use anyhow::{Context as AnyhowContext, Result};
use serde::{Serialize, Deserialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A starter workflow: a pre-built node/edge list installed into a fresh
/// graph at the start of an authoring session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub nodes: Vec<TaskNode>,
    pub edges: Vec<TransitionEdge>,
}

/// One edge of a template that the connection rules would reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateViolation {
    pub edge_id: String,
    pub source: String,
    pub target: String,
    pub reason: ValidationReason,
}

impl WorkflowTemplate {
    /// The built-in document approval flow: upload, classify, review,
    /// approve, archive.
    pub fn document_approval() -> Self {
        let node = |id: &str, task_type: &str, label: &str, x: f64| TaskNode {
            id: id.to_string(),
            task_type: task_type.to_string(),
            label: label.to_string(),
            position: Position::new(x, 100.0),
            status: NodeStatus::Pending,
            requires_approval: task_type == "APPROVE_DOCUMENT",
            allowed_roles: Vec::new(),
            time_limit_hours: None,
        };
        let edge = |id: &str, source: &str, target: &str, label: &str| TransitionEdge {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
            condition: None,
            require_comment: false,
        };

        Self {
            name: "Document Approval".to_string(),
            description: "Standard intake, review and approval flow".to_string(),
            nodes: vec![
                node("upload", "UPLOAD_DOCUMENT", "Upload Document", 0.0),
                node("classify", "CLASSIFY_DOCUMENT", "Classify Document", 200.0),
                node("review", "MANUAL_REVIEW", "Manual Review", 400.0),
                node("approve", "APPROVE_DOCUMENT", "Approve Document", 600.0),
                node("archive", "ARCHIVE_DOCUMENT", "Archive Document", 800.0),
            ],
            edges: vec![
                edge("e_upload_classify", "upload", "classify", "Proceed"),
                edge("e_classify_review", "classify", "review", "Proceed"),
                edge("e_review_approve", "review", "approve", "Send for approval"),
                TransitionEdge {
                    require_comment: true,
                    ..edge("e_approve_archive", "approve", "archive", "Approve")
                },
            ],
        }
    }

    /// Install this template into a graph, replacing its contents and
    /// metadata. Template contents are trusted; no rule replay happens here.
    pub fn install(&self, graph: &mut WorkflowGraph) {
        graph.name = self.name.clone();
        graph.description = self.description.clone();
        graph.load_template(self.nodes.clone(), self.edges.clone());
    }

    /// Replay every template edge through the same connection rules that
    /// govern user-drawn edges. Built-in templates pass by construction;
    /// file-sourced templates should be checked before `install`.
    pub fn validate_against(&self, catalog: Arc<TaskCatalog>) -> Vec<TemplateViolation> {
        let mut scratch = WorkflowGraph::new(catalog);
        scratch.load_template(self.nodes.clone(), Vec::new());

        let mut violations = Vec::new();
        for edge in &self.edges {
            if let Err(err) = scratch.add_edge(
                &edge.source,
                &edge.target,
                Some(&edge.label),
                edge.condition.as_deref(),
            ) {
                let reason = match err {
                    crate::graph::GraphError::Validation(reason) => reason,
                    // add_edge only raises validation errors
                    _ => ValidationReason::NodeNotFound,
                };
                violations.push(TemplateViolation {
                    edge_id: edge.id.clone(),
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    reason,
                });
            }
        }
        violations
    }
}

/// Load a template from a YAML file.
pub fn load_template_from_yaml(path: &Path) -> Result<WorkflowTemplate> {
    let yaml_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file {}", path.display()))?;

    let template: WorkflowTemplate = serde_yaml::from_str(&yaml_content)
        .with_context(|| format!("Failed to deserialize template from {}", path.display()))?;

    Ok(template)
}
