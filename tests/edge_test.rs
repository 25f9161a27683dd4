use docflow::catalog::TaskCatalog;
use docflow::graph::{EdgePatch, GraphError, Position, ValidationReason, WorkflowGraph};
use std::collections::HashSet;
use std::sync::Arc;

fn new_graph() -> WorkflowGraph {
    WorkflowGraph::new(Arc::new(TaskCatalog::builtin()))
}

#[test]
fn test_add_edge_defaults() {
    let mut graph = new_graph();
    let a = graph.add_node("UPLOAD_DOCUMENT", Position::new(0.0, 0.0));
    let b = graph.add_node("MANUAL_REVIEW", Position::new(200.0, 0.0));

    let edge = graph.add_edge(&a.id, &b.id, None, None).expect("Edge failed");
    assert_eq!(edge.label, "Proceed");
    assert_eq!(edge.condition, None);
    assert!(!edge.require_comment);
    assert_eq!(edge.source, a.id);
    assert_eq!(edge.target, b.id);
}

#[test]
fn test_edge_ids_are_unique() {
    let mut graph = new_graph();
    let hub = graph.add_node("UPLOAD_DOCUMENT", Position::new(0.0, 0.0));
    let mut ids = HashSet::new();
    for i in 0..20 {
        let n = graph.add_node("MANUAL_REVIEW", Position::new(200.0, i as f64 * 20.0));
        let edge = graph.add_edge(&hub.id, &n.id, None, None).expect("Edge failed");
        assert!(ids.insert(edge.id.clone()), "Duplicate edge id: {}", edge.id);
    }
}

#[test]
fn test_missing_endpoint_is_checked_first() {
    let mut graph = new_graph();
    let a = graph.add_node("UPLOAD_DOCUMENT", Position::new(0.0, 0.0));

    let result = graph.add_edge(&a.id, "node_ghost", None, None);
    assert_eq!(result, Err(GraphError::Validation(ValidationReason::NodeNotFound)));

    // Even a would-be self-loop reports the missing node first
    let result = graph.add_edge("node_ghost", "node_ghost", None, None);
    assert_eq!(result, Err(GraphError::Validation(ValidationReason::NodeNotFound)));
    assert!(graph.edges().is_empty());
}

#[test]
fn test_self_loop_rejected() {
    let mut graph = new_graph();
    let a = graph.add_node("UPLOAD_DOCUMENT", Position::new(0.0, 0.0));

    let result = graph.add_edge(&a.id, &a.id, None, None);
    assert_eq!(result, Err(GraphError::Validation(ValidationReason::SelfLoop)));
    assert!(graph.edges().is_empty());
}

#[test]
fn test_duplicate_parallel_edge_rejected() {
    let mut graph = new_graph();
    let a = graph.add_node("UPLOAD_DOCUMENT", Position::new(0.0, 0.0));
    let b = graph.add_node("MANUAL_REVIEW", Position::new(200.0, 0.0));

    graph.add_edge(&a.id, &b.id, None, None).expect("First edge failed");
    let result = graph.add_edge(&a.id, &b.id, Some("Again"), None);
    assert_eq!(result, Err(GraphError::Validation(ValidationReason::DuplicateEdge)));
    assert_eq!(graph.edges().len(), 1);

    // The reverse direction is a different ordered pair and stays legal
    graph.add_edge(&b.id, &a.id, Some("Send back"), None).expect("Reverse edge failed");
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn test_back_to_back_approval_rejected() {
    let mut graph = new_graph();
    let first = graph.add_node("APPROVE_DOCUMENT", Position::new(0.0, 0.0));
    let second = graph.add_node("LEGAL_APPROVAL", Position::new(200.0, 0.0));

    let result = graph.add_edge(&first.id, &second.id, None, None);
    assert_eq!(
        result,
        Err(GraphError::Validation(ValidationReason::IllegalApprovalChain))
    );
    assert!(graph.edges().is_empty());
}

#[test]
fn test_single_approval_endpoint_is_legal() {
    let mut graph = new_graph();
    let review = graph.add_node("MANUAL_REVIEW", Position::new(0.0, 0.0));
    let approve = graph.add_node("APPROVE_DOCUMENT", Position::new(200.0, 0.0));
    let archive = graph.add_node("ARCHIVE_DOCUMENT", Position::new(400.0, 0.0));

    graph.add_edge(&review.id, &approve.id, None, None).expect("Into approval failed");
    graph.add_edge(&approve.id, &archive.id, None, None).expect("Out of approval failed");
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn test_update_edge_does_not_rerun_connection_rules() {
    let mut graph = new_graph();
    let a = graph.add_node("UPLOAD_DOCUMENT", Position::new(0.0, 0.0));
    let b = graph.add_node("MANUAL_REVIEW", Position::new(200.0, 0.0));
    let edge = graph.add_edge(&a.id, &b.id, None, None).expect("Edge failed");

    graph
        .update_edge(&edge.id, EdgePatch {
            label: Some("Escalate".to_string()),
            condition: Some(Some("priority == 'high'".to_string())),
            require_comment: Some(true),
        })
        .expect("Update failed");

    let updated = graph.edge(&edge.id).unwrap();
    assert_eq!(updated.label, "Escalate");
    assert_eq!(updated.condition.as_deref(), Some("priority == 'high'"));
    assert!(updated.require_comment);

    // Clearing the condition uses the inner None
    graph
        .update_edge(&edge.id, EdgePatch {
            condition: Some(None),
            ..Default::default()
        })
        .expect("Update failed");
    assert_eq!(graph.edge(&edge.id).unwrap().condition, None);
}

#[test]
fn test_update_missing_edge_fails() {
    let mut graph = new_graph();
    let result = graph.update_edge("edge_ghost", EdgePatch::default());
    assert_eq!(result, Err(GraphError::EdgeNotFound("edge_ghost".to_string())));
}

#[test]
fn test_remove_edge() {
    let mut graph = new_graph();
    let a = graph.add_node("UPLOAD_DOCUMENT", Position::new(0.0, 0.0));
    let b = graph.add_node("MANUAL_REVIEW", Position::new(200.0, 0.0));
    let edge = graph.add_edge(&a.id, &b.id, None, None).expect("Edge failed");

    graph.remove_edge(&edge.id).expect("Remove failed");
    assert!(graph.edges().is_empty());

    let result = graph.remove_edge(&edge.id);
    assert_eq!(result, Err(GraphError::EdgeNotFound(edge.id.clone())));
}
