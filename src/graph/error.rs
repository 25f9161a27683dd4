use thiserror::Error;

/// Why `add_edge` rejected a connection. Rules are checked in this order
/// and the first violation wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationReason {
    #[error("source or target node does not exist")]
    NodeNotFound,
    #[error("an edge cannot connect a node to itself")]
    SelfLoop,
    #[error("an edge between these two nodes already exists")]
    DuplicateEdge,
    #[error("two approval steps cannot be connected back-to-back")]
    IllegalApprovalChain,
}

/// Recoverable errors raised by graph mutations. A rejected operation has
/// zero side effects; graph state is never corrupted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node not found: {0}")]
    NodeNotFound(String),
    #[error("edge not found: {0}")]
    EdgeNotFound(String),
    #[error("connection rejected: {0}")]
    Validation(#[from] ValidationReason),
}
