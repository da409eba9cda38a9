use crate::circuit::{ElementRef, NodeId, Role, WireId};
use thiserror::Error;

/// Result type alias using [`CircuitError`].
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Errors surfaced by the circuit facade.
///
/// All of them are recoverable: the usual reaction is to drop whatever the
/// gesture was building and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    #[error("{0} not found")]
    NotFound(ElementRef),

    #[error("Wire {0} no longer exists; it was cancelled or one of its endpoints was deleted")]
    DanglingWire(WireId),

    #[error("Wire {0} is already bound to a target")]
    WireNotPending(WireId),

    #[error("Connection rejected: {0}")]
    Rejected(#[from] Denial),
}

/// Reasons a candidate wire may not be bound.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    #[error("cannot wire {source_role} to {target_role}; wires run from an output to an input")]
    RoleMismatch { source_role: Role, target_role: Role },

    #[error("both ends belong to node {node}")]
    SelfConnection { node: NodeId },

    #[error("node {source_node} already depends on node {target_node}; the wire would close a feedback loop")]
    FeedbackLoop {
        source_node: NodeId,
        target_node: NodeId,
    },
}
