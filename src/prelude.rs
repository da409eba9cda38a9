//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the kairo crate.
//!
//! # Example
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! let mut circuit = Circuit::new();
//! let gate = circuit.place_gate(GateKind::Xor, Position::default());
//! assert_eq!(circuit.node_value(gate).unwrap(), Signal::Undefined);
//! ```

// Circuit facade and configuration
pub use crate::circuit::{Circuit, CircuitBuilder, CyclePolicy};

// Graph records and ids
pub use crate::circuit::{
    Binding, ConnectionSummary, Node, NodeId, NodeKind, Peer, Position, Role, Terminal,
    TerminalId, Wire, WireId,
};

// Values and evaluation
pub use crate::evaluator::Snapshot;
pub use crate::logic::{GateKind, Signal};
pub use crate::trace::{EvaluationTrace, TraceFormatter};

// Error types
pub use crate::error::{CircuitError, Denial, Result};
