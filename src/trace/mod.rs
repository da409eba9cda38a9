//! Records of how a value was derived, and their text rendering.

mod formatter;

pub use formatter::TraceFormatter;

use crate::circuit::{NodeId, TerminalId};
use crate::logic::{GateKind, Signal};

/// How a terminal's value was evaluated, including every intermediate value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationTrace {
    Gate {
        node: NodeId,
        kind: GateKind,
        /// Traces of the inputs the gate reads, in ordinal order.
        inputs: Vec<EvaluationTrace>,
        outcome: Signal,
    },
    Source {
        node: NodeId,
        value: Signal,
    },
    /// An input terminal with no bound wire.
    Unwired { terminal: TerminalId },
    /// A gate reached again while its own value was being computed.
    Feedback { node: NodeId },
}

impl EvaluationTrace {
    pub fn outcome(&self) -> Signal {
        match self {
            EvaluationTrace::Gate { outcome, .. } => *outcome,
            EvaluationTrace::Source { value, .. } => *value,
            EvaluationTrace::Unwired { .. } | EvaluationTrace::Feedback { .. } => Signal::Undefined,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            EvaluationTrace::Gate { kind, .. } => gate_precedence(*kind),
            _ => 5,
        }
    }
}

/// Binding strength of a gate written as an operator; higher binds tighter.
pub(crate) fn gate_precedence(kind: GateKind) -> u8 {
    match kind {
        GateKind::Or | GateKind::Nor => 1,
        GateKind::Xor => 2,
        GateKind::And | GateKind::Nand => 3,
        GateKind::Not => 4,
    }
}
