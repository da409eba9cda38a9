use crate::circuit::{ConnectionTable, NodeId, NodeKind, Role, TerminalId, TerminalRegistry};
use crate::error::Result;
use crate::logic::Signal;
use crate::trace::EvaluationTrace;
use ahash::AHashSet;
use tracing::warn;

/// The recursive engine that walks wires upstream from one terminal.
///
/// Each engine serves a single query. Nothing is cached between queries, so
/// a value always reflects the wiring at the moment it is asked for.
pub(super) struct SignalEngine<'a> {
    registry: &'a TerminalRegistry,
    table: &'a ConnectionTable,
    /// Gates on the current evaluation path.
    in_progress: AHashSet<NodeId>,
}

impl<'a> SignalEngine<'a> {
    pub(super) fn new(registry: &'a TerminalRegistry, table: &'a ConnectionTable) -> Self {
        Self {
            registry,
            table,
            in_progress: AHashSet::new(),
        }
    }

    /// Evaluates `terminal` and returns a trace of the execution.
    ///
    /// An output yields its node's value; an input yields the value of the
    /// wire bound to it, or `Unwired`.
    pub(super) fn evaluate(&mut self, terminal: TerminalId) -> Result<EvaluationTrace> {
        let record = *self.registry.terminal(terminal)?;
        match record.role {
            Role::Input => self.evaluate_input(terminal),
            Role::Output => self.evaluate_node(record.owner),
        }
    }

    fn evaluate_input(&mut self, terminal: TerminalId) -> Result<EvaluationTrace> {
        match self.table.driver_of(terminal) {
            Some(wire) => self.evaluate(wire.source),
            None => Ok(EvaluationTrace::Unwired { terminal }),
        }
    }

    /// Evaluates what a node presents: its output for gates and sources,
    /// the driven input for a sink.
    pub(super) fn evaluate_node(&mut self, id: NodeId) -> Result<EvaluationTrace> {
        let registry = self.registry;
        let node = registry.node(id)?;

        match node.kind {
            NodeKind::Source(value) => Ok(EvaluationTrace::Source {
                node: id,
                value: Signal::from(value),
            }),
            // Sinks are created with exactly one input.
            NodeKind::Sink => self.evaluate_input(node.inputs[0]),
            NodeKind::Gate(kind) => {
                if !self.in_progress.insert(id) {
                    warn!(node = %id, "Feedback loop reached during evaluation");
                    return Ok(EvaluationTrace::Feedback { node: id });
                }
                let inputs = node
                    .inputs
                    .iter()
                    .take(kind.arity())
                    .map(|&input| self.evaluate_input(input))
                    .collect::<Result<Vec<_>>>();
                self.in_progress.remove(&id);

                let inputs = inputs?;
                let signals: Vec<Signal> = inputs.iter().map(EvaluationTrace::outcome).collect();
                Ok(EvaluationTrace::Gate {
                    node: id,
                    kind,
                    outcome: kind.apply(&signals),
                    inputs,
                })
            }
        }
    }
}
