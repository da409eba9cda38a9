use crate::circuit::{ConnectionTable, NodeId, TerminalId, TerminalRegistry};
use crate::error::Result;
use crate::logic::Signal;
use crate::trace::{EvaluationTrace, TraceFormatter};
use ahash::AHashMap;

mod engine;

use engine::SignalEngine;

/// Values of every node, keyed by node id.
///
/// Gates and sources report their output; sinks report what drives them.
pub type Snapshot = AHashMap<NodeId, Signal>;

/// Read-only evaluation over a circuit's registry and wiring.
///
/// Evaluation is pull-based and memory-less: every query walks the current
/// wiring from scratch and never mutates it, so it is safe to call
/// speculatively, e.g. to preview a value before a wire is committed.
pub struct Evaluator<'a> {
    registry: &'a TerminalRegistry,
    table: &'a ConnectionTable,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a TerminalRegistry, table: &'a ConnectionTable) -> Self {
        Self { registry, table }
    }

    /// The current value at any terminal.
    pub fn value_of(&self, terminal: TerminalId) -> Result<Signal> {
        Ok(self.trace(terminal)?.outcome())
    }

    /// The full derivation of the value at `terminal`.
    pub fn trace(&self, terminal: TerminalId) -> Result<EvaluationTrace> {
        SignalEngine::new(self.registry, self.table).evaluate(terminal)
    }

    /// A human-readable account of how the value at `terminal` came about.
    pub fn explain(&self, terminal: TerminalId) -> Result<String> {
        let trace = self.trace(terminal)?;
        Ok(format!(
            "{} = {}",
            TraceFormatter::format_trace(&trace),
            trace.outcome()
        ))
    }

    /// The value a node presents to the user.
    pub fn node_value(&self, node: NodeId) -> Result<Signal> {
        Ok(SignalEngine::new(self.registry, self.table)
            .evaluate_node(node)?
            .outcome())
    }

    /// Evaluates every node so a display can refresh in one pass.
    pub fn recompute_all(&self) -> Result<Snapshot> {
        self.registry
            .nodes()
            .map(|node| -> Result<(NodeId, Signal)> { Ok((node.id, self.node_value(node.id)?)) })
            .collect()
    }
}
