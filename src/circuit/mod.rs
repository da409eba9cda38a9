//! The circuit graph and the facade a presentation layer drives.
//!
//! A [`Circuit`] owns three things: a [`TerminalRegistry`] of nodes and their
//! terminals, a [`ConnectionTable`] of wires, and the [`ConnectionPolicy`]
//! consulted before a wire is bound. Values are pulled on demand through
//! [`Circuit::value_of`] or [`Circuit::recompute_all`]; nothing is
//! recomputed implicitly after a mutation.
//!
//! ```
//! use kairo::prelude::*;
//!
//! # fn main() -> kairo::Result<()> {
//! let mut circuit = Circuit::new();
//! let high = circuit.place_source(true, Position::default());
//! let not = circuit.place_gate(GateKind::Not, Position::default());
//!
//! let source = circuit.output_of(high)?;
//! let target = circuit.inputs_of(not)?[0];
//! let wire = circuit.begin_wire(source)?;
//! circuit.complete_wire(wire, target)?;
//!
//! assert_eq!(circuit.node_value(not)?, Signal::Low);
//! # Ok(())
//! # }
//! ```

mod builder;
mod policy;
mod registry;
mod summary;
mod types;
mod wiring;

pub use builder::CircuitBuilder;
pub use policy::{ConnectionPolicy, CyclePolicy, Verdict, can_connect, depends_on};
pub use registry::TerminalRegistry;
pub use summary::{ConnectionSummary, Peer};
pub use types::*;
pub use wiring::{Binding, ConnectionTable};

use crate::error::{CircuitError, Result};
use crate::evaluator::{Evaluator, Snapshot};
use crate::logic::{GateKind, Signal};
use crate::trace::EvaluationTrace;
use itertools::Itertools;
use tracing::{debug, info};

/// One editable circuit. Independent instances share no state.
#[derive(Debug, Default)]
pub struct Circuit {
    registry: TerminalRegistry,
    table: ConnectionTable,
    policy: ConnectionPolicy,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> CircuitBuilder {
        CircuitBuilder::new()
    }

    pub(crate) fn with_policy(policy: ConnectionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn cycle_policy(&self) -> CyclePolicy {
        self.policy.cycles
    }

    // --- Placement ---

    pub fn place_gate(&mut self, kind: GateKind, position: Position) -> NodeId {
        self.place(NodeKind::Gate(kind), position)
    }

    pub fn place_source(&mut self, value: bool, position: Position) -> NodeId {
        self.place(NodeKind::Source(value), position)
    }

    pub fn place_sink(&mut self, position: Position) -> NodeId {
        self.place(NodeKind::Sink, position)
    }

    fn place(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let id = self.registry.create_node(kind, position);
        debug!(node = %id, kind = %kind, "Node placed");
        id
    }

    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<()> {
        self.registry.node_mut(id)?.position = position;
        Ok(())
    }

    pub fn position_of(&self, id: NodeId) -> Result<Position> {
        Ok(self.registry.node(id)?.position)
    }

    /// Deletes a node, its terminals, and every wire touching them.
    /// Returns the removed wires.
    pub fn delete_node(&mut self, id: NodeId) -> Result<Vec<WireId>> {
        let node = self.registry.delete_node(id)?;
        let removed = self.table.remove_incident(node.terminals());
        debug!(node = %id, wires = removed.len(), "Node deleted");
        Ok(removed)
    }

    /// Drops every node, terminal and wire.
    ///
    /// Ids are not reissued afterwards, so a handle kept from before the
    /// clear fails lookup rather than naming a new element.
    pub fn clear(&mut self) {
        info!(
            nodes = self.registry.len(),
            wires = self.table.len(),
            "Clearing circuit"
        );
        self.registry.clear();
        self.table.clear();
    }

    // --- Wiring ---

    /// Starts a connect gesture at `source`.
    ///
    /// The wire stays pending until [`complete_wire`](Self::complete_wire)
    /// or [`cancel_wire`](Self::cancel_wire). Roles are checked on completion.
    pub fn begin_wire(&mut self, source: TerminalId) -> Result<WireId> {
        self.registry.terminal(source)?;
        let id = self.table.begin(source);
        debug!(wire = %id, source = %source, "Wire started");
        Ok(id)
    }

    /// Binds a pending wire to `target`, replacing any wire already feeding it.
    ///
    /// On rejection the pending wire is discarded.
    pub fn complete_wire(&mut self, wire: WireId, target: TerminalId) -> Result<Binding> {
        self.table
            .complete(wire, target, &self.registry, &self.policy)
    }

    /// Discards a pending wire. `Ok(false)` if it no longer exists.
    pub fn cancel_wire(&mut self, wire: WireId) -> Result<bool> {
        self.table.cancel(wire)
    }

    /// Removes one wire, pending or bound.
    pub fn remove_wire(&mut self, wire: WireId) -> Result<Wire> {
        self.table.remove(wire)
    }

    /// Removes every wire touching `terminal`.
    pub fn disconnect(&mut self, terminal: TerminalId) -> Result<Vec<WireId>> {
        self.registry.terminal(terminal)?;
        Ok(self.table.remove_incident([terminal]))
    }

    // --- Evaluation ---

    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.registry, &self.table)
    }

    pub fn value_of(&self, terminal: TerminalId) -> Result<Signal> {
        self.evaluator().value_of(terminal)
    }

    pub fn node_value(&self, node: NodeId) -> Result<Signal> {
        self.evaluator().node_value(node)
    }

    pub fn trace(&self, terminal: TerminalId) -> Result<EvaluationTrace> {
        self.evaluator().trace(terminal)
    }

    pub fn explain(&self, terminal: TerminalId) -> Result<String> {
        self.evaluator().explain(terminal)
    }

    pub fn recompute_all(&self) -> Result<Snapshot> {
        self.evaluator().recompute_all()
    }

    // --- Queries ---

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.registry.node(id)
    }

    pub fn terminal(&self, id: TerminalId) -> Result<&Terminal> {
        self.registry.terminal(id)
    }

    pub fn wire(&self, id: WireId) -> Result<&Wire> {
        self.table.wire(id)
    }

    /// All nodes, ordered by id.
    pub fn nodes(&self) -> Vec<&Node> {
        self.registry.nodes().sorted_by_key(|n| n.id).collect()
    }

    /// All wires, ordered by id.
    pub fn wires(&self) -> Vec<&Wire> {
        self.table.wires().sorted_by_key(|w| w.id).collect()
    }

    pub fn terminals_of(&self, node: NodeId) -> Result<Vec<TerminalId>> {
        self.registry.terminals_of(node)
    }

    pub fn inputs_of(&self, node: NodeId) -> Result<&[TerminalId]> {
        Ok(&self.registry.node(node)?.inputs)
    }

    /// The node's output terminal. Fails with `NotFound` for sinks.
    pub fn output_of(&self, node: NodeId) -> Result<TerminalId> {
        self.registry
            .node(node)?
            .output
            .ok_or(CircuitError::NotFound(ElementRef::Node(node)))
    }

    pub fn owner_of(&self, terminal: TerminalId) -> Result<NodeId> {
        self.registry.owner_of(terminal)
    }

    pub fn wires_incident(&self, terminal: TerminalId) -> Result<Vec<WireId>> {
        self.registry.terminal(terminal)?;
        Ok(self.table.incident(terminal))
    }

    /// The bound wire feeding an input terminal.
    pub fn driver_of(&self, terminal: TerminalId) -> Option<WireId> {
        self.table.driver_of(terminal).map(|w| w.id)
    }

    pub fn pending_wires(&self) -> Vec<WireId> {
        self.table.pending().map(|w| w.id).sorted().collect()
    }

    /// True when no connect gesture is in progress.
    pub fn is_stable(&self) -> bool {
        self.table.pending().next().is_none()
    }

    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    pub fn wire_count(&self) -> usize {
        self.table.len()
    }

    /// Per-terminal view of what `node` is wired to and the value there.
    pub fn connections_of(&self, node: NodeId) -> Result<Vec<ConnectionSummary>> {
        let record = self.registry.node(node)?;
        record
            .terminals()
            .map(|id| -> Result<ConnectionSummary> {
                let terminal = self.registry.terminal(id)?;
                let peers = self
                    .table
                    .incident(id)
                    .into_iter()
                    .filter_map(|wire| self.table.wire(wire).ok())
                    .filter_map(|wire| {
                        let far = if wire.source == id { wire.target? } else { wire.source };
                        Some((wire.id, far))
                    })
                    .map(|(wire, far)| self.peer(wire, far))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ConnectionSummary {
                    terminal: id,
                    role: terminal.role,
                    slot: terminal.slot_label(record.kind),
                    peers,
                    value: self.value_of(id)?,
                })
            })
            .collect()
    }

    fn peer(&self, wire: WireId, terminal: TerminalId) -> Result<Peer> {
        let far = self.registry.terminal(terminal)?;
        let owner = self.registry.owning_node(terminal)?;
        Ok(Peer {
            wire,
            node: owner.id,
            terminal,
            label: format!("{} {}", owner.kind, far.role),
        })
    }
}
