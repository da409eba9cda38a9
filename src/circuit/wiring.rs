use super::policy::{ConnectionPolicy, can_connect};
use super::registry::TerminalRegistry;
use super::types::{ElementRef, TerminalId, Wire, WireId};
use crate::error::{CircuitError, Denial, Result};
use ahash::AHashMap;
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of binding a pending wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub wire: WireId,
    /// The wire that previously fed the target input, now removed.
    pub replaced: Option<WireId>,
}

/// Owns every wire of one circuit plus the indexes that keep fan-in and
/// incidence lookups O(1).
#[derive(Debug, Default)]
pub struct ConnectionTable {
    wires: AHashMap<WireId, Wire>,
    /// Bound wire feeding each input terminal. Fan-in is at most one.
    incoming: AHashMap<TerminalId, WireId>,
    /// Every wire touching a terminal, pending ones included.
    incident: AHashMap<TerminalId, BTreeSet<WireId>>,
    next_wire_id: u32,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a pending wire at `source`. Role checks happen on completion.
    pub fn begin(&mut self, source: TerminalId) -> WireId {
        self.next_wire_id += 1;
        let id = WireId(self.next_wire_id);
        self.wires.insert(
            id,
            Wire {
                id,
                source,
                target: None,
            },
        );
        self.incident.entry(source).or_default().insert(id);
        id
    }

    /// Binds a pending wire to `target`.
    ///
    /// Structural checks run first (wire still pending, target exists, ends on
    /// different nodes), then the policy. Any failure after the wire is known
    /// to be pending discards it. If `target` already has a driver, that
    /// wire is removed and reported in [`Binding::replaced`].
    pub fn complete(
        &mut self,
        id: WireId,
        target: TerminalId,
        registry: &TerminalRegistry,
        policy: &ConnectionPolicy,
    ) -> Result<Binding> {
        let wire = *self.wires.get(&id).ok_or(CircuitError::DanglingWire(id))?;
        if !wire.is_pending() {
            return Err(CircuitError::WireNotPending(id));
        }

        if let Err(e) = self.check_candidate(wire.source, target, registry, policy) {
            debug!(wire = %id, target = %target, error = %e, "Discarding wire");
            self.detach(id);
            return Err(e);
        }

        let replaced = self.incoming.get(&target).copied();
        if let Some(previous) = replaced {
            debug!(wire = %previous, target = %target, "Replacing existing driver");
            self.detach(previous);
        }

        if let Some(wire) = self.wires.get_mut(&id) {
            wire.target = Some(target);
        }
        self.incoming.insert(target, id);
        self.incident.entry(target).or_default().insert(id);
        debug!(wire = %id, source = %wire.source, target = %target, "Wire bound");

        Ok(Binding { wire: id, replaced })
    }

    fn check_candidate(
        &self,
        source: TerminalId,
        target: TerminalId,
        registry: &TerminalRegistry,
        policy: &ConnectionPolicy,
    ) -> Result<()> {
        let source_terminal = registry.terminal(source)?;
        let target_terminal = registry.terminal(target)?;

        if source_terminal.owner == target_terminal.owner {
            return Err(Denial::SelfConnection {
                node: source_terminal.owner,
            }
            .into());
        }

        can_connect(source_terminal, target_terminal).into_result()?;
        policy.check_feedback(source_terminal, target_terminal, registry, self)?;
        Ok(())
    }

    /// Discards a pending wire.
    ///
    /// Returns `false` when the wire is already gone, e.g. because its
    /// source node was deleted mid-gesture.
    pub fn cancel(&mut self, id: WireId) -> Result<bool> {
        match self.wires.get(&id) {
            None => Ok(false),
            Some(wire) if !wire.is_pending() => Err(CircuitError::WireNotPending(id)),
            Some(_) => {
                self.detach(id);
                debug!(wire = %id, "Pending wire cancelled");
                Ok(true)
            }
        }
    }

    /// Removes a wire in any state.
    pub fn remove(&mut self, id: WireId) -> Result<Wire> {
        self.detach(id)
            .ok_or(CircuitError::NotFound(ElementRef::Wire(id)))
    }

    /// Removes every wire touching any of `terminals`.
    pub fn remove_incident(
        &mut self,
        terminals: impl IntoIterator<Item = TerminalId>,
    ) -> Vec<WireId> {
        let doomed: BTreeSet<WireId> = terminals
            .into_iter()
            .flat_map(|t| self.incident.get(&t).into_iter().flatten().copied())
            .collect();
        for &id in &doomed {
            self.detach(id);
        }
        doomed.into_iter().collect()
    }

    fn detach(&mut self, id: WireId) -> Option<Wire> {
        let wire = self.wires.remove(&id)?;
        for end in std::iter::once(wire.source).chain(wire.target) {
            if let Some(set) = self.incident.get_mut(&end) {
                set.remove(&id);
                if set.is_empty() {
                    self.incident.remove(&end);
                }
            }
        }
        if let Some(target) = wire.target {
            if self.incoming.get(&target) == Some(&id) {
                self.incoming.remove(&target);
            }
        }
        Some(wire)
    }

    /// Drops every wire without rewinding the id counter.
    pub fn clear(&mut self) {
        self.wires.clear();
        self.incoming.clear();
        self.incident.clear();
    }

    pub fn wire(&self, id: WireId) -> Result<&Wire> {
        self.wires
            .get(&id)
            .ok_or(CircuitError::NotFound(ElementRef::Wire(id)))
    }

    /// Wires touching `terminal`, ordered by id.
    pub fn incident(&self, terminal: TerminalId) -> Vec<WireId> {
        self.incident
            .get(&terminal)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The bound wire feeding an input terminal, if any.
    pub fn driver_of(&self, terminal: TerminalId) -> Option<&Wire> {
        self.incoming
            .get(&terminal)
            .and_then(|id| self.wires.get(id))
    }

    pub fn pending(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values().filter(|w| w.is_pending())
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.wires.values()
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }
}
