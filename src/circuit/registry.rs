use super::types::{ElementRef, Node, NodeId, NodeKind, Position, Role, Terminal, TerminalId};
use crate::error::{CircuitError, Result};
use ahash::AHashMap;

/// Owns every node and terminal of one circuit.
///
/// Ids are issued from per-registry counters and never reused while the
/// registry lives, so a stale id fails lookup instead of aliasing a newer
/// element.
#[derive(Debug, Default)]
pub struct TerminalRegistry {
    nodes: AHashMap<NodeId, Node>,
    terminals: AHashMap<TerminalId, Terminal>,
    next_node_id: u32,
    next_terminal_id: u32,
}

impl TerminalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_node_id(&mut self) -> NodeId {
        self.next_node_id += 1;
        NodeId(self.next_node_id)
    }

    fn issue_terminal(&mut self, owner: NodeId, role: Role, ordinal: u8) -> TerminalId {
        self.next_terminal_id += 1;
        let id = TerminalId(self.next_terminal_id);
        self.terminals.insert(
            id,
            Terminal {
                id,
                owner,
                role,
                ordinal,
            },
        );
        id
    }

    /// Allocates a node together with the terminals its kind calls for.
    pub fn create_node(&mut self, kind: NodeKind, position: Position) -> NodeId {
        let id = self.issue_node_id();
        let inputs = (0..kind.input_count())
            .map(|ordinal| self.issue_terminal(id, Role::Input, ordinal as u8))
            .collect();
        let output = kind
            .has_output()
            .then(|| self.issue_terminal(id, Role::Output, 0));

        self.nodes.insert(
            id,
            Node {
                id,
                kind,
                position,
                inputs,
                output,
            },
        );
        id
    }

    /// Removes a node and its terminals, returning the removed node.
    ///
    /// Wires are not touched here; the caller drops the ones incident to
    /// `node.terminals()`.
    pub fn delete_node(&mut self, id: NodeId) -> Result<Node> {
        let node = self
            .nodes
            .remove(&id)
            .ok_or(CircuitError::NotFound(ElementRef::Node(id)))?;
        for terminal in node.terminals() {
            self.terminals.remove(&terminal);
        }
        Ok(node)
    }

    /// Drops every node and terminal. Counters keep running so ids issued
    /// before the clear stay dead.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.terminals.clear();
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(&id)
            .ok_or(CircuitError::NotFound(ElementRef::Node(id)))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(CircuitError::NotFound(ElementRef::Node(id)))
    }

    pub fn terminal(&self, id: TerminalId) -> Result<&Terminal> {
        self.terminals
            .get(&id)
            .ok_or(CircuitError::NotFound(ElementRef::Terminal(id)))
    }

    /// Inputs by ordinal, then the output.
    pub fn terminals_of(&self, id: NodeId) -> Result<Vec<TerminalId>> {
        Ok(self.node(id)?.terminals().collect())
    }

    pub fn owner_of(&self, terminal: TerminalId) -> Result<NodeId> {
        Ok(self.terminal(terminal)?.owner)
    }

    /// The node that owns `terminal`, resolved in one step.
    pub fn owning_node(&self, terminal: TerminalId) -> Result<&Node> {
        self.node(self.owner_of(terminal)?)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
