use super::types::{NodeId, Role, TerminalId, WireId};
use crate::logic::Signal;

/// The far end of a bound wire, as seen from one terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Peer {
    pub wire: WireId,
    pub node: NodeId,
    pub terminal: TerminalId,
    /// Kind and role of the far terminal, e.g. `"AND output"`.
    pub label: String,
}

/// What one terminal of a node is wired to, for connection menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSummary {
    pub terminal: TerminalId,
    pub role: Role,
    /// `upper`/`lower` for gate inputs, otherwise the role name.
    pub slot: &'static str,
    /// Empty when unconnected. Inputs have at most one peer.
    pub peers: Vec<Peer>,
    pub value: Signal,
}

impl ConnectionSummary {
    pub fn is_connected(&self) -> bool {
        !self.peers.is_empty()
    }
}
