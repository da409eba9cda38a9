//! Ids and records for nodes, terminals and wires.

use crate::logic::{GATE_INPUTS, GateKind};
use std::fmt;

macro_rules! define_ids {
    ( $( ($name:ident, $prefix:expr, $doc:expr) ),* $(,)? ) => {
        $(
            #[doc = $doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize))]
            #[cfg_attr(feature = "serde", serde(transparent))]
            pub struct $name(pub u32);

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}{}", $prefix, self.0)
                }
            }
        )*
    };
}

define_ids! {
    (NodeId, "N", "Identifies a placed node for its whole lifetime."),
    (TerminalId, "T", "Identifies one attachment point of a node."),
    (WireId, "W", "Identifies a pending or bound wire."),
}

/// Any id the facade can fail to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Node(NodeId),
    Terminal(TerminalId),
    Wire(WireId),
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementRef::Node(id) => write!(f, "node {}", id),
            ElementRef::Terminal(id) => write!(f, "terminal {}", id),
            ElementRef::Wire(id) => write!(f, "wire {}", id),
        }
    }
}

/// Canvas coordinates. Carried for the presentation layer only.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a node is, which fixes its terminal layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    /// Two inputs, one output.
    Gate(GateKind),
    /// One output with a fixed 0/1 value.
    Source(bool),
    /// One input; the "bulb" that shows whatever drives it.
    Sink,
}

impl NodeKind {
    pub fn input_count(self) -> usize {
        match self {
            NodeKind::Gate(_) => GATE_INPUTS,
            NodeKind::Source(_) => 0,
            NodeKind::Sink => 1,
        }
    }

    pub fn has_output(self) -> bool {
        !matches!(self, NodeKind::Sink)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Gate(kind) => write!(f, "{}", kind),
            NodeKind::Source(value) => write!(f, "{}", u8::from(*value)),
            NodeKind::Sink => write!(f, "BULB"),
        }
    }
}

/// Whether a terminal receives or drives a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    Input,
    Output,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Input => write!(f, "input"),
            Role::Output => write!(f, "output"),
        }
    }
}

/// A placed node. Terminals are held by id, never by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    /// Input terminals in ordinal order.
    pub inputs: Vec<TerminalId>,
    pub output: Option<TerminalId>,
}

impl Node {
    /// All terminals: inputs by ordinal, then the output.
    pub fn terminals(&self) -> impl Iterator<Item = TerminalId> + '_ {
        self.inputs.iter().copied().chain(self.output)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Terminal {
    pub id: TerminalId,
    /// Owning node. Lookup only; the node owns the terminal, not the reverse.
    pub owner: NodeId,
    pub role: Role,
    /// Position among the node's terminals of the same role.
    pub ordinal: u8,
}

impl Terminal {
    /// User-facing slot name: `upper`/`lower` for two-input gates,
    /// otherwise the role.
    pub fn slot_label(&self, kind: NodeKind) -> &'static str {
        match (self.role, kind) {
            (Role::Input, NodeKind::Gate(_)) if self.ordinal == 0 => "upper",
            (Role::Input, NodeKind::Gate(_)) => "lower",
            (Role::Input, _) => "input",
            (Role::Output, _) => "output",
        }
    }
}

/// A directed connection from an output terminal to an input terminal.
///
/// `target` is `None` while the wire is pending, i.e. during a connect
/// gesture. Pending wires never take part in evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wire {
    pub id: WireId,
    pub source: TerminalId,
    pub target: Option<TerminalId>,
}

impl Wire {
    pub fn is_pending(&self) -> bool {
        self.target.is_none()
    }

    pub fn touches(&self, terminal: TerminalId) -> bool {
        self.source == terminal || self.target == Some(terminal)
    }
}
