use super::Signal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The gate variants a circuit can place.
///
/// Every gate carries two input terminals and one output terminal. `Not`
/// only reads its first (upper) input; the lower one stays wireable but
/// never influences the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum GateKind {
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
}

/// Number of input terminals allocated for every gate.
pub const GATE_INPUTS: usize = 2;

impl GateKind {
    /// Every kind, in palette order.
    pub const ALL: [GateKind; 6] = [
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
        }
    }

    /// How many inputs (counted from ordinal 0) take part in evaluation.
    pub fn arity(self) -> usize {
        match self {
            GateKind::Not => 1,
            _ => GATE_INPUTS,
        }
    }

    /// Applies the gate to its inputs in ordinal order.
    ///
    /// Any `Undefined` among the inputs the gate reads makes the output
    /// `Undefined`; a known controlling value does not short-circuit.
    /// Missing inputs count as `Undefined`.
    pub fn apply(self, inputs: &[Signal]) -> Signal {
        let read = |idx: usize| inputs.get(idx).copied().and_then(Signal::as_bool);
        match self {
            GateKind::Not => read(0).map(|a| !a).into(),
            binary => match (read(0), read(1)) {
                (Some(a), Some(b)) => Signal::from(binary.truth(a, b)),
                _ => Signal::Undefined,
            },
        }
    }

    fn truth(self, a: bool, b: bool) -> bool {
        match self {
            GateKind::And => a && b,
            GateKind::Or => a || b,
            GateKind::Nand => !(a && b),
            GateKind::Nor => !(a || b),
            GateKind::Xor => a ^ b,
            GateKind::Not => !a,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gate kind '{0}' (expected one of AND, OR, NOT, NAND, NOR, XOR)")]
pub struct ParseGateKindError(pub String);

impl FromStr for GateKind {
    type Err = ParseGateKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::ALL
            .into_iter()
            .find(|kind| kind.symbol().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseGateKindError(s.to_string()))
    }
}
