//! Three-valued signals and the gate functions that combine them.

mod gate;
mod signal;

pub use gate::{GATE_INPUTS, GateKind, ParseGateKindError};
pub use signal::Signal;
