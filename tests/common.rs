//! Common test utilities for building small circuits.
use kairo::prelude::*;

/// Wires `source` to `target` in one gesture.
#[allow(dead_code)]
pub fn wire(
    circuit: &mut Circuit,
    source: TerminalId,
    target: TerminalId,
) -> kairo::Result<Binding> {
    let pending = circuit.begin_wire(source)?;
    circuit.complete_wire(pending, target)
}

/// Wires the output of `from` into input `slot` of `to`.
#[allow(dead_code)]
pub fn connect(circuit: &mut Circuit, from: NodeId, to: NodeId, slot: usize) -> Binding {
    let source = circuit.output_of(from).expect("source node has an output");
    let target = circuit.inputs_of(to).expect("target node exists")[slot];
    wire(circuit, source, target).expect("connection is legal")
}

/// Places a gate and drives each input from a constant source, leaving
/// `None` inputs unwired.
///
/// Returns the circuit and the gate id.
#[allow(dead_code)]
pub fn gate_with_inputs(kind: GateKind, a: Option<bool>, b: Option<bool>) -> (Circuit, NodeId) {
    let mut circuit = Circuit::new();
    let gate = circuit.place_gate(kind, Position::new(100.0, 0.0));
    for (slot, value) in [a, b].into_iter().enumerate() {
        if let Some(value) = value {
            let source = circuit.place_source(value, Position::new(0.0, slot as f32 * 50.0));
            connect(&mut circuit, source, gate, slot);
        }
    }
    (circuit, gate)
}

/// Converts a 0/1 literal into the matching signal.
#[allow(dead_code)]
pub fn bit(value: u8) -> Signal {
    Signal::from(value != 0)
}
