//! Tests for wire completion rules: roles, same-node wiring, fan-in and loops.
mod common;
use common::*;
use kairo::circuit::{Verdict, can_connect};
use kairo::prelude::*;
use rstest::rstest;

#[derive(Debug, Clone, Copy)]
enum End {
    SourceOutput,
    GateInput,
    GateOutput,
    SinkInput,
}

/// Places a fresh node for `end` and returns the matching terminal.
fn place_end(circuit: &mut Circuit, end: End) -> TerminalId {
    match end {
        End::SourceOutput => {
            let node = circuit.place_source(true, Position::default());
            circuit.output_of(node).unwrap()
        }
        End::GateInput => {
            let node = circuit.place_gate(GateKind::And, Position::default());
            circuit.inputs_of(node).unwrap()[0]
        }
        End::GateOutput => {
            let node = circuit.place_gate(GateKind::Or, Position::default());
            circuit.output_of(node).unwrap()
        }
        End::SinkInput => {
            let node = circuit.place_sink(Position::default());
            circuit.inputs_of(node).unwrap()[0]
        }
    }
}

#[rstest]
#[case(End::SourceOutput, End::GateInput, true)]
#[case(End::SourceOutput, End::SinkInput, true)]
#[case(End::GateOutput, End::GateInput, true)]
#[case(End::GateOutput, End::SinkInput, true)]
#[case(End::SourceOutput, End::GateOutput, false)]
#[case(End::GateOutput, End::GateOutput, false)]
#[case(End::GateOutput, End::SourceOutput, false)]
#[case(End::GateInput, End::GateInput, false)]
#[case(End::SinkInput, End::GateInput, false)]
#[case(End::GateInput, End::GateOutput, false)]
#[case(End::SinkInput, End::SourceOutput, false)]
fn test_role_matrix(#[case] from: End, #[case] to: End, #[case] allowed: bool) {
    let mut circuit = Circuit::new();
    let source = place_end(&mut circuit, from);
    let target = place_end(&mut circuit, to);

    let result = wire(&mut circuit, source, target);
    if allowed {
        let binding = result.unwrap();
        assert_eq!(circuit.wire(binding.wire).unwrap().target, Some(target));
    } else {
        assert!(matches!(
            result,
            Err(CircuitError::Rejected(Denial::RoleMismatch { .. }))
        ));
        // The rejected wire is dropped, not left pending.
        assert_eq!(circuit.wire_count(), 0);
        assert!(circuit.is_stable());
    }
}

#[test]
fn test_can_connect_is_a_pure_role_check() {
    let output = Terminal {
        id: TerminalId(1),
        owner: NodeId(1),
        role: Role::Output,
        ordinal: 0,
    };
    let input = Terminal {
        id: TerminalId(2),
        owner: NodeId(2),
        role: Role::Input,
        ordinal: 1,
    };
    assert_eq!(can_connect(&output, &input), Verdict::Allowed);
    assert!(!can_connect(&input, &output).is_allowed());
    assert_eq!(
        can_connect(&output, &output),
        Verdict::Denied(Denial::RoleMismatch {
            source_role: Role::Output,
            target_role: Role::Output,
        })
    );
}

#[rstest]
#[case(0)]
#[case(1)]
fn test_gate_cannot_feed_itself(#[case] slot: usize) {
    let mut circuit = Circuit::new();
    let gate = circuit.place_gate(GateKind::Xor, Position::default());
    let output = circuit.output_of(gate).unwrap();
    let input = circuit.inputs_of(gate).unwrap()[slot];

    let err = wire(&mut circuit, output, input).unwrap_err();
    assert_eq!(err, CircuitError::Rejected(Denial::SelfConnection { node: gate }));
    assert_eq!(circuit.wire_count(), 0);
}

#[test]
fn test_same_node_check_runs_before_role_check() {
    let mut circuit = Circuit::new();
    let gate = circuit.place_gate(GateKind::And, Position::default());
    let inputs = circuit.inputs_of(gate).unwrap().to_vec();

    let err = wire(&mut circuit, inputs[0], inputs[1]).unwrap_err();
    assert_eq!(err, CircuitError::Rejected(Denial::SelfConnection { node: gate }));
}

#[test]
fn test_second_wire_into_input_replaces_first() {
    let mut circuit = Circuit::new();
    let first = circuit.place_source(true, Position::default());
    let second = circuit.place_source(false, Position::default());
    let bulb = circuit.place_sink(Position::default());
    let input = circuit.inputs_of(bulb).unwrap()[0];

    let original = connect(&mut circuit, first, bulb, 0);
    assert_eq!(original.replaced, None);
    assert_eq!(circuit.node_value(bulb).unwrap(), Signal::High);

    let newer = connect(&mut circuit, second, bulb, 0);
    assert_eq!(newer.replaced, Some(original.wire));
    assert_eq!(circuit.wires_incident(input).unwrap(), vec![newer.wire]);
    assert_eq!(circuit.driver_of(input), Some(newer.wire));
    assert!(circuit.wire(original.wire).is_err());
    assert!(
        circuit
            .wires_incident(circuit.output_of(first).unwrap())
            .unwrap()
            .is_empty()
    );
    assert_eq!(circuit.node_value(bulb).unwrap(), Signal::Low);
}

#[test]
fn test_fan_in_stays_at_most_one_after_many_completions() {
    let mut circuit = Circuit::new();
    let gate = circuit.place_gate(GateKind::Nor, Position::default());
    let upper = circuit.inputs_of(gate).unwrap()[0];
    for value in [true, false, true, true, false] {
        let source = circuit.place_source(value, Position::default());
        connect(&mut circuit, source, gate, 0);
        let bound_into_upper = circuit
            .wires()
            .into_iter()
            .filter(|w| w.target == Some(upper))
            .count();
        assert_eq!(bound_into_upper, 1);
    }
}

#[test]
fn test_output_fan_out_is_unrestricted() {
    let mut circuit = Circuit::new();
    let source = circuit.place_source(false, Position::default());
    let gate = circuit.place_gate(GateKind::Or, Position::default());
    connect(&mut circuit, source, gate, 0);
    connect(&mut circuit, source, gate, 1);

    let output = circuit.output_of(source).unwrap();
    assert_eq!(circuit.wires_incident(output).unwrap().len(), 2);
    assert_eq!(circuit.node_value(gate).unwrap(), Signal::Low);
}

#[test]
fn test_completing_after_source_deleted_is_dangling() {
    let mut circuit = Circuit::new();
    let gate = circuit.place_gate(GateKind::And, Position::default());
    let bulb = circuit.place_sink(Position::default());
    let output = circuit.output_of(gate).unwrap();
    let input = circuit.inputs_of(bulb).unwrap()[0];

    let pending = circuit.begin_wire(output).unwrap();
    circuit.delete_node(gate).unwrap();

    assert_eq!(
        circuit.complete_wire(pending, input).unwrap_err(),
        CircuitError::DanglingWire(pending)
    );
    assert!(!circuit.cancel_wire(pending).unwrap());
}

#[test]
fn test_completing_onto_deleted_target_drops_the_wire() {
    let mut circuit = Circuit::new();
    let source = circuit.place_source(true, Position::default());
    let bulb = circuit.place_sink(Position::default());
    let output = circuit.output_of(source).unwrap();
    let input = circuit.inputs_of(bulb).unwrap()[0];

    let pending = circuit.begin_wire(output).unwrap();
    circuit.delete_node(bulb).unwrap();

    let err = circuit.complete_wire(pending, input).unwrap_err();
    assert!(matches!(err, CircuitError::NotFound(_)));
    assert_eq!(circuit.wire_count(), 0);
}

#[test]
fn test_bound_wire_cannot_be_completed_or_cancelled_again() {
    let mut circuit = Circuit::new();
    let source = circuit.place_source(true, Position::default());
    let bulb = circuit.place_sink(Position::default());
    let binding = connect(&mut circuit, source, bulb, 0);
    let input = circuit.inputs_of(bulb).unwrap()[0];

    assert_eq!(
        circuit.complete_wire(binding.wire, input).unwrap_err(),
        CircuitError::WireNotPending(binding.wire)
    );
    assert_eq!(
        circuit.cancel_wire(binding.wire).unwrap_err(),
        CircuitError::WireNotPending(binding.wire)
    );
    assert_eq!(circuit.node_value(bulb).unwrap(), Signal::High);
}

#[test]
fn test_cancel_discards_pending_wire() {
    let mut circuit = Circuit::new();
    let source = circuit.place_source(true, Position::default());
    let output = circuit.output_of(source).unwrap();
    let pending = circuit.begin_wire(output).unwrap();
    assert_eq!(circuit.pending_wires(), vec![pending]);

    assert!(circuit.cancel_wire(pending).unwrap());
    assert!(circuit.is_stable());
    assert!(circuit.wires_incident(output).unwrap().is_empty());
}

#[test]
fn test_begin_wire_on_unknown_terminal_fails() {
    let mut circuit = Circuit::new();
    let err = circuit.begin_wire(TerminalId(7)).unwrap_err();
    assert!(matches!(err, CircuitError::NotFound(_)));
    assert_eq!(circuit.wire_count(), 0);
}

#[test]
fn test_reject_policy_refuses_feedback_loop() {
    let mut circuit = Circuit::builder()
        .with_cycle_policy(CyclePolicy::Reject)
        .build();
    let first = circuit.place_gate(GateKind::And, Position::default());
    let second = circuit.place_gate(GateKind::Not, Position::default());
    let third = circuit.place_gate(GateKind::Or, Position::default());
    connect(&mut circuit, first, second, 0);
    connect(&mut circuit, second, third, 0);

    let source = circuit.output_of(third).unwrap();
    let target = circuit.inputs_of(first).unwrap()[1];
    let err = wire(&mut circuit, source, target).unwrap_err();
    assert_eq!(
        err,
        CircuitError::Rejected(Denial::FeedbackLoop {
            source_node: third,
            target_node: first,
        })
    );
    assert_eq!(circuit.wire_count(), 2);

    // Branching without a loop is still fine.
    let bulb = circuit.place_sink(Position::default());
    connect(&mut circuit, first, bulb, 0);
}

#[test]
fn test_default_policy_accepts_feedback_loop() {
    let mut circuit = Circuit::new();
    assert_eq!(circuit.cycle_policy(), CyclePolicy::Undefined);
    let first = circuit.place_gate(GateKind::Nand, Position::default());
    let second = circuit.place_gate(GateKind::Nand, Position::default());
    connect(&mut circuit, first, second, 0);
    connect(&mut circuit, second, first, 0);

    assert_eq!(circuit.wire_count(), 2);
    assert_eq!(circuit.node_value(first).unwrap(), Signal::Undefined);
}
