//! # Kairo - Logic Circuit Graph and Signal Propagation
//!
//! **Kairo** is the model behind an interactive logic-gate editor: gates,
//! constant sources and sinks ("bulbs") are placed on a canvas, their
//! terminals are wired together, and every value is derived on demand from
//! the current wiring in three-valued logic (`0`, `1`, undefined).
//!
//! ## Core Workflow
//!
//! The crate has no rendering of its own. A presentation layer drives it:
//!
//! 1.  **Place** nodes with [`Circuit::place_gate`], [`Circuit::place_source`]
//!     and [`Circuit::place_sink`]. Each node owns its terminals.
//! 2.  **Wire** them with a gesture: [`Circuit::begin_wire`] on an output,
//!     then [`Circuit::complete_wire`] on an input (or
//!     [`Circuit::cancel_wire`]). Illegal pairings are rejected and the
//!     pending wire is dropped; a second wire into the same input replaces
//!     the first.
//! 3.  **Read** values with [`Circuit::value_of`] or refresh every label at
//!     once with [`Circuit::recompute_all`].
//!
//! ## Quick Start
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! fn main() -> kairo::Result<()> {
//!     let mut circuit = Circuit::new();
//!     let a = circuit.place_source(true, Position::new(0.0, 0.0));
//!     let b = circuit.place_source(false, Position::new(0.0, 80.0));
//!     let nand = circuit.place_gate(GateKind::Nand, Position::new(120.0, 40.0));
//!     let bulb = circuit.place_sink(Position::new(240.0, 40.0));
//!
//!     for (source, slot) in [(a, 0), (b, 1)] {
//!         let from = circuit.output_of(source)?;
//!         let to = circuit.inputs_of(nand)?[slot];
//!         let wire = circuit.begin_wire(from)?;
//!         circuit.complete_wire(wire, to)?;
//!     }
//!     let from = circuit.output_of(nand)?;
//!     let to = circuit.inputs_of(bulb)?[0];
//!     let wire = circuit.begin_wire(from)?;
//!     circuit.complete_wire(wire, to)?;
//!
//!     assert_eq!(circuit.node_value(bulb)?, Signal::High);
//!     println!("{}", circuit.explain(to)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feedback wiring
//!
//! The engine is combinational. By default a wire that closes a loop is
//! accepted and any value depending on itself evaluates to
//! [`Signal::Undefined`]. Build the circuit with
//! [`CyclePolicy::Reject`](circuit::CyclePolicy::Reject) to refuse such wires
//! instead.

pub mod circuit;
pub mod error;
pub mod evaluator;
pub mod logic;
pub mod prelude;
pub mod trace;

pub use circuit::Circuit;
pub use error::{CircuitError, Denial, Result};
pub use logic::{GateKind, Signal};
