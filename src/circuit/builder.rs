use super::Circuit;
use super::policy::{ConnectionPolicy, CyclePolicy};

/// Configures a [`Circuit`] before it is created.
///
/// ```
/// use kairo::circuit::{Circuit, CyclePolicy};
///
/// let circuit = Circuit::builder()
///     .with_cycle_policy(CyclePolicy::Reject)
///     .build();
/// assert_eq!(circuit.cycle_policy(), CyclePolicy::Reject);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CircuitBuilder {
    cycles: CyclePolicy,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cycle_policy(mut self, cycles: CyclePolicy) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn build(self) -> Circuit {
        Circuit::with_policy(ConnectionPolicy::new(self.cycles))
    }
}
