use super::registry::TerminalRegistry;
use super::types::{NodeId, Role, Terminal};
use super::wiring::ConnectionTable;
use crate::error::Denial;
use ahash::AHashSet;
use tracing::debug;

/// How the circuit treats wiring that feeds a node's output back into its
/// own inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Allow the wire. Evaluation reports `Undefined` for values that
    /// depend on themselves.
    #[default]
    Undefined,
    /// Refuse the wire with [`Denial::FeedbackLoop`].
    Reject,
}

/// Result of asking whether a candidate wire may be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Denied(Denial),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }

    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Verdict::Allowed => Ok(()),
            Verdict::Denied(reason) => Err(reason),
        }
    }
}

/// Decides whether `source` may drive `target`.
///
/// The only illegal pairing is by role: the source must be an output and
/// the target an input. Any output may drive any input, whichever kind of
/// node owns either end. Same-node wiring is a structural matter handled
/// by the connection table before this is consulted.
pub fn can_connect(source: &Terminal, target: &Terminal) -> Verdict {
    match (source.role, target.role) {
        (Role::Output, Role::Input) => Verdict::Allowed,
        (source_role, target_role) => Verdict::Denied(Denial::RoleMismatch {
            source_role,
            target_role,
        }),
    }
}

/// Role rules plus the configured treatment of feedback wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionPolicy {
    pub cycles: CyclePolicy,
}

impl ConnectionPolicy {
    pub fn new(cycles: CyclePolicy) -> Self {
        Self { cycles }
    }

    /// Under [`CyclePolicy::Reject`], fails when the source node already
    /// depends on the target node through bound wires.
    pub fn check_feedback(
        &self,
        source: &Terminal,
        target: &Terminal,
        registry: &TerminalRegistry,
        table: &ConnectionTable,
    ) -> Result<(), Denial> {
        if self.cycles == CyclePolicy::Undefined {
            return Ok(());
        }
        if depends_on(source.owner, target.owner, registry, table) {
            debug!(source = %source.owner, target = %target.owner, "Feedback wire refused");
            return Err(Denial::FeedbackLoop {
                source_node: source.owner,
                target_node: target.owner,
            });
        }
        Ok(())
    }
}

/// Whether `node` reads, directly or through other nodes, from `upstream`.
pub fn depends_on(
    node: NodeId,
    upstream: NodeId,
    registry: &TerminalRegistry,
    table: &ConnectionTable,
) -> bool {
    let mut visited = AHashSet::new();
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        let Ok(record) = registry.node(current) else {
            continue;
        };
        for input in &record.inputs {
            let Some(driver) = table.driver_of(*input) else {
                continue;
            };
            let Ok(feeder) = registry.owner_of(driver.source) else {
                continue;
            };
            if feeder == upstream {
                return true;
            }
            stack.push(feeder);
        }
    }
    false
}
