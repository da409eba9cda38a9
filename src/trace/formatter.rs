use super::{EvaluationTrace, gate_precedence};
use crate::logic::GateKind;

/// Formats evaluation traces into human-readable strings
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format an evaluation trace as an infix expression over its leaves.
    pub fn format_trace(trace: &EvaluationTrace) -> String {
        match trace {
            EvaluationTrace::Gate { kind, inputs, .. } if inputs.len() == 1 => {
                format!("{} {}", kind, Self::format_operand(&inputs[0], *kind))
            }
            EvaluationTrace::Gate { kind, inputs, .. } => inputs
                .iter()
                .map(|input| Self::format_operand(input, *kind))
                .collect::<Vec<_>>()
                .join(&format!(" {} ", kind)),
            EvaluationTrace::Source { node, value } => format!("{} (was {})", node, value),
            EvaluationTrace::Unwired { terminal } => format!("{} (unwired)", terminal),
            EvaluationTrace::Feedback { node } => format!("{} (feedback)", node),
        }
    }

    /// Formats one operand of `parent`, adding parentheses only when necessary.
    fn format_operand(operand: &EvaluationTrace, parent: GateKind) -> String {
        let text = Self::format_trace(operand);
        if Self::needs_parens(operand, parent) {
            format!("({})", text)
        } else {
            text
        }
    }

    fn needs_parens(operand: &EvaluationTrace, parent: GateKind) -> bool {
        let EvaluationTrace::Gate { kind, inputs, .. } = operand else {
            return false;
        };
        // Prefix NOT binds tightest and never needs grouping.
        if inputs.len() == 1 {
            return false;
        }
        let (inner, outer) = (operand.precedence(), gate_precedence(parent));
        // At equal strength only a repeated associative operator reads unambiguously;
        // NAND and NOR do not associate, and mixing AND with NAND changes the function.
        inner < outer
            || (inner == outer && (*kind != parent || matches!(parent, GateKind::Nand | GateKind::Nor)))
    }
}
