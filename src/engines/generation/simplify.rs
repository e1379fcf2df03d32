//! Constant folding applied after generation when `optimization.simplify` is on.

use crate::engines::generation::sensors::SensorRegistry;
use crate::types::{Node, Operator};

const PROTECTION: f64 = 1e-3;

/// Division as the evaluator performs it: denominators are kept at least
/// `PROTECTION` away from zero.
pub fn my_div(a: f64, b: f64) -> f64 {
    let b = if b.abs() < PROTECTION {
        if b < 0.0 {
            -PROTECTION
        } else {
            PROTECTION
        }
    } else {
        b
    };
    a / b
}

pub fn my_log(a: f64) -> f64 {
    a.abs().max(PROTECTION).ln()
}

fn apply(op: Operator, args: &[f64]) -> Option<f64> {
    let value = match (op, args) {
        (Operator::Add, [a, b]) => a + b,
        (Operator::Sub, [a, b]) => a - b,
        (Operator::Mul, [a, b]) => a * b,
        (Operator::Div, [a, b]) => my_div(*a, *b),
        (Operator::Sin, [a]) => a.sin(),
        (Operator::Cos, [a]) => a.cos(),
        (Operator::Log, [a]) => my_log(*a),
        (Operator::Exp, [a]) => a.exp(),
        (Operator::Tanh, [a]) => a.tanh(),
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Bottom-up fold of every call whose arguments are all constants.
pub fn simplify(node: &Node, sensors: &SensorRegistry) -> Node {
    match node {
        Node::Call { op, args } => {
            let args: Vec<Node> = args.iter().map(|a| simplify(a, sensors)).collect();
            let values: Option<Vec<f64>> = args
                .iter()
                .map(|a| match a {
                    Node::Const(c) => Some(c.value),
                    _ => None,
                })
                .collect();
            match values
                .and_then(|v| apply(*op, &v))
                .and_then(|folded| sensors.constant(folded))
            {
                Some(folded) => Node::Const(folded),
                None => Node::Call { op: *op, args },
            }
        }
        leaf => leaf.clone(),
    }
}
