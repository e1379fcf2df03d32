use crate::types::{Node, Operator};
use serde::{Deserialize, Serialize};

/// Evaluator-facing expression: one string for a single control, otherwise
/// one string per control in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Formal {
    Single(String),
    Multiple(Vec<String>),
}

impl Formal {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Formal::Single(s) => Some(s),
            Formal::Multiple(_) => None,
        }
    }

    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Formal::Single(s) => vec![s.as_str()],
            Formal::Multiple(list) => list.iter().map(String::as_str).collect(),
        }
    }
}

/// Canonical S-expression of one control.
pub fn render_control(node: &Node) -> String {
    let mut out = String::new();
    write_value(node, &mut out);
    out
}

/// Canonical `(root ...)` form of a set of controls.
pub fn render_individual(controls: &[Node]) -> String {
    let mut out = String::from("(root");
    for control in controls {
        out.push(' ');
        write_value(control, &mut out);
    }
    out.push(')');
    out
}

fn write_value(node: &Node, out: &mut String) {
    match node {
        Node::Const(c) => out.push_str(&c.literal),
        Node::Sensor(index) => {
            out.push('S');
            out.push_str(&index.to_string());
        }
        Node::Call { op, args } => {
            out.push('(');
            out.push_str(op.symbol());
            for arg in args {
                out.push(' ');
                write_value(arg, out);
            }
            out.push(')');
        }
    }
}

pub fn render_formal(node: &Node) -> String {
    match node {
        Node::Const(c) if c.is_negative() => format!("({})", c.literal),
        Node::Const(c) => c.literal.clone(),
        Node::Sensor(index) => format!("S{}", index),
        Node::Call { op, args } => {
            let rendered: Vec<String> = args.iter().map(render_formal).collect();
            match (op, rendered.as_slice()) {
                (Operator::Add, [a, b]) => format!("({} + {})", a, b),
                (Operator::Sub, [a, b]) => format!("({} - {})", a, b),
                (Operator::Mul, [a, b]) => format!("({} .* {})", a, b),
                (Operator::Div, [a, b]) => format!("(my_div({},{}))", a, b),
                (Operator::Log, [a]) => format!("my_log({})", a),
                (op, [a]) => format!("{}({})", op.symbol(), a),
                // Arity is enforced on construction.
                (op, _) => format!("{}({})", op.symbol(), rendered.join(",")),
            }
        }
    }
}

pub fn render_formal_individual(controls: &[Node]) -> Formal {
    match controls {
        [single] => Formal::Single(render_formal(single)),
        _ => Formal::Multiple(controls.iter().map(render_formal).collect()),
    }
}
