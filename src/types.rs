use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator set, in the order random generation draws from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Sin,
    Cos,
    Log,
    Exp,
    Tanh,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Sin,
        Operator::Cos,
        Operator::Log,
        Operator::Exp,
        Operator::Tanh,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Log => "log",
            Operator::Exp => "exp",
            Operator::Tanh => "tanh",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.symbol() == symbol)
    }

    pub fn arity(self) -> usize {
        match self {
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Numeric leaf. `literal` is exactly what the constant renders as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constant {
    pub value: f64,
    pub literal: String,
}

impl Constant {
    /// Keeps the literal as written, e.g. parsed text.
    pub fn from_literal(value: f64, literal: impl Into<String>) -> Self {
        Self {
            value,
            literal: literal.into(),
        }
    }

    /// Rounds to `precision` decimals and renders at that fixed precision.
    ///
    /// `None` when the value, or the value scaled by `10^precision`, is not
    /// finite: such a constant would render as `inf` or `NaN`.
    pub fn rounded(value: f64, precision: usize) -> Option<Self> {
        let scale = 10f64.powi(i32::try_from(precision).ok()?);
        let scaled = value * scale;
        if !scaled.is_finite() {
            return None;
        }
        let value = scaled.round() / scale;
        // no "-0.0000" literals
        let value = if value == 0.0 { 0.0 } else { value };
        Some(Self {
            value,
            literal: format!("{:.*}", precision, value),
        })
    }

    pub fn is_negative(&self) -> bool {
        self.literal.starts_with('-')
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Const(Constant),
    Sensor(usize),
    Call { op: Operator, args: Vec<Node> },
}

impl Node {
    pub fn call(op: Operator, args: Vec<Node>) -> Self {
        Node::Call { op, args }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Node::Call { .. })
    }
}
