use super::traits::ConfigSection;
use crate::error::GpError;
use crate::types::{Node, Operator};
use serde::{Deserialize, Serialize};

/// Per-node weights used by the complexity score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityWeights {
    pub constant: u32,
    pub sensor: u32,
    pub add: u32,
    pub sub: u32,
    pub mul: u32,
    pub div: u32,
    pub sin: u32,
    pub cos: u32,
    pub log: u32,
    pub exp: u32,
    pub tanh: u32,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            constant: 1,
            sensor: 1,
            add: 1,
            sub: 1,
            mul: 1,
            div: 1,
            sin: 3,
            cos: 3,
            log: 5,
            exp: 5,
            tanh: 5,
        }
    }
}

impl ComplexityWeights {
    pub fn operator(&self, op: Operator) -> u32 {
        match op {
            Operator::Add => self.add,
            Operator::Sub => self.sub,
            Operator::Mul => self.mul,
            Operator::Div => self.div,
            Operator::Sin => self.sin,
            Operator::Cos => self.cos,
            Operator::Log => self.log,
            Operator::Exp => self.exp,
            Operator::Tanh => self.tanh,
        }
    }

    /// Weight of a single node, children excluded.
    pub fn node(&self, node: &Node) -> u32 {
        match node {
            Node::Const(_) => self.constant,
            Node::Sensor(_) => self.sensor,
            Node::Call { op, .. } => self.operator(*op),
        }
    }
}

impl ConfigSection for ComplexityWeights {
    fn section_name() -> &'static str {
        "complexity"
    }

    fn validate(&self) -> Result<(), GpError> {
        let mut all = [self.constant, self.sensor]
            .into_iter()
            .chain(Operator::ALL.iter().map(|op| self.operator(*op)));
        if all.any(|w| w == 0) {
            return Err(GpError::Configuration(
                "complexity weights must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
