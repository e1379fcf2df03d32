use crate::config::gp::GpConfig;
use crate::engines::generation::random::RandomSource;
use crate::engines::generation::sensors::SensorRegistry;
use crate::error::{GpError, Result};
use crate::types::{Node, Operator};
use serde::{Deserialize, Serialize};

/// Random generation strategy, from shallow grow (0) to a lone terminal (4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndividualType {
    /// Operator at the root, then grow.
    Grow = 0,
    /// Operators forced down to `mindepth`, then grow.
    Ramped = 1,
    /// Operators forced down to one level above the bound, then grow.
    Deep = 2,
    /// Every branch reaches the depth bound.
    Full = 3,
    /// A single terminal.
    Terminal = 4,
}

impl TryFrom<u8> for IndividualType {
    type Error = GpError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(IndividualType::Grow),
            1 => Ok(IndividualType::Ramped),
            2 => Ok(IndividualType::Deep),
            3 => Ok(IndividualType::Full),
            4 => Ok(IndividualType::Terminal),
            other => Err(GpError::Configuration(format!(
                "individual type must be between 0 and 4, got {}",
                other
            ))),
        }
    }
}

/// Depth rules for one generation call. Depth 0 is the control root.
#[derive(Debug, Clone, Copy)]
struct Shape {
    max_depth: usize,
    /// Operators are forced at every depth below this.
    forced_until: usize,
    /// Probability of a terminal where not forced; `None` never stops early.
    leaf_prob: Option<f64>,
}

pub struct TreeGenerator<'a> {
    gp: &'a GpConfig,
    sensors: &'a SensorRegistry,
}

impl<'a> TreeGenerator<'a> {
    pub fn new(gp: &'a GpConfig, sensors: &'a SensorRegistry) -> Self {
        Self { gp, sensors }
    }

    /// One control tree of the given type, depth bounded by `maxdepthfirst`.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        kind: IndividualType,
        rng: &mut R,
    ) -> Result<Node> {
        let max_depth = self.gp.maxdepthfirst;
        let leaf_prob = Some(self.gp.leaf_prob);
        let shape = match kind {
            IndividualType::Grow => Shape {
                max_depth,
                forced_until: 1,
                leaf_prob,
            },
            IndividualType::Ramped => Shape {
                max_depth,
                forced_until: self.gp.mindepth.min(max_depth),
                leaf_prob,
            },
            IndividualType::Deep => Shape {
                max_depth,
                forced_until: max_depth.saturating_sub(1),
                leaf_prob,
            },
            IndividualType::Full => Shape {
                max_depth,
                forced_until: max_depth,
                leaf_prob: None,
            },
            IndividualType::Terminal => Shape {
                max_depth: 0,
                forced_until: 0,
                leaf_prob: None,
            },
        };
        self.build(shape, 0, rng)
    }

    /// Grow tree with no forced operators, used to regrow removed subtrees.
    pub fn grow<R: RandomSource + ?Sized>(&self, max_depth: usize, rng: &mut R) -> Result<Node> {
        let shape = Shape {
            max_depth,
            forced_until: 0,
            leaf_prob: Some(self.gp.leaf_prob),
        };
        self.build(shape, 0, rng)
    }

    pub fn terminal<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Node> {
        self.sensors.pick_terminal(rng)
    }

    fn build<R: RandomSource + ?Sized>(
        &self,
        shape: Shape,
        depth: usize,
        rng: &mut R,
    ) -> Result<Node> {
        if depth >= shape.max_depth {
            return self.terminal(rng);
        }
        if depth >= shape.forced_until {
            if let Some(leaf_prob) = shape.leaf_prob {
                if rng.next_uniform()? < leaf_prob {
                    return self.terminal(rng);
                }
            }
        }

        let op = Operator::ALL[rng.next_int(Operator::ALL.len())?];
        let args = (0..op.arity())
            .map(|_| self.build(shape, depth + 1, rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Node::Call { op, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::population::PopulationConfig;
    use crate::engines::generation::random::{ReplayRandom, SeededRandom};
    use crate::engines::generation::renderer::render_control;

    fn registry() -> SensorRegistry {
        SensorRegistry::new(&PopulationConfig::default()).unwrap()
    }

    #[test]
    fn test_type_from_u8() {
        assert_eq!(IndividualType::try_from(3).unwrap(), IndividualType::Full);
        assert!(matches!(IndividualType::try_from(5), Err(GpError::Configuration(_))));
    }

    #[test]
    fn test_full_tree_draw_order() {
        let gp = GpConfig {
            maxdepthfirst: 2,
            ..GpConfig::default()
        };
        let sensors = registry();
        let generator = TreeGenerator::new(&gp, &sensors);
        // tanh, +, sensor S0, constant 5.0
        let mut rng = ReplayRandom::new(vec![0.95, 0.05, 0.1, 0.7, 0.9, 0.75]).unwrap();
        let tree = generator.generate(IndividualType::Full, &mut rng).unwrap();
        assert_eq!(render_control(&tree), "(tanh (+ S0 5.0000))");
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_terminal_type_never_draws_operator() {
        let gp = GpConfig::default();
        let sensors = registry();
        let generator = TreeGenerator::new(&gp, &sensors);
        let mut rng = ReplayRandom::new(vec![0.5, 0.25]).unwrap();
        let tree = generator.generate(IndividualType::Terminal, &mut rng).unwrap();
        assert_eq!(render_control(&tree), "-5.0000");
    }

    #[test]
    fn test_grow_stops_on_leaf_draw() {
        let gp = GpConfig {
            maxdepthfirst: 3,
            leaf_prob: 0.3,
            ..GpConfig::default()
        };
        let sensors = registry();
        let generator = TreeGenerator::new(&gp, &sensors);
        // root forced: cos; depth 1 stop draw 0.1 < 0.3 -> sensor S0
        let mut rng = ReplayRandom::new(vec![0.6, 0.1, 0.1, 0.5]).unwrap();
        let tree = generator.generate(IndividualType::Grow, &mut rng).unwrap();
        assert_eq!(render_control(&tree), "(cos S0)");
    }

    #[test]
    fn test_depth_bounded_for_every_type() {
        let gp = GpConfig {
            maxdepthfirst: 4,
            ..GpConfig::default()
        };
        let sensors = registry();
        let generator = TreeGenerator::new(&gp, &sensors);
        let mut rng = SeededRandom::new(Some(7));
        for kind in 0..=4u8 {
            let kind = IndividualType::try_from(kind).unwrap();
            for _ in 0..50 {
                let tree = generator.generate(kind, &mut rng).unwrap();
                assert!(tree.depth() <= 4);
                match kind {
                    IndividualType::Full => assert_eq!(tree.depth(), 4),
                    IndividualType::Terminal => assert!(tree.is_terminal()),
                    IndividualType::Grow | IndividualType::Ramped | IndividualType::Deep => {
                        assert!(!tree.is_terminal())
                    }
                }
            }
        }
    }

    #[test]
    fn test_deep_reaches_below_forced_depth() {
        let gp = GpConfig {
            maxdepthfirst: 5,
            ..GpConfig::default()
        };
        let sensors = registry();
        let generator = TreeGenerator::new(&gp, &sensors);
        let mut rng = SeededRandom::new(Some(11));
        for _ in 0..50 {
            let tree = generator.generate(IndividualType::Deep, &mut rng).unwrap();
            assert!(tree.depth() >= 4);
        }
    }

    #[test]
    fn test_grow_with_zero_budget_is_terminal() {
        let gp = GpConfig::default();
        let sensors = registry();
        let generator = TreeGenerator::new(&gp, &sensors);
        let mut rng = ReplayRandom::new(vec![0.9, 0.75]).unwrap();
        let tree = generator.grow(0, &mut rng).unwrap();
        assert_eq!(render_control(&tree), "5.0000");
    }
}
