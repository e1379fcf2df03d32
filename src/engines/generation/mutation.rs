use crate::engines::generation::crossover::pick_control;
use crate::engines::generation::generator::TreeGenerator;
use crate::engines::generation::random::RandomSource;
use crate::engines::generation::sensors::SensorRegistry;
use crate::error::{GpError, Result};
use crate::types::Node;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationType {
    RemoveSubtreeAndReplace,
    Reparametrization,
    Hoist,
    Shrink,
}

impl MutationType {
    /// Order used by the random-choice draw.
    pub const ALL: [MutationType; 4] = [
        MutationType::RemoveSubtreeAndReplace,
        MutationType::Reparametrization,
        MutationType::Hoist,
        MutationType::Shrink,
    ];

    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self::ALL[rng.next_int(Self::ALL.len())?])
    }
}

pub struct Mutator<'a> {
    generator: TreeGenerator<'a>,
    sensors: &'a SensorRegistry,
    maxdepthfirst: usize,
}

impl<'a> Mutator<'a> {
    pub fn new(
        generator: TreeGenerator<'a>,
        sensors: &'a SensorRegistry,
        maxdepthfirst: usize,
    ) -> Self {
        Self {
            generator,
            sensors,
            maxdepthfirst,
        }
    }

    fn strategy(kind: MutationType) -> fn(&Self, &Node, &mut dyn RandomSource) -> Result<Node> {
        match kind {
            MutationType::RemoveSubtreeAndReplace => Self::remove_subtree_and_replace,
            MutationType::Reparametrization => Self::reparametrization,
            MutationType::Hoist => Self::hoist,
            MutationType::Shrink => Self::shrink,
        }
    }

    /// Rewrites exactly one control; the others are copied unchanged.
    pub fn mutate_controls(
        &self,
        controls: &[Node],
        kind: MutationType,
        rng: &mut dyn RandomSource,
    ) -> Result<Vec<Node>> {
        if controls.is_empty() {
            return Err(GpError::Structural(
                "cannot mutate an empty individual".to_string(),
            ));
        }
        let index = pick_control(controls.len(), rng)?;
        let mutated = Self::strategy(kind)(self, &controls[index], rng)?;
        log::debug!("{:?} applied to control {}", kind, index);

        let mut out = controls.to_vec();
        out[index] = mutated;
        Ok(out)
    }

    pub fn mutate_tree(
        &self,
        tree: &Node,
        kind: MutationType,
        rng: &mut dyn RandomSource,
    ) -> Result<Node> {
        Self::strategy(kind)(self, tree, rng)
    }

    /// Replaces a non-root subtree with a fresh grow tree that keeps the whole
    /// tree within `maxdepthfirst`.
    fn remove_subtree_and_replace(&self, tree: &Node, rng: &mut dyn RandomSource) -> Result<Node> {
        let candidates: Vec<_> = tree.positions().into_iter().skip(1).collect();
        if candidates.is_empty() {
            log::warn!("remove subtree on a terminal control, copying");
            return Ok(tree.clone());
        }
        let position = candidates[rng.next_int(candidates.len())?];
        let budget = self.maxdepthfirst.saturating_sub(position.depth);
        let fresh = self.generator.grow(budget, rng)?;
        replace(tree, position.index, fresh)
    }

    /// Resamples every constant in preorder. Sensors and structure are kept.
    fn reparametrization(&self, tree: &Node, rng: &mut dyn RandomSource) -> Result<Node> {
        match tree {
            Node::Const(_) => Ok(Node::Const(self.sensors.pick_constant(rng)?)),
            Node::Sensor(index) => Ok(Node::Sensor(*index)),
            Node::Call { op, args } => {
                let args = args
                    .iter()
                    .map(|a| self.reparametrization(a, rng))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Node::Call { op: *op, args })
            }
        }
    }

    /// Promotes a non-root subtree to be the whole control.
    fn hoist(&self, tree: &Node, rng: &mut dyn RandomSource) -> Result<Node> {
        let count = tree.node_count();
        if count == 1 {
            log::warn!("hoist on a terminal control, copying");
            return Ok(tree.clone());
        }
        let index = 1 + rng.next_int(count - 1)?;
        tree.subtree(index)
            .cloned()
            .ok_or_else(|| GpError::Structural("hoist point out of range".to_string()))
    }

    /// Collapses one operator subtree into a single terminal.
    fn shrink(&self, tree: &Node, rng: &mut dyn RandomSource) -> Result<Node> {
        let candidates: Vec<_> = tree.positions().into_iter().filter(|p| p.is_call).collect();
        if candidates.is_empty() {
            log::warn!("shrink on a terminal control, copying");
            return Ok(tree.clone());
        }
        let position = candidates[rng.next_int(candidates.len())?];
        let terminal = self.generator.terminal(rng)?;
        replace(tree, position.index, terminal)
    }
}

fn replace(tree: &Node, index: usize, replacement: Node) -> Result<Node> {
    tree.with_subtree(index, replacement)
        .ok_or_else(|| GpError::Structural("mutation point out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::gp::GpConfig;
    use crate::config::population::PopulationConfig;
    use crate::engines::generation::parser::parse_control;
    use crate::engines::generation::random::ReplayRandom;
    use crate::engines::generation::renderer::render_control;

    const L3: &str = "(log (/ (* (sin 4.37) (- -8.815 -3.902)) (log (+ 2.025 -8.685))))";

    fn mutate(gp: &GpConfig, text: &str, kind: MutationType, draws: Vec<f64>) -> (String, usize) {
        let sensors = SensorRegistry::new(&PopulationConfig::default()).unwrap();
        let mutator = Mutator::new(TreeGenerator::new(gp, &sensors), &sensors, gp.maxdepthfirst);
        let mut rng = ReplayRandom::new(draws).unwrap();
        let tree = parse_control(text).unwrap();
        let out = mutator.mutate_tree(&tree, kind, &mut rng).unwrap();
        (render_control(&out), rng.remaining())
    }

    #[test]
    fn test_random_choice_order() {
        let mut rng = ReplayRandom::new(vec![0.1, 0.3, 0.6, 0.8]).unwrap();
        let kinds: Vec<_> = (0..4).map(|_| MutationType::random(&mut rng).unwrap()).collect();
        assert_eq!(kinds, MutationType::ALL.to_vec());
    }

    #[test]
    fn test_hoist_positions_skip_root() {
        let gp = GpConfig::default();
        let (out, left) = mutate(&gp, L3, MutationType::Hoist, vec![0.05]);
        assert_eq!(out, "(/ (* (sin 4.37) (- -8.815 -3.902)) (log (+ 2.025 -8.685)))");
        assert_eq!(left, 0);

        let (out, _) = mutate(&gp, L3, MutationType::Hoist, vec![0.2]);
        assert_eq!(out, "(sin 4.37)");
    }

    #[test]
    fn test_terminal_controls_are_copied() {
        let gp = GpConfig::default();
        for kind in [
            MutationType::RemoveSubtreeAndReplace,
            MutationType::Hoist,
            MutationType::Shrink,
        ] {
            let (out, _) = mutate(&gp, "S0", kind, vec![]);
            assert_eq!(out, "S0");
        }
    }

    #[test]
    fn test_shrink_picks_among_operators() {
        let gp = GpConfig::default();
        // operator positions of L3: log / * sin - log +; 0.5 picks sin
        let (out, left) = mutate(&gp, L3, MutationType::Shrink, vec![0.5, 0.9, 0.75]);
        assert_eq!(out, "(log (/ (* 5.0000 (- -8.815 -3.902)) (log (+ 2.025 -8.685))))");
        assert_eq!(left, 0);
    }

    #[test]
    fn test_reparametrization_keeps_sensors() {
        let gp = GpConfig::default();
        let (out, left) = mutate(
            &gp,
            "(+ S0 (* 1.5 S2))",
            MutationType::Reparametrization,
            vec![0.75],
        );
        assert_eq!(out, "(+ S0 (* 5.0000 S2))");
        assert_eq!(left, 0);
    }

    #[test]
    fn test_remove_subtree_respects_depth_budget() {
        let gp = GpConfig {
            maxdepthfirst: 4,
            ..GpConfig::default()
        };
        // position 7 is S0 at depth 4: budget 0, straight to a terminal
        let (out, left) = mutate(
            &gp,
            "(cos (* (+ (* -1.912 -9.178) (cos S0)) 3.113))",
            MutationType::RemoveSubtreeAndReplace,
            vec![0.8, 0.9, 0.75],
        );
        assert_eq!(out, "(cos (* (+ (* -1.912 -9.178) (cos 5.0000)) 3.113))");
        assert_eq!(left, 0);
    }

    #[test]
    fn test_remove_subtree_regrows() {
        let gp = GpConfig {
            maxdepthfirst: 2,
            ..GpConfig::default()
        };
        // position 1 at depth 1: budget 1, no stop (0.5), cos, then S0
        let (out, left) = mutate(
            &gp,
            "(cos (* (+ (* -1.912 -9.178) (cos S0)) 3.113))",
            MutationType::RemoveSubtreeAndReplace,
            vec![0.05, 0.5, 0.6, 0.1, 0.5],
        );
        assert_eq!(out, "(cos (cos S0))");
        assert_eq!(left, 0);
    }
}
