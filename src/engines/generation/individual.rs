use crate::config::complexity::ComplexityWeights;
use crate::engines::generation::complexity::total_complexity;
use crate::engines::generation::context::GpContext;
use crate::engines::generation::crossover::crossover_controls;
use crate::engines::generation::generator::IndividualType;
use crate::engines::generation::mutation::MutationType;
use crate::engines::generation::parser::parse_individual;
use crate::engines::generation::random::RandomSource;
use crate::engines::generation::renderer::{
    render_control, render_formal_individual, render_individual, Formal,
};
use crate::engines::generation::simplify::simplify;
use crate::error::Result;
use crate::types::Node;
use serde::Serialize;

/// One or more control trees with their derived forms.
///
/// The cached `value`, `formal` and `complexity` are computed together from
/// the trees when the individual is built and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Individual {
    controls: Vec<Node>,
    value: String,
    formal: Formal,
    complexity: u32,
}

impl Individual {
    fn from_controls(controls: Vec<Node>, weights: &ComplexityWeights) -> Self {
        let value = render_individual(&controls);
        let formal = render_formal_individual(&controls);
        let complexity = total_complexity(&controls, weights);
        Self {
            controls,
            value,
            formal,
            complexity,
        }
    }

    fn finish<R: RandomSource>(controls: Vec<Node>, ctx: &GpContext<R>) -> Self {
        let controls = if ctx.config().optimization.simplify {
            controls.iter().map(|c| simplify(c, ctx.sensors())).collect()
        } else {
            controls
        };
        Self::from_controls(controls, &ctx.config().complexity)
    }

    /// Builds an individual from `(root ...)` text, one control per expression.
    pub fn from_text<R: RandomSource>(text: &str, ctx: &GpContext<R>) -> Result<Self> {
        let controls = parse_individual(text)?;
        Ok(Self::finish(controls, ctx))
    }

    /// Random individual with `population.controls` controls, generated one
    /// after another.
    pub fn generate<R: RandomSource>(
        kind: IndividualType,
        ctx: &mut GpContext<R>,
    ) -> Result<Self> {
        let count = ctx.config().population.controls;
        let controls = {
            let (generator, rng) = ctx.generator();
            (0..count)
                .map(|_| generator.generate(kind, rng))
                .collect::<Result<Vec<_>>>()?
        };
        Ok(Self::finish(controls, ctx))
    }

    pub fn crossover<R: RandomSource>(
        &self,
        other: &Individual,
        ctx: &mut GpContext<R>,
    ) -> Result<(Individual, Individual)> {
        let (first, second) = crossover_controls(&self.controls, &other.controls, ctx.rng_mut())?;
        let weights = &ctx.config().complexity;
        Ok((
            Self::from_controls(first, weights),
            Self::from_controls(second, weights),
        ))
    }

    pub fn mutate<R: RandomSource>(
        &self,
        kind: MutationType,
        ctx: &mut GpContext<R>,
    ) -> Result<Individual> {
        let controls = {
            let (mutator, rng) = ctx.mutator();
            mutator.mutate_controls(&self.controls, kind, rng)?
        };
        Ok(Self::from_controls(controls, &ctx.config().complexity))
    }

    /// Draws the strategy first, then mutates with it.
    pub fn mutate_random<R: RandomSource>(&self, ctx: &mut GpContext<R>) -> Result<Individual> {
        let kind = MutationType::random(ctx.rng_mut())?;
        self.mutate(kind, ctx)
    }

    pub fn compare(&self, other: &Individual) -> bool {
        self.value == other.value
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn formal(&self) -> &Formal {
        &self.formal
    }

    pub fn complexity(&self) -> u32 {
        self.complexity
    }

    pub fn controls(&self) -> &[Node] {
        &self.controls
    }

    pub fn control_values(&self) -> Vec<String> {
        self.controls.iter().map(render_control).collect()
    }

    pub fn depth(&self) -> usize {
        self.controls.iter().map(Node::depth).max().unwrap_or(0)
    }
}
