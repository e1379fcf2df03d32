use crate::config::AppConfig;
use crate::engines::generation::generator::TreeGenerator;
use crate::engines::generation::mutation::Mutator;
use crate::engines::generation::random::RandomSource;
use crate::engines::generation::sensors::SensorRegistry;
use crate::error::Result;

/// Everything one experiment run needs: a validated configuration snapshot,
/// the terminal policy derived from it, and the run's own random source.
///
/// Contexts are never shared. Concurrent experiments each build their own,
/// so their draw sequences cannot interleave.
#[derive(Debug)]
pub struct GpContext<R: RandomSource> {
    config: AppConfig,
    sensors: SensorRegistry,
    rng: R,
}

impl<R: RandomSource> GpContext<R> {
    pub fn new(config: AppConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let sensors = SensorRegistry::new(&config.population)?;
        Ok(Self {
            config,
            sensors,
            rng,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sensors(&self) -> &SensorRegistry {
        &self.sensors
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    /// Generator and random source borrowed together.
    pub(crate) fn generator(&mut self) -> (TreeGenerator<'_>, &mut R) {
        (TreeGenerator::new(&self.config.gp, &self.sensors), &mut self.rng)
    }

    pub(crate) fn mutator(&mut self) -> (Mutator<'_>, &mut R) {
        let generator = TreeGenerator::new(&self.config.gp, &self.sensors);
        let mutator = Mutator::new(generator, &self.sensors, self.config.gp.maxdepthfirst);
        (mutator, &mut self.rng)
    }
}
