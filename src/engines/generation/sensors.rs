use crate::config::population::PopulationConfig;
use crate::config::traits::ConfigSection;
use crate::engines::generation::random::RandomSource;
use crate::error::{GpError, Result};
use crate::types::{Constant, Node};

/// Terminal selection policy derived from the population section.
#[derive(Debug, Clone)]
pub struct SensorRegistry {
    sensors: usize,
    restricted: Option<Vec<usize>>,
    sensor_prob: f64,
    constant_min: f64,
    constant_max: f64,
    precision: usize,
}

impl SensorRegistry {
    pub fn new(config: &PopulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sensors: config.sensors,
            restricted: config.sensor_spec.then(|| config.sensor_list.clone()),
            sensor_prob: config.sensor_prob,
            constant_min: config.constant_min,
            constant_max: config.constant_max,
            precision: config.constant_precision,
        })
    }

    /// Sensor-vs-constant draw first, then one draw for the index or value.
    pub fn pick_terminal<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Node> {
        if rng.next_uniform()? < self.sensor_prob {
            let index = match &self.restricted {
                Some(list) => list[rng.next_int(list.len())?],
                None => rng.next_int(self.sensors)?,
            };
            Ok(Node::Sensor(index))
        } else {
            Ok(Node::Const(self.pick_constant(rng)?))
        }
    }

    pub fn pick_constant<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Constant> {
        let u = rng.next_uniform()?;
        let value = self.constant_min + u * (self.constant_max - self.constant_min);
        self.constant(value).ok_or_else(|| {
            GpError::Configuration(format!(
                "constant {} cannot be rendered with {} decimals",
                value, self.precision
            ))
        })
    }

    /// Constant rounded to the configured precision, `None` if it would not
    /// render as a finite literal.
    pub fn constant(&self, value: f64) -> Option<Constant> {
        Constant::rounded(value, self.precision)
    }

    pub fn allows(&self, index: usize) -> bool {
        match &self.restricted {
            Some(list) => list.contains(&index),
            None => index < self.sensors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::random::ReplayRandom;

    fn restricted() -> SensorRegistry {
        SensorRegistry::new(&PopulationConfig {
            sensors: 6,
            sensor_spec: true,
            sensor_list: vec![6, 15, 2, 8, 4, 10],
            sensor_prob: 1.0,
            ..PopulationConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_constant_branch_draws_value() {
        let registry = SensorRegistry::new(&PopulationConfig::default()).unwrap();
        let mut rng = ReplayRandom::new(vec![0.5, 0.25]).unwrap();
        let node = registry.pick_terminal(&mut rng).unwrap();
        assert_eq!(node, Node::Const(Constant::from_literal(-5.0, "-5.0000")));
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_sensor_branch_draws_index() {
        let registry = SensorRegistry::new(&PopulationConfig {
            sensors: 4,
            ..PopulationConfig::default()
        })
        .unwrap();
        let mut rng = ReplayRandom::new(vec![0.1, 0.6]).unwrap();
        assert_eq!(registry.pick_terminal(&mut rng).unwrap(), Node::Sensor(2));
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn test_restricted_list_is_indexed() {
        let registry = restricted();
        let mut rng = ReplayRandom::new(vec![0.99, 0.9, 0.0, 0.0]).unwrap();
        assert_eq!(registry.pick_terminal(&mut rng).unwrap(), Node::Sensor(10));
        assert_eq!(registry.pick_terminal(&mut rng).unwrap(), Node::Sensor(6));
        assert!(registry.allows(15));
        assert!(!registry.allows(0));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let config = PopulationConfig {
            sensor_spec: true,
            sensor_list: Vec::new(),
            ..PopulationConfig::default()
        };
        assert!(SensorRegistry::new(&config).is_err());
    }
}
