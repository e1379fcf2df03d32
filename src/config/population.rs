use super::traits::ConfigSection;
use crate::error::GpError;
use serde::{Deserialize, Serialize};

/// Upper bound on `constant_precision`.
pub const MAX_CONSTANT_PRECISION: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Number of control expressions per individual.
    pub controls: usize,
    /// Sensors `S0..S{sensors-1}` available when no restricted list is active.
    pub sensors: usize,
    /// Restrict sensor draws to `sensor_list`.
    pub sensor_spec: bool,
    pub sensor_list: Vec<usize>,
    /// Probability that a terminal draw yields a sensor rather than a constant.
    pub sensor_prob: f64,
    pub constant_min: f64,
    pub constant_max: f64,
    /// Decimals kept on drawn and folded constants.
    pub constant_precision: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            controls: 1,
            sensors: 1,
            sensor_spec: false,
            sensor_list: Vec::new(),
            sensor_prob: 0.33,
            constant_min: -10.0,
            constant_max: 10.0,
            constant_precision: 4,
        }
    }
}

impl ConfigSection for PopulationConfig {
    fn section_name() -> &'static str {
        "population"
    }

    fn validate(&self) -> Result<(), GpError> {
        if self.controls == 0 {
            return Err(GpError::Configuration(
                "controls must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.sensor_prob) {
            return Err(GpError::Configuration(
                "sensor_prob must be between 0 and 1".to_string(),
            ));
        }
        if self.sensor_spec && self.sensor_list.is_empty() {
            return Err(GpError::Configuration(
                "sensor_list must not be empty when sensor_spec is enabled".to_string(),
            ));
        }
        if self.sensor_prob > 0.0 && !self.sensor_spec && self.sensors == 0 {
            return Err(GpError::Configuration(
                "sensor_prob is positive but no sensors are configured".to_string(),
            ));
        }
        if !self.constant_min.is_finite() || !self.constant_max.is_finite() {
            return Err(GpError::Configuration(
                "constant_min and constant_max must be finite".to_string(),
            ));
        }
        if self.constant_precision > MAX_CONSTANT_PRECISION {
            return Err(GpError::Configuration(format!(
                "constant_precision must be at most {}",
                MAX_CONSTANT_PRECISION
            )));
        }
        let scale = 10f64.powi(self.constant_precision as i32);
        let widest = self.constant_min.abs().max(self.constant_max.abs());
        if !(self.constant_max - self.constant_min).is_finite() || !(widest * scale).is_finite() {
            return Err(GpError::Configuration(
                "constant range is too wide for constant_precision".to_string(),
            ));
        }
        if !(self.constant_min < self.constant_max) {
            return Err(GpError::Configuration(
                "constant_min must be lower than constant_max".to_string(),
            ));
        }
        Ok(())
    }
}
