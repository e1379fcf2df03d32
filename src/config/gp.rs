use super::traits::ConfigSection;
use crate::error::GpError;
use serde::{Deserialize, Serialize};

/// Tree shape settings for random generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpConfig {
    /// Depth bound for generated trees and for subtrees regrown by mutation.
    pub maxdepthfirst: usize,
    /// Depth until which ramped generation (type 1) forces operators.
    pub mindepth: usize,
    /// Probability of stopping at a terminal where the strategy allows it.
    pub leaf_prob: f64,
}

impl Default for GpConfig {
    fn default() -> Self {
        Self {
            maxdepthfirst: 5,
            mindepth: 2,
            leaf_prob: 0.3,
        }
    }
}

impl ConfigSection for GpConfig {
    fn section_name() -> &'static str {
        "gp"
    }

    fn validate(&self) -> Result<(), GpError> {
        if self.maxdepthfirst == 0 {
            return Err(GpError::Configuration(
                "maxdepthfirst must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.leaf_prob) {
            return Err(GpError::Configuration(
                "leaf_prob must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GpConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = GpConfig {
            maxdepthfirst: 0,
            ..GpConfig::default()
        };
        assert!(matches!(config.validate(), Err(GpError::Configuration(_))));
    }

    #[test]
    fn test_leaf_prob_out_of_range_rejected() {
        let config = GpConfig {
            leaf_prob: 1.2,
            ..GpConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
