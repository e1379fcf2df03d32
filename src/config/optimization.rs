use super::traits::ConfigSection;
use crate::error::GpError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    /// Fold constant-only subtrees after generation.
    pub simplify: bool,
}

impl ConfigSection for OptimizationConfig {
    fn section_name() -> &'static str {
        "optimization"
    }

    fn validate(&self) -> Result<(), GpError> {
        Ok(())
    }
}
