use super::{
    complexity::ComplexityWeights,
    gp::GpConfig,
    optimization::OptimizationConfig,
    population::PopulationConfig,
    traits::ConfigSection,
};
use crate::error::GpError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gp: GpConfig,
    pub population: PopulationConfig,
    pub optimization: OptimizationConfig,
    pub complexity: ComplexityWeights,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GpError> {
        self.gp.validate()?;
        self.population.validate()?;
        self.optimization.validate()?;
        self.complexity.validate()?;
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, GpError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| GpError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Shared, editable configuration. Operations never read it directly: they
/// take a validated snapshot through [`ConfigManager::get`].
#[derive(Debug, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a TOML or JSON file, picked by extension.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GpError::Configuration(format!(
                "Failed to read config: {} does not exist",
                path.display()
            )));
        }

        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| GpError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        self.replace(config);
        Ok(())
    }

    pub fn load_from_str(&self, contents: &str) -> Result<(), GpError> {
        let config = AppConfig::from_toml_str(contents)?;
        self.replace(config);
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GpError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| GpError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| GpError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Applies `f` to a copy and commits it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), GpError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.get();
        f(&mut config);
        config.validate()?;
        self.replace(config);
        Ok(())
    }

    fn replace(&self, config: AppConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }
}
