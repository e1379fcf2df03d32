pub mod traits;
pub mod gp;
pub mod population;
pub mod optimization;
pub mod complexity;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use gp::GpConfig;
pub use population::PopulationConfig;
pub use optimization::OptimizationConfig;
pub use complexity::ComplexityWeights;
