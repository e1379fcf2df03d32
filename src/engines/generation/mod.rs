pub mod random;
pub mod sensors;
pub mod tree;
pub mod parser;
pub mod renderer;
pub mod generator;
pub mod simplify;
pub mod complexity;
pub mod crossover;
pub mod mutation;
pub mod context;
pub mod individual;

pub use context::GpContext;
pub use generator::{IndividualType, TreeGenerator};
pub use individual::Individual;
pub use mutation::{MutationType, Mutator};
pub use parser::{parse_control, parse_individual};
pub use random::{RandomSource, ReplayRandom, SeededRandom};
pub use renderer::{render_control, render_formal, render_individual, Formal};
pub use sensors::SensorRegistry;
pub use tree::Position;
