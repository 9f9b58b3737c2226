//! Frame clock, shared configuration helpers and the seeded random source.
pub mod config;
pub mod plugin;
pub mod rng;

pub use config::CoreSettings;
pub use plugin::{CorePlugin, SimulationClock, SimulationSet};
pub use rng::SimRng;
