//! Economy module: shared stores, the user-facing event log and the chronicle.
pub mod chronicle;
pub mod config;
pub mod events;
pub mod log;
pub mod plugin;
pub mod stockpile;

pub use chronicle::{ChronicleEntry, ChronicleLog, ChronicleRecord, VillageChronicle};
pub use config::EconomySettings;
pub use events::{FireLitEvent, HarvestCompletedEvent};
pub use log::EventLog;
pub use plugin::EconomyPlugin;
pub use stockpile::Stockpile;
