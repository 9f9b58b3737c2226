//! Mob module: the hostile pack circling the camp.
pub mod components;
pub mod config;
pub mod events;
pub mod plugin;
pub mod systems;

pub use components::{Mob, MobId, MobPack, MobState};
pub use config::MobSettings;
pub use events::MeepleHitEvent;
pub use plugin::MobPlugin;
