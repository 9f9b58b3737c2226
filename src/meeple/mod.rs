//! Meeple module: the villagers, their orders and their per-frame AI.
pub mod commands;
pub mod components;
pub mod config;
pub mod plugin;
pub mod spawning;
pub mod systems;
pub mod timers;

pub use commands::{CommandRejection, PlayerAction, PlayerSelection, SelectionChange, VillageCommands};
pub use components::{ActionTarget, Meeple, MeepleAction, MeepleId, MeepleRoster, Role, Status};
pub use config::MeepleSettings;
pub use plugin::MeeplePlugin;
