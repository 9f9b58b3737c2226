//! Snapshot module: the versioned, read-only view of the village.
pub mod components;
pub mod plugin;
pub mod systems;

pub use components::{EconomySnapshot, SnapshotPublisher, VillageSnapshot};
pub use plugin::SnapshotPlugin;
