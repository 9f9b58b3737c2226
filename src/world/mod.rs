//! World module: calendar and fire clock, spatial helpers and resource nodes.
pub mod nodes;
pub mod plugin;
pub mod spatial;
pub mod time;

pub use nodes::{NodeId, PlantNode, ResourceKind, ResourceWorld, TreeNode};
pub use plugin::WorldPlugin;
pub use time::{WorldClock, WorldTimeSettings};
