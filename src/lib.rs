//! Medvil: a small village holding out around its campfire.
//!
//! The simulation runs as a set of Bevy plugins. Each frame advances the
//! clock, then the mobs, then the meeples, and finally publishes a
//! [`snapshot::VillageSnapshot`] for whatever renders the village.
use bevy::{app::PluginGroupBuilder, prelude::*};

pub mod core;
pub mod economy;
pub mod meeple;
pub mod mob;
pub mod snapshot;
pub mod world;

use crate::{
    core::CorePlugin, economy::EconomyPlugin, meeple::MeeplePlugin, mob::MobPlugin,
    snapshot::SnapshotPlugin, world::WorldPlugin,
};

/// Every simulation plugin in dependency order.
pub struct VillagePlugins;

impl PluginGroup for VillagePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(CorePlugin::default())
            .add(WorldPlugin)
            .add(EconomyPlugin)
            .add(MobPlugin)
            .add(MeeplePlugin)
            .add(SnapshotPlugin)
    }
}
