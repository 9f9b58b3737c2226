use bevy::prelude::*;

use crate::{core::plugin::SimulationSet, world::plugin::generate_resource_world};

use super::{
    components::MobPack,
    config::MobSettings,
    events::MeepleHitEvent,
    systems::{advance_mobs, spawn_mob_pack},
};

/// Registers the mob pack and its per-frame AI pass.
pub struct MobPlugin;

impl Plugin for MobPlugin {
    fn build(&self, app: &mut App) {
        let settings = MobSettings::load_or_default();
        info!(
            "Mob pack configured: {} mobs, patrol {:.1}, dash {:.1}",
            settings.count, settings.patrol_speed, settings.dash_speed
        );

        app.insert_resource(settings)
            .init_resource::<MobPack>()
            .add_message::<MeepleHitEvent>()
            .add_systems(Startup, spawn_mob_pack.after(generate_resource_world))
            .add_systems(Update, advance_mobs.in_set(SimulationSet::Mobs));
    }
}
