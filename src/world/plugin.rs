//! WorldPlugin owns the calendar/fire clock and the resource-node registry.
use bevy::prelude::*;

use crate::{
    core::{plugin::SimulationSet, rng::SimRng},
    world::{
        nodes::{ForestSettings, ResourceWorld},
        time::{advance_world_clock, WorldClock, WorldTimeSettings},
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        let time_settings = WorldTimeSettings::load_or_default();
        info!(
            "World time configured: day length {:.1}s, night {:.1}h-{:.1}h, fire {:.1}h",
            time_settings.seconds_per_day,
            time_settings.night_start_hour,
            time_settings.night_end_hour,
            time_settings.start_fire_hours
        );

        app.insert_resource(WorldClock::new(&time_settings))
            .insert_resource(time_settings)
            .insert_resource(ForestSettings::load_or_default())
            .init_resource::<ResourceWorld>()
            .add_systems(Startup, generate_resource_world)
            .add_systems(Update, advance_world_clock.in_set(SimulationSet::Clock));
    }
}

/// Scatters the forest and herb patches for a new session.
pub fn generate_resource_world(
    settings: Res<ForestSettings>,
    mut rng: ResMut<SimRng>,
    mut world: ResMut<ResourceWorld>,
) {
    *world = ResourceWorld::generate(&settings, &mut *rng);
    let fruiting = world
        .trees()
        .iter()
        .filter(|tree| tree.food_available)
        .count();
    info!(
        "Generated {} trees ({} fruiting) and {} herb plants",
        world.trees().len(),
        fruiting,
        world.plants().len()
    );
}
