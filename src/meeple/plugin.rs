use bevy::prelude::*;

use crate::core::plugin::SimulationSet;

use super::{
    commands::PlayerSelection,
    config::MeepleSettings,
    spawning::{announce_roster, founding_roster},
    systems::advance_meeples,
    timers::{finish_timed_actions, TimedActionSchedule},
};

/// Registers the villagers, their command state and the per-frame meeple pass.
pub struct MeeplePlugin;

impl Plugin for MeeplePlugin {
    fn build(&self, app: &mut App) {
        let settings = MeepleSettings::load_or_default();
        info!(
            "Meeples configured: speed {:.1}, work {:.1}s",
            settings.base_speed, settings.work_seconds
        );

        app.insert_resource(settings)
            .insert_resource(founding_roster())
            .init_resource::<PlayerSelection>()
            .init_resource::<TimedActionSchedule>()
            .add_systems(Startup, announce_roster)
            .add_systems(
                Update,
                (finish_timed_actions, advance_meeples)
                    .chain()
                    .in_set(SimulationSet::Meeples),
            );
    }
}
