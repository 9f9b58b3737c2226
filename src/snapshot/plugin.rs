use bevy::prelude::*;

use crate::core::plugin::SimulationSet;

use super::{
    components::{SnapshotPublisher, VillageSnapshot},
    systems::publish_snapshot,
};

/// Publishes [`VillageSnapshot`] once the world is built and after every frame.
pub struct SnapshotPlugin;

impl Plugin for SnapshotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VillageSnapshot>()
            .init_resource::<SnapshotPublisher>()
            .add_systems(PostStartup, publish_snapshot)
            .add_systems(Update, publish_snapshot.in_set(SimulationSet::Publish));
    }
}
