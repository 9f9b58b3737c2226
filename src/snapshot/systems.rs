use bevy::{ecs::system::SystemParam, prelude::*};
use rand::Rng;

use crate::{
    core::{config::CoreSettings, plugin::SimulationClock, rng::SimRng},
    economy::{log::EventLog, stockpile::Stockpile},
    meeple::{commands::PlayerSelection, components::MeepleRoster},
    mob::components::MobPack,
    world::{nodes::ResourceWorld, time::WorldClock},
};

use super::components::{EconomySnapshot, SnapshotPublisher, VillageSnapshot};

/// The live registries a snapshot copies from.
#[derive(SystemParam)]
pub struct SnapshotSources<'w> {
    clock: Res<'w, SimulationClock>,
    world_clock: Res<'w, WorldClock>,
    roster: Res<'w, MeepleRoster>,
    pack: Res<'w, MobPack>,
    nodes: Res<'w, ResourceWorld>,
    stockpile: Res<'w, Stockpile>,
    log: Res<'w, EventLog>,
    selection: Res<'w, PlayerSelection>,
}

impl SnapshotSources<'_> {
    fn economy(&self) -> EconomySnapshot {
        EconomySnapshot {
            day: self.world_clock.day(),
            hour: self.world_clock.hour(),
            is_night: self.world_clock.is_night(),
            fire_hours_left: self.world_clock.fire_hours_left(),
            wood: self.stockpile.wood(),
            food: self.stockpile.food(),
            herbs: self.stockpile.herbs(),
            population: self.roster.population(),
            logs: self.log.entries().map(str::to_string).collect(),
        }
    }
}

/// Copies the simulation into [`VillageSnapshot`] at the end of the frame.
pub fn publish_snapshot(
    sources: SnapshotSources,
    settings: Res<CoreSettings>,
    mut publisher: ResMut<SnapshotPublisher>,
    mut rng: ResMut<SimRng>,
    mut snapshot: ResMut<VillageSnapshot>,
) {
    snapshot.version = snapshot.version.wrapping_add(1);
    snapshot.frame = sources.clock.frame();
    snapshot.meeples = sources.roster.as_slice().to_vec();
    snapshot.mobs = sources.pack.as_slice().to_vec();
    snapshot.selected = sources.selection.selected;
    snapshot.pending_gather = sources.selection.pending_gather;

    let stores_changed = sources.stockpile.is_changed() || sources.nodes.is_changed();
    let lucky = rng.gen_bool(settings.heavy_refresh_chance);
    if !publisher.needs_heavy_refresh(sources.log.revision(), stores_changed, lucky) {
        return;
    }

    snapshot.economy_version = snapshot.economy_version.wrapping_add(1);
    snapshot.economy = sources.economy();
    snapshot.trees = sources.nodes.trees().to_vec();
    snapshot.plants = sources.nodes.plants().to_vec();
}
