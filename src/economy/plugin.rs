//! EconomyPlugin owns the stockpile, the event log and the village chronicle.
use bevy::prelude::*;

use crate::core::plugin::SimulationSet;

use super::{
    chronicle::{flush_village_chronicle, record_village_chronicle, ChronicleLog, VillageChronicle},
    config::EconomySettings,
    events::{FireLitEvent, HarvestCompletedEvent},
    log::EventLog,
    stockpile::Stockpile,
};

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        let settings = EconomySettings::load_or_default();
        info!(
            "Economy configured: wood {}, food {}, herbs {}",
            settings.start_wood, settings.start_food, settings.start_herbs
        );

        app.insert_resource(Stockpile::new(
            settings.start_wood,
            settings.start_food,
            settings.start_herbs,
        ))
        .insert_resource(EventLog::with_entry(
            settings.log_capacity,
            settings.welcome_message.clone(),
        ))
        .insert_resource(VillageChronicle::new(settings.chronicle_capacity))
        .insert_resource(ChronicleLog::new(settings.chronicle_path.clone()))
        .insert_resource(settings)
        .add_message::<HarvestCompletedEvent>()
        .add_message::<FireLitEvent>()
        .add_systems(
            Update,
            (record_village_chronicle, flush_village_chronicle)
                .chain()
                .in_set(SimulationSet::Publish),
        );
    }
}
