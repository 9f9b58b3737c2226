//! Read-only views of the simulation handed to the render and UI layers.
use bevy::prelude::*;
use serde::Serialize;

use crate::{
    meeple::components::{Meeple, MeepleId},
    mob::components::Mob,
    world::nodes::{PlantNode, TreeNode},
};

/// Calendar, fire and stores as last published.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EconomySnapshot {
    pub day: u32,
    pub hour: f32,
    pub is_night: bool,
    pub fire_hours_left: f32,
    pub wood: u32,
    pub food: u32,
    pub herbs: u32,
    pub population: usize,
    /// Newest first.
    pub logs: Vec<String>,
}

/// Point-in-time copy of the simulation.
///
/// Units and selection are refreshed every frame. The economy and resource
/// nodes change rarely and are only republished when something happened or
/// on an occasional random refresh, so they may lag a few frames behind the
/// clock; `economy_version` tells consumers when they moved.
#[derive(Resource, Debug, Clone, Default)]
pub struct VillageSnapshot {
    pub version: u64,
    pub frame: u64,
    pub meeples: Vec<Meeple>,
    pub mobs: Vec<Mob>,
    pub selected: Option<MeepleId>,
    pub pending_gather: bool,
    pub economy_version: u64,
    pub economy: EconomySnapshot,
    pub trees: Vec<TreeNode>,
    pub plants: Vec<PlantNode>,
}

impl VillageSnapshot {
    pub fn meeple(&self, id: MeepleId) -> Option<&Meeple> {
        self.meeples.iter().find(|meeple| meeple.id == id)
    }
}

/// Bookkeeping for deciding when the heavy half of the snapshot is stale.
#[derive(Resource, Debug, Clone, Default)]
pub struct SnapshotPublisher {
    last_log_revision: Option<u64>,
}

impl SnapshotPublisher {
    /// True when the economy half should be republished this frame. The first
    /// call always publishes.
    pub fn needs_heavy_refresh(&mut self, log_revision: u64, stores_changed: bool, lucky: bool) -> bool {
        let log_moved = self.last_log_revision != Some(log_revision);
        self.last_log_revision = Some(log_revision);
        log_moved || stores_changed || lucky
    }
}
