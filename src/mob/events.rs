//! Messages raised by the mob pass.
use bevy::prelude::{Event, Message};

use crate::meeple::components::{MeepleId, Status};

use super::components::MobId;

/// A mob landed a dash on a meeple.
#[derive(Event, Message, Debug, Clone)]
pub struct MeepleHitEvent {
    pub day: u32,
    pub mob: MobId,
    pub meeple: MeepleId,
    pub status: Status,
    pub time_seconds: f32,
}
