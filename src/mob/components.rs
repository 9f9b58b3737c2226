//! Mob identity, AI state and the pack arena.
use std::{f32::consts::FRAC_PI_2, f32::consts::TAU, fmt};

use bevy::prelude::*;
use rand::Rng;
use serde::Serialize;

use crate::meeple::components::MeepleId;

use super::config::MobSettings;

/// Unique identifier for a mob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MobId(u32);

impl MobId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MOB-{:04}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MobState {
    Patrol,
    Wait,
    AttackDash,
    Fleeing,
}

impl MobState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Patrol => "patrol",
            Self::Wait => "wait",
            Self::AttackDash => "attack dash",
            Self::Fleeing => "fleeing",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mob {
    pub id: MobId,
    pub position: Vec3,
    /// Facing in radians; 0 looks along +Z.
    pub angle: f32,
    pub speed: f32,
    pub state: MobState,
    pub wait_timer: f32,
    pub dash_target: Option<Vec3>,
    /// Reserved for target locking; dashes currently aim at a position only.
    pub target_meeple: Option<MeepleId>,
    pub last_hit_time: Option<f32>,
}

impl Mob {
    pub fn new(id: MobId, position: Vec3, angle: f32, speed: f32) -> Self {
        Self {
            id,
            position,
            angle,
            speed,
            state: MobState::Patrol,
            wait_timer: 0.0,
            dash_target: None,
            target_meeple: None,
            last_hit_time: None,
        }
    }
}

/// Arena of mobs addressed by [`MobId`].
#[derive(Resource, Debug, Clone, Default)]
pub struct MobPack {
    mobs: Vec<Mob>,
}

impl MobPack {
    pub fn new(mobs: Vec<Mob>) -> Self {
        Self { mobs }
    }

    /// Spreads the pack evenly around the camp, just outside its edge.
    pub fn spawn(settings: &MobSettings, rng: &mut impl Rng) -> Self {
        let count = settings.count.max(1) as f32;
        let mobs = (0..settings.count)
            .map(|index| {
                let angle = index as f32 / count * TAU;
                let radius = rng.gen_range(settings.spawn_min_radius..=settings.spawn_max_radius);
                Mob::new(
                    MobId::new(settings.id_offset + index),
                    Vec3::new(angle.sin() * radius, 0.0, angle.cos() * radius),
                    angle + FRAC_PI_2,
                    settings.patrol_speed,
                )
            })
            .collect();
        Self { mobs }
    }

    pub fn get(&self, id: MobId) -> Option<&Mob> {
        self.mobs.iter().find(|mob| mob.id == id)
    }

    pub fn get_mut(&mut self, id: MobId) -> Option<&mut Mob> {
        self.mobs.iter_mut().find(|mob| mob.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mob> {
        self.mobs.iter()
    }

    pub fn as_slice(&self) -> &[Mob] {
        &self.mobs
    }

    pub fn as_mut_slice(&mut self) -> &mut [Mob] {
        &mut self.mobs
    }

    pub fn len(&self) -> usize {
        self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobs.is_empty()
    }
}
