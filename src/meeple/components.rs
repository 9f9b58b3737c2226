//! Meeple identity, status and action state, plus the roster arena.
use std::fmt;

use bevy::prelude::*;
use serde::Serialize;

use crate::world::nodes::{NodeId, ResourceKind};

/// Unique identifier for a meeple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MeepleId(u32);

impl MeepleId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MeepleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MEEPLE-{:04}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Chef,
    Priestess,
    Drunkard,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::Chef => "Chef",
            Self::Priestess => "Priestess",
            Self::Drunkard => "Drunkard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Fit,
    Normal,
    Tired,
    Wounded,
    Infected,
    /// Reserved: nothing in the simulation currently kills a meeple.
    Dead,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fit => "Fit",
            Self::Normal => "Normal",
            Self::Tired => "Tired",
            Self::Wounded => "Wounded",
            Self::Infected => "Infected",
            Self::Dead => "Dead",
        }
    }

    /// Wounded and tired meeples walk slower.
    pub fn is_impaired(self) -> bool {
        matches!(self, Self::Wounded | Self::Tired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeepleAction {
    Idle,
    Moving,
    Returning,
    Chopping,
    Gathering,
    LightingFire,
    Eating,
    Sleeping,
    Healing,
    Ritual,
}

impl MeepleAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Moving => "moving",
            Self::Returning => "returning",
            Self::Chopping => "chopping",
            Self::Gathering => "gathering",
            Self::LightingFire => "lighting fire",
            Self::Eating => "eating",
            Self::Sleeping => "sleeping",
            Self::Healing => "healing",
            Self::Ritual => "ritual",
        }
    }

    /// Timed work resolved by the meeple pass (as opposed to player timers).
    pub fn is_work(self) -> bool {
        matches!(self, Self::Chopping | Self::Gathering | Self::LightingFire)
    }
}

/// What a movement or work order is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActionTarget {
    #[default]
    None,
    ResourceNode(NodeId),
    CampFire,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meeple {
    pub id: MeepleId,
    pub name: String,
    pub role: Role,
    pub color: Color,
    pub status: Status,
    pub position: Vec3,
    pub base_position: Vec3,
    pub action: MeepleAction,
    pub target_position: Option<Vec3>,
    pub target: ActionTarget,
    pub target_resource: Option<ResourceKind>,
    pub action_timer: f32,
    pub stun_timer: f32,
    pub last_hit_time: Option<f32>,
}

impl Meeple {
    /// Creates an idle meeple standing at its home position.
    pub fn new(
        id: MeepleId,
        name: impl Into<String>,
        role: Role,
        status: Status,
        color: Color,
        home: Vec3,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            color,
            status,
            position: home,
            base_position: home,
            action: MeepleAction::Idle,
            target_position: None,
            target: ActionTarget::None,
            target_resource: None,
            action_timer: 0.0,
            stun_timer: 0.0,
            last_hit_time: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.action == MeepleAction::Idle
    }

    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.status == Status::Dead
    }

    /// Mobs only notice meeples that are alive and on their feet.
    pub fn is_targetable(&self) -> bool {
        !self.is_dead() && !self.is_stunned()
    }

    /// True if a hit at `now` falls outside this meeple's hit cooldown.
    pub fn can_be_hit(&self, now: f32, cooldown: f32) -> bool {
        self.is_targetable()
            && self
                .last_hit_time
                .map_or(true, |last| now - last > cooldown)
    }

    /// Sends the meeple walking towards `destination`.
    pub fn order_move(
        &mut self,
        destination: Vec3,
        target: ActionTarget,
        resource: Option<ResourceKind>,
    ) {
        self.action = MeepleAction::Moving;
        self.target_position = Some(destination);
        self.target = target;
        self.target_resource = resource;
        self.action_timer = 0.0;
    }

    /// Drops whatever the meeple was doing and heads home.
    pub fn start_returning(&mut self) {
        self.action = MeepleAction::Returning;
        self.target_position = None;
        self.target = ActionTarget::None;
        self.action_timer = 0.0;
    }

    /// Applies a mob hit: new status, a short freeze, then a retreat home.
    pub fn apply_hit(&mut self, status: Status, stun_seconds: f32, now: f32) {
        self.status = status;
        self.stun_timer = stun_seconds;
        self.last_hit_time = Some(now);
        self.start_returning();
    }
}

/// Arena of meeples addressed by [`MeepleId`].
#[derive(Resource, Debug, Clone, Default)]
pub struct MeepleRoster {
    meeples: Vec<Meeple>,
}

impl MeepleRoster {
    pub fn new(meeples: Vec<Meeple>) -> Self {
        Self { meeples }
    }

    pub fn get(&self, id: MeepleId) -> Option<&Meeple> {
        self.meeples.iter().find(|meeple| meeple.id == id)
    }

    pub fn get_mut(&mut self, id: MeepleId) -> Option<&mut Meeple> {
        self.meeples.iter_mut().find(|meeple| meeple.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Meeple> {
        self.meeples.iter()
    }

    pub fn as_slice(&self) -> &[Meeple] {
        &self.meeples
    }

    pub fn as_mut_slice(&mut self) -> &mut [Meeple] {
        &mut self.meeples
    }

    pub fn len(&self) -> usize {
        self.meeples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meeples.is_empty()
    }

    /// Meeples that are not dead.
    pub fn population(&self) -> usize {
        self.meeples.iter().filter(|meeple| !meeple.is_dead()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn villager() -> Meeple {
        Meeple::new(
            MeepleId::new(7),
            "Tess",
            Role::Chef,
            Status::Normal,
            Color::WHITE,
            Vec3::new(1.0, 0.0, 1.0),
        )
    }

    #[test]
    fn hit_freezes_and_sends_home() {
        let mut meeple = villager();
        meeple.order_move(
            Vec3::new(10.0, 0.0, 0.0),
            ActionTarget::ResourceNode(NodeId::new(105)),
            Some(ResourceKind::Wood),
        );
        assert_eq!(meeple.action, MeepleAction::Moving);
        assert!(meeple.target_position.is_some());

        meeple.apply_hit(Status::Wounded, 1.0, 4.0);

        assert_eq!(meeple.status, Status::Wounded);
        assert_eq!(meeple.action, MeepleAction::Returning);
        assert_eq!(meeple.target, ActionTarget::None);
        assert!(meeple.target_position.is_none());
        assert!(meeple.is_stunned());
        assert!(!meeple.is_targetable());
        assert_eq!(meeple.last_hit_time, Some(4.0));
    }

    #[test]
    fn hit_cooldown_is_per_meeple() {
        let mut meeple = villager();
        assert!(meeple.can_be_hit(0.0, 1.0));

        meeple.last_hit_time = Some(3.0);
        assert!(!meeple.can_be_hit(3.5, 1.0));
        assert!(meeple.can_be_hit(4.1, 1.0));

        meeple.status = Status::Dead;
        assert!(!meeple.can_be_hit(10.0, 1.0));
    }

    #[test]
    fn roster_counts_living_population() {
        let mut roster = MeepleRoster::new(vec![villager()]);
        assert_eq!(roster.population(), 1);
        roster
            .get_mut(MeepleId::new(7))
            .expect("meeple exists")
            .status = Status::Dead;
        assert_eq!(roster.population(), 0);
        assert_eq!(roster.len(), 1);
        assert!(roster.get(MeepleId::new(8)).is_none());
    }
}
