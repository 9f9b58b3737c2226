//! Player commands: unit selection, the action buttons and gather clicks.
//!
//! Commands run synchronously against the [`World`] between frames. Every
//! rejection leaves state untouched apart from a single event-log line.
use std::str::FromStr;

use bevy::{
    ecs::system::{SystemParam, SystemState},
    prelude::*,
};
use thiserror::Error;

use crate::{
    economy::{config::EconomySettings, log::EventLog, stockpile::Stockpile},
    world::{
        nodes::{NodeId, ResourceKind},
        spatial::{is_finite_position, CAMP_CENTER},
        time::WorldClock,
    },
};

use super::{
    components::{ActionTarget, Meeple, MeepleAction, MeepleId, MeepleRoster, Status},
    config::MeepleSettings,
    timers::TimedActionSchedule,
};

/// Why a command was refused. The display text is the event-log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandRejection {
    #[error("No unit selected.")]
    NoSelection,
    #[error("Unknown unit {0}.")]
    UnknownUnit(MeepleId),
    #[error("Wait! {0} is busy.")]
    Busy(String),
    #[error("Unit is stunned!")]
    Stunned,
    #[error("Not enough food.")]
    NotEnoughFood,
    #[error("Need herbs.")]
    NeedHerbs,
    #[error("Need {0} wood.")]
    NeedWood(u32),
    #[error("Too tired.")]
    TooTired,
    #[error("No gather order pending.")]
    NoGatherPending,
    #[error("Invalid target position.")]
    InvalidTarget,
    #[error("Unknown action '{0}'.")]
    UnknownAction(String),
}

/// The action buttons offered for a selected unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Eat,
    Sleep,
    Heal,
    Ritual,
    LightFire,
    Gather,
}

impl PlayerAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Eat => "EAT",
            Self::Sleep => "SLEEP",
            Self::Heal => "HEAL",
            Self::Ritual => "RITUAL",
            Self::LightFire => "LIGHT_FIRE",
            Self::Gather => "GATHER",
        }
    }
}

impl FromStr for PlayerAction {
    type Err = CommandRejection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "EAT" => Ok(Self::Eat),
            "SLEEP" => Ok(Self::Sleep),
            "HEAL" => Ok(Self::Heal),
            "RITUAL" => Ok(Self::Ritual),
            "LIGHT_FIRE" => Ok(Self::LightFire),
            "GATHER" => Ok(Self::Gather),
            other => Err(CommandRejection::UnknownAction(other.to_string())),
        }
    }
}

/// Which unit the player is commanding, and whether a gather click is armed.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSelection {
    pub selected: Option<MeepleId>,
    pub pending_gather: bool,
}

/// Result of clicking a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(MeepleId),
    Cleared,
}

/// Everything a command may read or touch.
#[derive(SystemParam)]
pub struct CommandContext<'w> {
    selection: ResMut<'w, PlayerSelection>,
    roster: ResMut<'w, MeepleRoster>,
    stockpile: ResMut<'w, Stockpile>,
    schedule: ResMut<'w, TimedActionSchedule>,
    log: ResMut<'w, EventLog>,
    clock: Res<'w, WorldClock>,
    economy: Res<'w, EconomySettings>,
    settings: Res<'w, MeepleSettings>,
}

impl CommandContext<'_> {
    pub fn select_unit(&mut self, id: MeepleId) -> Result<SelectionChange, CommandRejection> {
        let result = self.try_select(id);
        self.report(result)
    }

    pub fn issue_action(&mut self, name: &str) -> Result<PlayerAction, CommandRejection> {
        let result = name
            .parse::<PlayerAction>()
            .and_then(|action| self.try_action(action).map(|()| action));
        self.report(result)
    }

    pub fn issue_gather_target(
        &mut self,
        node: NodeId,
        resource: ResourceKind,
        position: Vec3,
    ) -> Result<(), CommandRejection> {
        let result = self.try_gather_target(node, resource, position);
        self.report(result)
    }

    fn report<T>(&mut self, result: Result<T, CommandRejection>) -> Result<T, CommandRejection> {
        if let Err(rejection) = &result {
            self.log.push(rejection.to_string());
        }
        result
    }

    fn try_select(&mut self, id: MeepleId) -> Result<SelectionChange, CommandRejection> {
        if self.selection.selected == Some(id) {
            *self.selection = PlayerSelection::default();
            return Ok(SelectionChange::Cleared);
        }

        let meeple = self
            .roster
            .get(id)
            .ok_or(CommandRejection::UnknownUnit(id))?;
        if !meeple.is_idle() && !meeple.is_stunned() {
            return Err(CommandRejection::Busy(meeple.name.clone()));
        }

        self.selection.selected = Some(id);
        self.selection.pending_gather = false;
        Ok(SelectionChange::Selected(id))
    }

    /// Looks up the selected meeple and checks it can take an order.
    fn ready_unit(&self) -> Result<MeepleId, CommandRejection> {
        let id = self.selection.selected.ok_or(CommandRejection::NoSelection)?;
        let meeple = self
            .roster
            .get(id)
            .ok_or(CommandRejection::UnknownUnit(id))?;
        ensure_ready(meeple)?;
        Ok(id)
    }

    fn try_action(&mut self, action: PlayerAction) -> Result<(), CommandRejection> {
        let id = self.ready_unit()?;
        let fire_lit = self.clock.is_fire_lit();
        let Self {
            selection,
            roster,
            stockpile,
            schedule,
            log,
            economy,
            settings,
            ..
        } = self;
        let meeple = roster
            .get_mut(id)
            .ok_or(CommandRejection::UnknownUnit(id))?;

        match action {
            PlayerAction::Eat => {
                if !stockpile.spend(ResourceKind::Food, economy.eat_food_cost) {
                    return Err(CommandRejection::NotEnoughFood);
                }
                meeple.status = Status::Fit;
                start_timed(meeple, MeepleAction::Eating, settings.eat_duration, schedule);
                log.push("Ate food.");
            }
            PlayerAction::Sleep => {
                meeple.status = match (meeple.status, fire_lit) {
                    (Status::Tired, true) => Status::Fit,
                    (Status::Tired, false) => Status::Normal,
                    (Status::Normal, true) => Status::Fit,
                    (status, _) => status,
                };
                start_timed(meeple, MeepleAction::Sleeping, settings.sleep_duration, schedule);
                log.push("Sleeping...");
            }
            PlayerAction::Heal => {
                if !stockpile.spend(ResourceKind::Plants, economy.heal_herb_cost) {
                    return Err(CommandRejection::NeedHerbs);
                }
                meeple.status = Status::Normal;
                start_timed(meeple, MeepleAction::Healing, settings.heal_duration, schedule);
                log.push("Healed.");
            }
            PlayerAction::Ritual => {
                meeple.status = Status::Normal;
                start_timed(meeple, MeepleAction::Ritual, settings.ritual_duration, schedule);
                log.push("Ritual started.");
            }
            PlayerAction::LightFire => {
                let cost = economy.light_fire_wood_cost;
                if !stockpile.spend(ResourceKind::Wood, cost) {
                    return Err(CommandRejection::NeedWood(cost));
                }
                meeple.order_move(CAMP_CENTER, ActionTarget::CampFire, None);
                log.push("Moving to fire...");
            }
            PlayerAction::Gather => {
                if meeple.status == Status::Tired {
                    return Err(CommandRejection::TooTired);
                }
                selection.pending_gather = true;
                log.push("Select resource.");
            }
        }

        Ok(())
    }

    fn try_gather_target(
        &mut self,
        node: NodeId,
        resource: ResourceKind,
        position: Vec3,
    ) -> Result<(), CommandRejection> {
        if !is_finite_position(position) {
            return Err(CommandRejection::InvalidTarget);
        }
        if !self.selection.pending_gather {
            return Err(CommandRejection::NoGatherPending);
        }
        let id = self.ready_unit()?;
        let meeple = self
            .roster
            .get_mut(id)
            .ok_or(CommandRejection::UnknownUnit(id))?;

        meeple.order_move(position, ActionTarget::ResourceNode(node), Some(resource));
        self.selection.pending_gather = false;
        debug!("{} heads for {} ({})", meeple.name, node, resource.label());
        Ok(())
    }
}

fn ensure_ready(meeple: &Meeple) -> Result<(), CommandRejection> {
    if meeple.is_stunned() {
        return Err(CommandRejection::Stunned);
    }
    if !meeple.is_idle() {
        return Err(CommandRejection::Busy(meeple.name.clone()));
    }
    Ok(())
}

fn start_timed(
    meeple: &mut Meeple,
    action: MeepleAction,
    duration: std::time::Duration,
    schedule: &mut TimedActionSchedule,
) {
    meeple.action = action;
    schedule.schedule(meeple.id, action, duration);
}

/// Synchronous command entry points for hosts holding the [`World`].
pub trait VillageCommands {
    fn select_unit(&mut self, id: MeepleId) -> Result<SelectionChange, CommandRejection>;

    /// Issues one of `EAT`, `SLEEP`, `HEAL`, `RITUAL`, `LIGHT_FIRE`, `GATHER`.
    fn issue_action(&mut self, name: &str) -> Result<PlayerAction, CommandRejection>;

    fn issue_gather_target(
        &mut self,
        node: NodeId,
        resource: ResourceKind,
        position: Vec3,
    ) -> Result<(), CommandRejection>;
}

impl VillageCommands for World {
    fn select_unit(&mut self, id: MeepleId) -> Result<SelectionChange, CommandRejection> {
        let mut state = SystemState::<CommandContext>::new(self);
        let result = state.get_mut(self).select_unit(id);
        state.apply(self);
        result
    }

    fn issue_action(&mut self, name: &str) -> Result<PlayerAction, CommandRejection> {
        let mut state = SystemState::<CommandContext>::new(self);
        let result = state.get_mut(self).issue_action(name);
        state.apply(self);
        result
    }

    fn issue_gather_target(
        &mut self,
        node: NodeId,
        resource: ResourceKind,
        position: Vec3,
    ) -> Result<(), CommandRejection> {
        let mut state = SystemState::<CommandContext>::new(self);
        let result = state.get_mut(self).issue_gather_target(node, resource, position);
        state.apply(self);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{meeple::spawning::founding_roster, world::time::WorldTimeSettings};

    fn world_with(stockpile: Stockpile) -> World {
        let mut world = World::new();
        world.insert_resource(founding_roster());
        world.insert_resource(stockpile);
        world.insert_resource(EventLog::with_entry(5, "Welcome"));
        world.insert_resource(WorldClock::new(&WorldTimeSettings::default()));
        world.insert_resource(EconomySettings::default());
        world.insert_resource(MeepleSettings::default());
        world.init_resource::<TimedActionSchedule>();
        world.init_resource::<PlayerSelection>();
        world
    }

    fn latest_log(world: &World) -> String {
        world
            .resource::<EventLog>()
            .latest()
            .unwrap_or_default()
            .to_string()
    }

    fn meeple(world: &World, id: u32) -> Meeple {
        world
            .resource::<MeepleRoster>()
            .get(MeepleId::new(id))
            .cloned()
            .expect("meeple exists")
    }

    #[test]
    fn eat_needs_two_food() {
        let mut world = world_with(Stockpile::new(10, 1, 2));
        world.select_unit(MeepleId::new(2)).expect("select Elara");

        let revision = world.resource::<EventLog>().revision();
        let result = world.issue_action("EAT");

        assert_eq!(result, Err(CommandRejection::NotEnoughFood));
        assert_eq!(latest_log(&world), "Not enough food.");
        assert_eq!(world.resource::<EventLog>().revision(), revision + 1);
        assert_eq!(world.resource::<Stockpile>().food(), 1);
        assert_eq!(meeple(&world, 2).status, Status::Normal);
        assert!(meeple(&world, 2).is_idle());
    }

    #[test]
    fn eat_with_enough_food_feeds_and_busies() {
        let mut world = world_with(Stockpile::new(10, 3, 2));
        world.select_unit(MeepleId::new(2)).expect("select Elara");

        assert_eq!(world.issue_action("EAT"), Ok(PlayerAction::Eat));

        assert_eq!(world.resource::<Stockpile>().food(), 1);
        let elara = meeple(&world, 2);
        assert_eq!(elara.status, Status::Fit);
        assert_eq!(elara.action, MeepleAction::Eating);
        assert_eq!(latest_log(&world), "Ate food.");
        assert!(world
            .resource::<TimedActionSchedule>()
            .is_pending(MeepleId::new(2)));
    }

    #[test]
    fn sleep_by_the_fire_refreshes_the_tired() {
        let mut world = world_with(Stockpile::default());
        world.select_unit(MeepleId::new(3)).expect("select Barnaby");

        world.issue_action("SLEEP").expect("sleep");

        let barnaby = meeple(&world, 3);
        assert_eq!(barnaby.status, Status::Fit);
        assert_eq!(barnaby.action, MeepleAction::Sleeping);
        assert_eq!(latest_log(&world), "Sleeping...");
    }

    #[test]
    fn sleep_in_the_cold_only_rests() {
        let mut world = world_with(Stockpile::default());
        world.insert_resource(WorldClock::new(&WorldTimeSettings::default()).with_fire_hours(0.0));
        world.select_unit(MeepleId::new(3)).expect("select Barnaby");

        world.issue_action("SLEEP").expect("sleep");

        assert_eq!(meeple(&world, 3).status, Status::Normal);
    }

    #[test]
    fn heal_and_light_fire_check_stores() {
        let mut world = world_with(Stockpile::new(4, 0, 0));
        world.select_unit(MeepleId::new(1)).expect("select Haldor");

        assert_eq!(world.issue_action("HEAL"), Err(CommandRejection::NeedHerbs));
        assert_eq!(latest_log(&world), "Need herbs.");
        assert_eq!(
            world.issue_action("LIGHT_FIRE"),
            Err(CommandRejection::NeedWood(5))
        );
        assert_eq!(latest_log(&world), "Need 5 wood.");
        assert_eq!(world.resource::<Stockpile>().wood(), 4);
        assert!(meeple(&world, 1).is_idle());
    }

    #[test]
    fn light_fire_spends_wood_and_walks_to_the_fire() {
        let mut world = world_with(Stockpile::new(10, 0, 0));
        world.select_unit(MeepleId::new(1)).expect("select Haldor");

        world.issue_action("LIGHT_FIRE").expect("light fire");

        let haldor = meeple(&world, 1);
        assert_eq!(world.resource::<Stockpile>().wood(), 5);
        assert_eq!(haldor.action, MeepleAction::Moving);
        assert_eq!(haldor.target, ActionTarget::CampFire);
        assert_eq!(haldor.target_position, Some(CAMP_CENTER));
        assert_eq!(latest_log(&world), "Moving to fire...");
    }

    #[test]
    fn gather_flow_arms_then_orders_a_move() {
        let mut world = world_with(Stockpile::default());
        world.select_unit(MeepleId::new(1)).expect("select Haldor");

        world.issue_action("GATHER").expect("gather");
        assert!(world.resource::<PlayerSelection>().pending_gather);
        assert_eq!(latest_log(&world), "Select resource.");

        let target = Vec3::new(12.0, 0.0, -4.0);
        world
            .issue_gather_target(NodeId::new(105), ResourceKind::Wood, target)
            .expect("gather target");

        let haldor = meeple(&world, 1);
        assert_eq!(haldor.action, MeepleAction::Moving);
        assert_eq!(haldor.target, ActionTarget::ResourceNode(NodeId::new(105)));
        assert_eq!(haldor.target_resource, Some(ResourceKind::Wood));
        assert_eq!(haldor.target_position, Some(target));
        assert!(!world.resource::<PlayerSelection>().pending_gather);
    }

    #[test]
    fn gather_rejects_tired_units_and_bad_targets() {
        let mut world = world_with(Stockpile::default());
        world.select_unit(MeepleId::new(3)).expect("select Barnaby");
        assert_eq!(world.issue_action("GATHER"), Err(CommandRejection::TooTired));
        assert_eq!(latest_log(&world), "Too tired.");

        world.select_unit(MeepleId::new(1)).expect("select Haldor");
        world.issue_action("GATHER").expect("gather");
        let rejected = world.issue_gather_target(
            NodeId::new(105),
            ResourceKind::Wood,
            Vec3::new(f32::NAN, 0.0, 1.0),
        );
        assert_eq!(rejected, Err(CommandRejection::InvalidTarget));
        assert!(world.resource::<PlayerSelection>().pending_gather);
        assert!(meeple(&world, 1).is_idle());
    }

    #[test]
    fn busy_units_cannot_be_selected_or_ordered() {
        let mut world = world_with(Stockpile::new(10, 10, 2));
        world.select_unit(MeepleId::new(1)).expect("select Haldor");
        world.issue_action("RITUAL").expect("ritual");

        assert_eq!(
            world.issue_action("EAT"),
            Err(CommandRejection::Busy("Haldor".to_string()))
        );

        world.select_unit(MeepleId::new(1)).expect("toggle off");
        assert_eq!(world.resource::<PlayerSelection>().selected, None);

        assert_eq!(
            world.select_unit(MeepleId::new(1)),
            Err(CommandRejection::Busy("Haldor".to_string()))
        );
        assert_eq!(latest_log(&world), "Wait! Haldor is busy.");
    }

    #[test]
    fn stunned_units_are_refused() {
        let mut world = world_with(Stockpile::new(10, 10, 2));
        world
            .resource_mut::<MeepleRoster>()
            .get_mut(MeepleId::new(2))
            .expect("Elara")
            .apply_hit(Status::Wounded, 1.0, 0.0);

        assert_eq!(
            world.select_unit(MeepleId::new(2)),
            Ok(SelectionChange::Selected(MeepleId::new(2)))
        );
        assert_eq!(world.issue_action("HEAL"), Err(CommandRejection::Stunned));
        assert_eq!(latest_log(&world), "Unit is stunned!");
        assert_eq!(world.resource::<Stockpile>().herbs(), 2);
    }

    #[test]
    fn unknown_actions_and_missing_selection_are_logged() {
        let mut world = world_with(Stockpile::default());
        assert_eq!(world.issue_action("EAT"), Err(CommandRejection::NoSelection));
        assert_eq!(latest_log(&world), "No unit selected.");

        world.select_unit(MeepleId::new(1)).expect("select Haldor");
        assert_eq!(
            world.issue_action("DANCE"),
            Err(CommandRejection::UnknownAction("DANCE".to_string()))
        );
        assert_eq!(latest_log(&world), "Unknown action 'DANCE'.");
    }
}
