//! Meeple AI: walking, local tree avoidance and timed work at resource nodes.
use bevy::prelude::*;

use crate::{
    core::plugin::SimulationClock,
    economy::{
        config::EconomySettings,
        events::{FireLitEvent, HarvestCompletedEvent},
        log::EventLog,
        stockpile::Stockpile,
    },
    world::{
        nodes::{NodeId, ResourceKind, ResourceWorld, TreeNode},
        spatial::planar_offset,
        time::WorldClock,
    },
};

use super::{
    components::{ActionTarget, Meeple, MeepleAction, MeepleRoster, Status},
    config::MeepleSettings,
};

/// Work that ran its full duration this frame and is ready to pay out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkOrder {
    pub action: MeepleAction,
    pub target: ActionTarget,
    pub resource: Option<ResourceKind>,
    /// Status at the moment the work finished; decides the yield bonus.
    pub status: Status,
}

/// What a finished work order produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkYield {
    FireLit {
        hours_added: f32,
    },
    Harvest {
        node: NodeId,
        resource: ResourceKind,
        quantity: u32,
    },
}

/// Advances one meeple by `dt` simulated seconds.
///
/// Stunned meeples only count down their stun. Returns a [`WorkOrder`] when
/// chopping, gathering or fire lighting completes; the meeple is already
/// heading home by then.
pub fn step_meeple(
    meeple: &mut Meeple,
    trees: &[TreeNode],
    dt: f32,
    settings: &MeepleSettings,
) -> Option<WorkOrder> {
    if meeple.is_dead() {
        return None;
    }
    if meeple.is_stunned() {
        meeple.stun_timer = (meeple.stun_timer - dt).max(0.0);
        return None;
    }

    match meeple.action {
        MeepleAction::Moving | MeepleAction::Returning => {
            walk(meeple, trees, dt, settings);
            None
        }
        action if action.is_work() => {
            meeple.action_timer += dt;
            if meeple.action_timer <= settings.work_seconds {
                return None;
            }
            let order = WorkOrder {
                action,
                target: meeple.target,
                resource: meeple.target_resource,
                status: meeple.status,
            };
            meeple.start_returning();
            Some(order)
        }
        _ => None,
    }
}

fn walk(meeple: &mut Meeple, trees: &[TreeNode], dt: f32, settings: &MeepleSettings) {
    let (destination, arrival) = if meeple.action == MeepleAction::Returning {
        (meeple.base_position, settings.return_arrival_distance)
    } else {
        let Some(destination) = meeple.target_position else {
            meeple.start_returning();
            return;
        };
        let arrival = if meeple.target == ActionTarget::CampFire {
            settings.return_arrival_distance
        } else {
            settings.gather_arrival_distance
        };
        (destination, arrival)
    };

    let distance = planar_offset(meeple.position, destination).length();
    if distance < arrival {
        arrive(meeple);
        return;
    }

    let mut direction = planar_offset(meeple.position, destination)
        .try_normalize()
        .unwrap_or(Vec2::ZERO);

    if distance > settings.avoidance_engage_distance && settings.tree_avoid_radius > 0.0 {
        for tree in trees {
            if meeple.target == ActionTarget::ResourceNode(tree.id) {
                continue;
            }
            let gap = planar_offset(meeple.position, tree.position).length();
            if gap < settings.tree_avoid_radius {
                let push = (settings.tree_avoid_radius - gap) / settings.tree_avoid_radius;
                direction +=
                    planar_offset(tree.position, meeple.position) * push * settings.tree_push_strength;
            }
        }
    }

    let Some(heading) = direction.try_normalize() else {
        return;
    };
    let factor = if meeple.status.is_impaired() {
        settings.impaired_speed_factor
    } else {
        1.0
    };
    let step = heading * settings.base_speed * factor * dt;
    let next = meeple.position + Vec3::new(step.x, 0.0, step.y);
    if next.is_finite() {
        meeple.position = next;
    }
}

fn arrive(meeple: &mut Meeple) {
    if meeple.action == MeepleAction::Returning {
        meeple.position = meeple.base_position;
        meeple.action = MeepleAction::Idle;
        return;
    }

    meeple.action = match (meeple.target, meeple.target_resource) {
        (ActionTarget::CampFire, _) => MeepleAction::LightingFire,
        (_, Some(ResourceKind::Wood)) => MeepleAction::Chopping,
        _ => MeepleAction::Gathering,
    };
    meeple.action_timer = 0.0;
}

/// Pays out a finished work order against the live world. Depletable nodes
/// pay once; a second meeple finishing on the same node gets nothing.
pub fn resolve_work(
    order: &WorkOrder,
    world: &mut ResourceWorld,
    stockpile: &mut Stockpile,
    clock: &mut WorldClock,
    economy: &EconomySettings,
) -> Option<WorkYield> {
    if order.action == MeepleAction::LightingFire {
        clock.add_fuel(economy.fire_hours_per_lighting);
        return Some(WorkYield::FireLit {
            hours_added: economy.fire_hours_per_lighting,
        });
    }

    let ActionTarget::ResourceNode(node) = order.target else {
        return None;
    };
    let resource = order.resource?;
    if !world.take(node, resource) {
        return None;
    }

    let bonus = if order.status == Status::Fit {
        economy.fit_bonus
    } else {
        1
    };
    let quantity = economy.yield_of(resource).saturating_mul(bonus);
    stockpile.add(resource, quantity);

    Some(WorkYield::Harvest {
        node,
        resource,
        quantity,
    })
}

fn harvest_line(name: &str, resource: ResourceKind) -> String {
    let noun = match resource {
        ResourceKind::Wood => "wood",
        ResourceKind::Food => "apples",
        ResourceKind::Plants => "herbs",
    };
    format!("{} got {}.", name, noun)
}

/// Moves every meeple and settles any finished work.
#[allow(clippy::too_many_arguments)]
pub fn advance_meeples(
    sim_clock: Res<SimulationClock>,
    settings: Res<MeepleSettings>,
    economy: Res<EconomySettings>,
    mut roster: ResMut<MeepleRoster>,
    mut world: ResMut<ResourceWorld>,
    mut stockpile: ResMut<Stockpile>,
    mut clock: ResMut<WorldClock>,
    mut log: ResMut<EventLog>,
    mut harvests: MessageWriter<HarvestCompletedEvent>,
    mut fires: MessageWriter<FireLitEvent>,
) {
    let dt = sim_clock.step_seconds();

    for meeple in roster.as_mut_slice() {
        let before = meeple.action;
        let order = step_meeple(meeple, world.trees(), dt, &settings);

        if meeple.action != before && order.is_none() {
            debug!(
                "{} goes from {} to {}",
                meeple.name,
                before.label(),
                meeple.action.label()
            );
        }

        let Some(order) = order else {
            continue;
        };

        match resolve_work(&order, &mut world, &mut stockpile, &mut clock, &economy) {
            Some(WorkYield::FireLit { hours_added }) => {
                log.push("Fire lit.");
                info!(
                    "{} lit the campfire ({:.1}h of fuel left)",
                    meeple.name,
                    clock.fire_hours_left()
                );
                fires.write(FireLitEvent {
                    day: clock.day(),
                    meeple: meeple.id,
                    hours_added,
                    hours_left: clock.fire_hours_left(),
                });
            }
            Some(WorkYield::Harvest {
                node,
                resource,
                quantity,
            }) => {
                log.push(harvest_line(&meeple.name, resource));
                harvests.write(HarvestCompletedEvent {
                    day: clock.day(),
                    meeple: meeple.id,
                    node,
                    resource,
                    quantity,
                });
            }
            None => {
                debug!(
                    "{} found nothing left at {:?}",
                    meeple.name, order.target
                );
            }
        }
    }
}
