//! Mob AI: patrol rings around the camp, opportunistic dashes and retreats.
use bevy::prelude::*;
use rand::Rng;

use crate::{
    core::{plugin::SimulationClock, rng::SimRng},
    economy::log::EventLog,
    meeple::{
        components::{Meeple, MeepleId, MeepleRoster, Status},
        timers::TimedActionSchedule,
    },
    world::{
        spatial::{
            distance_from_camp, heading_angle, heading_vector, outward_from_camp, planar_offset,
            within_vision_cone,
        },
        time::WorldClock,
    },
};

use super::{
    components::{Mob, MobPack, MobState},
    config::MobSettings,
    events::MeepleHitEvent,
};

/// The ring mobs keep to for the current light conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolBand {
    pub exclusion: f32,
    pub outer: f32,
}

impl PatrolBand {
    /// A lit fire keeps mobs at a middle distance; a dark night with no fire
    /// lets them creep close.
    pub fn for_conditions(settings: &MobSettings, fire_lit: bool, is_night: bool) -> Self {
        let exclusion = if fire_lit {
            settings.fire_exclusion_radius
        } else if is_night {
            settings.dark_exclusion_radius
        } else {
            settings.day_exclusion_radius
        };
        Self {
            exclusion,
            outer: exclusion + settings.outer_margin,
        }
    }

    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.exclusion && distance <= self.outer
    }
}

/// Inputs shared by every mob during one frame.
#[derive(Debug, Clone, Copy)]
pub struct MobFrame {
    pub band: PatrolBand,
    pub is_night: bool,
    /// Simulated seconds since session start, used for hit cooldowns.
    pub now: f32,
    pub dt: f32,
}

/// Something a mob did to a meeple this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MobEncounter {
    Spotted { meeple: MeepleId, name: String },
    Hit { meeple: MeepleId, name: String, status: Status },
}

/// Advances one mob by one frame, mutating any meeples it hits.
pub fn step_mob(
    mob: &mut Mob,
    meeples: &mut [Meeple],
    frame: &MobFrame,
    settings: &MobSettings,
    rng: &mut impl Rng,
) -> Vec<MobEncounter> {
    let mut encounters = Vec::new();

    match mob.state {
        MobState::Wait => {
            mob.wait_timer -= frame.dt;
            if mob.wait_timer <= 0.0 {
                mob.wait_timer = 0.0;
                mob.state = MobState::Patrol;
            }
        }
        MobState::AttackDash => {
            let Some(target) = mob.dash_target else {
                mob.state = MobState::Patrol;
                return encounters;
            };

            let offset = planar_offset(mob.position, target);
            let distance = offset.length();
            if distance < settings.dash_arrival_distance {
                resolve_dash_hits(mob, meeples, frame, settings, rng, &mut encounters);
                mob.state = MobState::Fleeing;
                mob.dash_target = None;
            } else {
                let step = (settings.dash_speed * frame.dt).min(distance);
                let direction = offset / distance;
                translate(mob, direction * step);
                mob.angle = heading_angle(direction);
            }
        }
        MobState::Fleeing => {
            if distance_from_camp(mob.position) > frame.band.outer - settings.flee_clearance {
                mob.state = MobState::Patrol;
                return encounters;
            }
            let outward = outward_from_camp(mob.position).unwrap_or_else(|| heading_vector(mob.angle));
            let speed = settings.dash_speed * settings.flee_speed_factor;
            translate(mob, outward * speed * frame.dt);
            mob.angle = heading_angle(outward);
        }
        MobState::Patrol => {
            if let Some(meeple) = meeples.iter().find(|meeple| {
                meeple.is_targetable()
                    && planar_offset(mob.position, meeple.position).length()
                        < settings.aggro_distance
                    && within_vision_cone(
                        mob.position,
                        mob.angle,
                        meeple.position,
                        settings.aggro_cone_cosine,
                    )
            }) {
                mob.state = MobState::AttackDash;
                mob.dash_target = Some(meeple.position);
                encounters.push(MobEncounter::Spotted {
                    meeple: meeple.id,
                    name: meeple.name.clone(),
                });
                return encounters;
            }

            patrol(mob, frame, settings, rng);
        }
    }

    encounters
}

fn patrol(mob: &mut Mob, frame: &MobFrame, settings: &MobSettings, rng: &mut impl Rng) {
    let distance = distance_from_camp(mob.position);
    let radial = outward_from_camp(mob.position).unwrap_or_else(|| heading_vector(mob.angle));
    let tangent = Vec2::new(-radial.y, radial.x);

    let movement = if distance < frame.band.exclusion {
        radial
    } else if distance > frame.band.outer {
        tangent * settings.spiral_tangent_weight - radial * settings.spiral_radial_weight
    } else {
        if rng.gen_bool(settings.wait_chance) {
            mob.state = MobState::Wait;
            mob.wait_timer = rng.gen_range(settings.wait_min_seconds..=settings.wait_max_seconds);
            mob.angle = heading_angle(-radial);
            return;
        }
        let jitter = settings.orbit_jitter;
        tangent
            + Vec2::new(
                (rng.gen::<f32>() - 0.5) * jitter,
                (rng.gen::<f32>() - 0.5) * jitter,
            )
    };

    let Some(direction) = movement.try_normalize() else {
        return;
    };
    translate(mob, direction * mob.speed * frame.dt);
    mob.angle = heading_angle(direction);
}

fn resolve_dash_hits(
    mob: &mut Mob,
    meeples: &mut [Meeple],
    frame: &MobFrame,
    settings: &MobSettings,
    rng: &mut impl Rng,
    encounters: &mut Vec<MobEncounter>,
) {
    for meeple in meeples.iter_mut() {
        if !meeple.can_be_hit(frame.now, settings.hit_cooldown_seconds) {
            continue;
        }
        if planar_offset(mob.position, meeple.position).length() >= settings.hit_radius {
            continue;
        }

        let status = if frame.is_night && rng.gen_bool(settings.night_infection_chance) {
            Status::Infected
        } else {
            Status::Wounded
        };
        meeple.apply_hit(status, settings.stun_seconds, frame.now);
        mob.last_hit_time = Some(frame.now);
        encounters.push(MobEncounter::Hit {
            meeple: meeple.id,
            name: meeple.name.clone(),
            status,
        });
    }
}

fn translate(mob: &mut Mob, delta: Vec2) {
    let next = mob.position + Vec3::new(delta.x, 0.0, delta.y);
    if next.is_finite() {
        mob.position = next;
    }
}

/// Places the pack around the camp once the forest exists.
pub fn spawn_mob_pack(
    settings: Res<MobSettings>,
    mut rng: ResMut<SimRng>,
    mut pack: ResMut<MobPack>,
) {
    *pack = MobPack::spawn(&settings, &mut *rng);
    info!("{} mobs prowl beyond the camp", pack.len());
}

/// Runs every mob for this frame, before meeples move.
#[allow(clippy::too_many_arguments)]
pub fn advance_mobs(
    sim_clock: Res<SimulationClock>,
    world_clock: Res<WorldClock>,
    settings: Res<MobSettings>,
    mut pack: ResMut<MobPack>,
    mut roster: ResMut<MeepleRoster>,
    mut rng: ResMut<SimRng>,
    mut schedule: ResMut<TimedActionSchedule>,
    mut log: ResMut<EventLog>,
    mut hits: MessageWriter<MeepleHitEvent>,
) {
    let frame = MobFrame {
        band: PatrolBand::for_conditions(
            &settings,
            world_clock.is_fire_lit(),
            world_clock.is_night(),
        ),
        is_night: world_clock.is_night(),
        now: sim_clock.elapsed_seconds(),
        dt: sim_clock.step_seconds(),
    };

    for mob in pack.as_mut_slice() {
        let before = mob.state;
        let encounters = step_mob(mob, roster.as_mut_slice(), &frame, &settings, &mut *rng);

        if mob.state != before {
            debug!(
                "{} switches from {} to {}",
                mob.id,
                before.label(),
                mob.state.label()
            );
        }

        for encounter in encounters {
            match encounter {
                MobEncounter::Spotted { name, .. } => {
                    log.push(format!("Mob spotted {}! Dashing!", name));
                }
                MobEncounter::Hit {
                    meeple,
                    name,
                    status,
                } => {
                    schedule.cancel(meeple);
                    log.push(format!("{} STUNNED! Fleeing...", name));
                    hits.write(MeepleHitEvent {
                        day: world_clock.day(),
                        mob: mob.id,
                        meeple,
                        status,
                        time_seconds: frame.now,
                    });
                }
            }
        }
    }
}
