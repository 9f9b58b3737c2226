use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::load_or_default;

const CONFIG_PATH: &str = "config/mobs.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawMobConfig {
    #[serde(default)]
    pack: RawPack,
    #[serde(default)]
    movement: RawMovement,
    #[serde(default)]
    aggro: RawAggro,
    #[serde(default)]
    radii: RawRadii,
    #[serde(default)]
    patrol: RawPatrol,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPack {
    count: u32,
    id_offset: u32,
    spawn_min_radius: f32,
    spawn_max_radius: f32,
}

impl Default for RawPack {
    fn default() -> Self {
        Self {
            count: 6,
            id_offset: 1000,
            spawn_min_radius: 11.0,
            spawn_max_radius: 14.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMovement {
    patrol_speed: f32,
    dash_speed: f32,
    flee_speed_factor: f32,
}

impl Default for RawMovement {
    fn default() -> Self {
        Self {
            patrol_speed: 1.8,
            dash_speed: 8.0,
            flee_speed_factor: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawAggro {
    distance: f32,
    cone_cosine: f32,
    dash_arrival_distance: f32,
    hit_radius: f32,
    hit_cooldown_seconds: f32,
    stun_seconds: f32,
    night_infection_chance: f64,
}

impl Default for RawAggro {
    fn default() -> Self {
        Self {
            distance: 2.5,
            cone_cosine: 0.75,
            dash_arrival_distance: 0.5,
            hit_radius: 1.5,
            hit_cooldown_seconds: 1.0,
            stun_seconds: 1.0,
            night_infection_chance: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawRadii {
    day_exclusion: f32,
    fire_exclusion: f32,
    dark_exclusion: f32,
    outer_margin: f32,
    flee_clearance: f32,
}

impl Default for RawRadii {
    fn default() -> Self {
        Self {
            day_exclusion: 13.0,
            fire_exclusion: 10.0,
            dark_exclusion: 5.5,
            outer_margin: 5.0,
            flee_clearance: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPatrol {
    wait_chance: f64,
    wait_min_seconds: f32,
    wait_max_seconds: f32,
    orbit_jitter: f32,
    spiral_tangent_weight: f32,
    spiral_radial_weight: f32,
}

impl Default for RawPatrol {
    fn default() -> Self {
        Self {
            wait_chance: 0.005,
            wait_min_seconds: 1.0,
            wait_max_seconds: 3.0,
            orbit_jitter: 0.2,
            spiral_tangent_weight: 0.7,
            spiral_radial_weight: 0.3,
        }
    }
}

/// Mob behaviour tuning from `config/mobs.toml`.
#[derive(Resource, Debug, Clone)]
pub struct MobSettings {
    pub count: u32,
    pub id_offset: u32,
    pub spawn_min_radius: f32,
    pub spawn_max_radius: f32,
    pub patrol_speed: f32,
    pub dash_speed: f32,
    pub flee_speed_factor: f32,
    pub aggro_distance: f32,
    pub aggro_cone_cosine: f32,
    pub dash_arrival_distance: f32,
    pub hit_radius: f32,
    pub hit_cooldown_seconds: f32,
    pub stun_seconds: f32,
    pub night_infection_chance: f64,
    pub day_exclusion_radius: f32,
    pub fire_exclusion_radius: f32,
    pub dark_exclusion_radius: f32,
    pub outer_margin: f32,
    pub flee_clearance: f32,
    pub wait_chance: f64,
    pub wait_min_seconds: f32,
    pub wait_max_seconds: f32,
    pub orbit_jitter: f32,
    pub spiral_tangent_weight: f32,
    pub spiral_radial_weight: f32,
}

impl MobSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawMobConfig>(CONFIG_PATH).into()
    }
}

impl Default for MobSettings {
    fn default() -> Self {
        RawMobConfig::default().into()
    }
}

impl From<RawMobConfig> for MobSettings {
    fn from(value: RawMobConfig) -> Self {
        let pack = value.pack;
        let movement = value.movement;
        let aggro = value.aggro;
        let radii = value.radii;
        let patrol = value.patrol;

        let spawn_min = finite_or(pack.spawn_min_radius, 0.0).max(0.0);
        let spawn_max = finite_or(pack.spawn_max_radius, spawn_min).max(spawn_min);
        let wait_min = finite_or(patrol.wait_min_seconds, 0.0).max(0.0);
        let wait_max = finite_or(patrol.wait_max_seconds, wait_min).max(wait_min);

        Self {
            count: pack.count,
            id_offset: pack.id_offset,
            spawn_min_radius: spawn_min,
            spawn_max_radius: spawn_max,
            patrol_speed: finite_or(movement.patrol_speed, 0.0).max(0.0),
            dash_speed: finite_or(movement.dash_speed, 0.0).max(0.0),
            flee_speed_factor: finite_or(movement.flee_speed_factor, 0.0).max(0.0),
            aggro_distance: finite_or(aggro.distance, 0.0).max(0.0),
            aggro_cone_cosine: finite_or(aggro.cone_cosine, 1.0).clamp(-1.0, 1.0),
            dash_arrival_distance: finite_or(aggro.dash_arrival_distance, 0.5).max(0.01),
            hit_radius: finite_or(aggro.hit_radius, 0.0).max(0.0),
            hit_cooldown_seconds: finite_or(aggro.hit_cooldown_seconds, 0.0).max(0.0),
            stun_seconds: finite_or(aggro.stun_seconds, 0.0).max(0.0),
            night_infection_chance: probability(aggro.night_infection_chance),
            day_exclusion_radius: finite_or(radii.day_exclusion, 0.0).max(0.0),
            fire_exclusion_radius: finite_or(radii.fire_exclusion, 0.0).max(0.0),
            dark_exclusion_radius: finite_or(radii.dark_exclusion, 0.0).max(0.0),
            outer_margin: finite_or(radii.outer_margin, 0.0).max(0.0),
            flee_clearance: finite_or(radii.flee_clearance, 0.0).max(0.0),
            wait_chance: probability(patrol.wait_chance),
            wait_min_seconds: wait_min,
            wait_max_seconds: wait_max,
            orbit_jitter: finite_or(patrol.orbit_jitter, 0.0).max(0.0),
            spiral_tangent_weight: finite_or(patrol.spiral_tangent_weight, 0.7),
            spiral_radial_weight: finite_or(patrol.spiral_radial_weight, 0.3),
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn probability(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
