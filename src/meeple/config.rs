use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::config::load_or_default;

const CONFIG_PATH: &str = "config/meeples.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawMeepleConfig {
    #[serde(default)]
    movement: RawMovement,
    #[serde(default)]
    work: RawWork,
    #[serde(default)]
    actions: RawActions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMovement {
    base_speed: f32,
    impaired_speed_factor: f32,
    gather_arrival_distance: f32,
    return_arrival_distance: f32,
    avoidance_engage_distance: f32,
    tree_avoid_radius: f32,
    tree_push_strength: f32,
}

impl Default for RawMovement {
    fn default() -> Self {
        Self {
            base_speed: 3.5,
            impaired_speed_factor: 0.6,
            gather_arrival_distance: 1.6,
            return_arrival_distance: 0.6,
            avoidance_engage_distance: 2.5,
            tree_avoid_radius: 2.0,
            tree_push_strength: 2.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawWork {
    duration_seconds: f32,
}

impl Default for RawWork {
    fn default() -> Self {
        Self {
            duration_seconds: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawActions {
    eat_seconds: f32,
    heal_seconds: f32,
    ritual_seconds: f32,
    sleep_seconds: f32,
}

impl Default for RawActions {
    fn default() -> Self {
        Self {
            eat_seconds: 2.0,
            heal_seconds: 2.0,
            ritual_seconds: 3.0,
            sleep_seconds: 5.0,
        }
    }
}

/// Movement, work and timed-action tuning from `config/meeples.toml`.
#[derive(Resource, Debug, Clone)]
pub struct MeepleSettings {
    pub base_speed: f32,
    pub impaired_speed_factor: f32,
    pub gather_arrival_distance: f32,
    pub return_arrival_distance: f32,
    pub avoidance_engage_distance: f32,
    pub tree_avoid_radius: f32,
    pub tree_push_strength: f32,
    pub work_seconds: f32,
    pub eat_duration: Duration,
    pub heal_duration: Duration,
    pub ritual_duration: Duration,
    pub sleep_duration: Duration,
}

impl MeepleSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawMeepleConfig>(CONFIG_PATH).into()
    }
}

impl Default for MeepleSettings {
    fn default() -> Self {
        RawMeepleConfig::default().into()
    }
}

impl From<RawMeepleConfig> for MeepleSettings {
    fn from(value: RawMeepleConfig) -> Self {
        let movement = value.movement;
        let actions = value.actions;

        Self {
            base_speed: non_negative(movement.base_speed),
            impaired_speed_factor: non_negative(movement.impaired_speed_factor),
            gather_arrival_distance: non_negative(movement.gather_arrival_distance),
            return_arrival_distance: non_negative(movement.return_arrival_distance),
            avoidance_engage_distance: non_negative(movement.avoidance_engage_distance),
            tree_avoid_radius: non_negative(movement.tree_avoid_radius),
            tree_push_strength: non_negative(movement.tree_push_strength),
            work_seconds: non_negative(value.work.duration_seconds),
            eat_duration: seconds(actions.eat_seconds),
            heal_duration: seconds(actions.heal_seconds),
            ritual_duration: seconds(actions.ritual_seconds),
            sleep_duration: seconds(actions.sleep_seconds),
        }
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn seconds(value: f32) -> Duration {
    Duration::from_secs_f32(non_negative(value))
}
