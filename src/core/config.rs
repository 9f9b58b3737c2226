//! Shared TOML loading for the per-domain tuning files under `config/`.
use std::{fs, path::Path};

use bevy::{log::warn, prelude::Resource};
use serde::{de::DeserializeOwned, Deserialize};

const CORE_CONFIG_PATH: &str = "config/core.toml";

/// Reads `path` as TOML, falling back to `R::default()` when the file is
/// missing or malformed.
pub fn load_or_default<R>(path: &str) -> R
where
    R: DeserializeOwned + Default,
{
    match fs::read_to_string(Path::new(path)) {
        Ok(data) => match toml::from_str::<R>(&data) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    path, err
                );
                R::default()
            }
        },
        Err(err) => {
            warn!(
                "Failed to read {} ({}). Falling back to defaults.",
                path, err
            );
            R::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct RawCoreConfig {
    time_scale: f32,
    max_step_seconds: f32,
    rng_seed: Option<u64>,
    heavy_refresh_chance: f64,
}

impl Default for RawCoreConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_step_seconds: 0.1,
            rng_seed: None,
            heavy_refresh_chance: 0.05,
        }
    }
}

/// Frame-driver tuning: time scaling, step clamping and publish cadence.
#[derive(Resource, Debug, Clone)]
pub struct CoreSettings {
    pub time_scale: f32,
    pub max_step_seconds: f32,
    pub rng_seed: Option<u64>,
    pub heavy_refresh_chance: f64,
}

impl CoreSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawCoreConfig>(CORE_CONFIG_PATH).into()
    }
}

impl Default for CoreSettings {
    fn default() -> Self {
        RawCoreConfig::default().into()
    }
}

impl From<RawCoreConfig> for CoreSettings {
    fn from(value: RawCoreConfig) -> Self {
        let max_step_seconds = if value.max_step_seconds.is_finite() {
            value.max_step_seconds.clamp(0.001, 1.0)
        } else {
            0.1
        };
        let heavy_refresh_chance = if value.heavy_refresh_chance.is_finite() {
            value.heavy_refresh_chance.clamp(0.0, 1.0)
        } else {
            0.05
        };

        Self {
            time_scale: value.time_scale,
            max_step_seconds,
            rng_seed: value.rng_seed,
            heavy_refresh_chance,
        }
    }
}
