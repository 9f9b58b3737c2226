use bevy::prelude::*;
use serde::Deserialize;

use crate::{core::config::load_or_default, world::nodes::ResourceKind};

use super::log::DEFAULT_EVENT_LOG_CAPACITY;

const CONFIG_PATH: &str = "config/economy.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawEconomyConfig {
    #[serde(default)]
    stockpile: RawStockpile,
    #[serde(default)]
    yields: RawYields,
    #[serde(default)]
    costs: RawCosts,
    #[serde(default)]
    fire: RawFire,
    #[serde(default)]
    log: RawLog,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawStockpile {
    wood: u32,
    food: u32,
    herbs: u32,
}

impl Default for RawStockpile {
    fn default() -> Self {
        Self {
            wood: 10,
            food: 10,
            herbs: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawYields {
    wood: u32,
    food: u32,
    herbs: u32,
    fit_bonus: u32,
}

impl Default for RawYields {
    fn default() -> Self {
        Self {
            wood: 6,
            food: 6,
            herbs: 3,
            fit_bonus: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCosts {
    eat_food: u32,
    heal_herbs: u32,
    light_fire_wood: u32,
}

impl Default for RawCosts {
    fn default() -> Self {
        Self {
            eat_food: 2,
            heal_herbs: 1,
            light_fire_wood: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawFire {
    hours_per_lighting: f32,
}

impl Default for RawFire {
    fn default() -> Self {
        Self {
            hours_per_lighting: 12.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLog {
    capacity: usize,
    welcome: String,
    chronicle_path: String,
    chronicle_capacity: usize,
}

impl Default for RawLog {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_EVENT_LOG_CAPACITY,
            welcome: "Welcome to Medvil. Select a character.".to_string(),
            chronicle_path: "logs/village_chronicle.jsonl".to_string(),
            chronicle_capacity: 64,
        }
    }
}

/// Yields, costs and starting stores derived from `config/economy.toml`.
#[derive(Resource, Debug, Clone)]
pub struct EconomySettings {
    pub start_wood: u32,
    pub start_food: u32,
    pub start_herbs: u32,
    pub wood_yield: u32,
    pub food_yield: u32,
    pub herb_yield: u32,
    pub fit_bonus: u32,
    pub eat_food_cost: u32,
    pub heal_herb_cost: u32,
    pub light_fire_wood_cost: u32,
    pub fire_hours_per_lighting: f32,
    pub log_capacity: usize,
    pub welcome_message: String,
    pub chronicle_path: String,
    pub chronicle_capacity: usize,
}

impl EconomySettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawEconomyConfig>(CONFIG_PATH).into()
    }

    /// Base yield of one harvest, before the fitness bonus.
    pub fn yield_of(&self, resource: ResourceKind) -> u32 {
        match resource {
            ResourceKind::Wood => self.wood_yield,
            ResourceKind::Food => self.food_yield,
            ResourceKind::Plants => self.herb_yield,
        }
    }
}

impl Default for EconomySettings {
    fn default() -> Self {
        RawEconomyConfig::default().into()
    }
}

impl From<RawEconomyConfig> for EconomySettings {
    fn from(value: RawEconomyConfig) -> Self {
        let fire_hours_per_lighting = if value.fire.hours_per_lighting.is_finite() {
            value.fire.hours_per_lighting.max(0.0)
        } else {
            0.0
        };

        Self {
            start_wood: value.stockpile.wood,
            start_food: value.stockpile.food,
            start_herbs: value.stockpile.herbs,
            wood_yield: value.yields.wood,
            food_yield: value.yields.food,
            herb_yield: value.yields.herbs,
            fit_bonus: value.yields.fit_bonus.max(1),
            eat_food_cost: value.costs.eat_food,
            heal_herb_cost: value.costs.heal_herbs,
            light_fire_wood_cost: value.costs.light_fire_wood,
            fire_hours_per_lighting,
            log_capacity: value.log.capacity.max(1),
            welcome_message: value.log.welcome,
            chronicle_path: value.log.chronicle_path,
            chronicle_capacity: value.log.chronicle_capacity.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn economy_defaults_match_session_start() {
        let settings = EconomySettings::default();
        assert_eq!(
            (settings.start_wood, settings.start_food, settings.start_herbs),
            (10, 10, 2)
        );
        assert_eq!(settings.fit_bonus, 2);
        assert_eq!(settings.light_fire_wood_cost, 5);
        assert_eq!(settings.fire_hours_per_lighting, 12.0);
        assert_eq!(settings.log_capacity, 5);
    }

    #[test]
    fn partial_economy_config_keeps_other_defaults() {
        let raw: RawEconomyConfig = toml::from_str(
            r#"
            [yields]
            fit_bonus = 0
            [fire]
            hours_per_lighting = -3.0
            "#,
        )
        .expect("partial economy config should parse");
        let settings = EconomySettings::from(raw);
        assert_eq!(settings.fit_bonus, 1);
        assert_eq!(settings.fire_hours_per_lighting, 0.0);
        assert_eq!(settings.wood_yield, 6);
    }
}
