//! World time configuration and the hour/day/fire-fuel clock.
use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{config::load_or_default, plugin::SimulationClock};

const CONFIG_PATH: &str = "config/time.toml";
pub const HOURS_PER_DAY: f32 = 24.0;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawTimeConfig {
    #[serde(default)]
    clock: RawClockSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawClockSection {
    seconds_per_day: f32,
    start_day: u32,
    start_hour: f32,
    night_start_hour: f32,
    night_end_hour: f32,
    start_fire_hours: f32,
}

impl Default for RawClockSection {
    fn default() -> Self {
        Self {
            seconds_per_day: 240.0,
            start_day: 1,
            start_hour: 8.0,
            night_start_hour: 20.0,
            night_end_hour: 6.0,
            start_fire_hours: 5.0,
        }
    }
}

/// Tunable parameters describing how the world clock behaves.
#[derive(Resource, Debug, Clone)]
pub struct WorldTimeSettings {
    pub seconds_per_day: f32,
    pub start_day: u32,
    pub start_hour: f32,
    pub night_start_hour: f32,
    pub night_end_hour: f32,
    pub start_fire_hours: f32,
}

impl WorldTimeSettings {
    pub fn load_or_default() -> Self {
        load_or_default::<RawTimeConfig>(CONFIG_PATH).into()
    }
}

impl Default for WorldTimeSettings {
    fn default() -> Self {
        RawTimeConfig::default().into()
    }
}

impl From<RawTimeConfig> for WorldTimeSettings {
    fn from(value: RawTimeConfig) -> Self {
        let clock = value.clock;
        let wrap = |hour: f32| {
            if hour.is_finite() {
                hour.rem_euclid(HOURS_PER_DAY)
            } else {
                0.0
            }
        };

        Self {
            seconds_per_day: clock.seconds_per_day.max(1.0),
            start_day: clock.start_day.max(1),
            start_hour: wrap(clock.start_hour),
            night_start_hour: wrap(clock.night_start_hour),
            night_end_hour: wrap(clock.night_end_hour),
            start_fire_hours: if clock.start_fire_hours.is_finite() {
                clock.start_fire_hours.max(0.0)
            } else {
                0.0
            },
        }
    }
}

/// Runtime state for the world clock: calendar plus the campfire's fuel.
#[derive(Resource, Debug, Clone)]
pub struct WorldClock {
    day: u32,
    hour: f32,
    fire_hours_left: f32,
    night_start_hour: f32,
    night_end_hour: f32,
}

/// What happened during a single clock advance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClockAdvance {
    pub hours: f32,
    pub days_rolled: u32,
    pub fire_burned_out: bool,
}

impl WorldClock {
    pub fn new(settings: &WorldTimeSettings) -> Self {
        Self {
            day: settings.start_day,
            hour: settings.start_hour,
            fire_hours_left: settings.start_fire_hours,
            night_start_hour: settings.night_start_hour,
            night_end_hour: settings.night_end_hour,
        }
    }

    /// Overrides the remaining fuel, e.g. for a scripted session start.
    pub fn with_fire_hours(mut self, hours: f32) -> Self {
        self.fire_hours_left = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
        self
    }

    /// Overrides the time of day.
    pub fn with_hour(mut self, hour: f32) -> Self {
        if hour.is_finite() {
            self.hour = hour.rem_euclid(HOURS_PER_DAY);
        }
        self
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> f32 {
        self.hour
    }

    pub fn fire_hours_left(&self) -> f32 {
        self.fire_hours_left
    }

    pub fn is_fire_lit(&self) -> bool {
        self.fire_hours_left > 0.0
    }

    pub fn is_night(&self) -> bool {
        self.hour < self.night_end_hour || self.hour > self.night_start_hour
    }

    /// Adds burn time to the campfire.
    pub fn add_fuel(&mut self, hours: f32) {
        if hours.is_finite() && hours > 0.0 {
            self.fire_hours_left += hours;
        }
    }

    /// Advances the calendar by `step_seconds` of simulated time and burns
    /// the same number of in-game hours of fuel.
    pub fn advance(&mut self, step_seconds: f32, settings: &WorldTimeSettings) -> ClockAdvance {
        let mut hours = step_seconds / settings.seconds_per_day * HOURS_PER_DAY;
        if !hours.is_finite() || hours < 0.0 {
            hours = 0.0;
        }

        let mut outcome = ClockAdvance {
            hours,
            ..Default::default()
        };

        self.hour += hours;
        while self.hour >= HOURS_PER_DAY {
            self.hour -= HOURS_PER_DAY;
            self.day = self.day.saturating_add(1);
            outcome.days_rolled += 1;
        }

        let was_lit = self.is_fire_lit();
        self.fire_hours_left = (self.fire_hours_left - hours).max(0.0);
        outcome.fire_burned_out = was_lit && !self.is_fire_lit();

        outcome
    }

    #[cfg(test)]
    pub(crate) fn set_hour(&mut self, hour: f32) {
        self.hour = hour.rem_euclid(HOURS_PER_DAY);
    }
}

/// Advances the world clock by the clamped simulation step.
pub fn advance_world_clock(
    mut clock: ResMut<WorldClock>,
    settings: Res<WorldTimeSettings>,
    simulation_clock: Res<SimulationClock>,
) {
    let outcome = clock.advance(simulation_clock.step_seconds(), &settings);

    if outcome.days_rolled > 0 {
        info!("Day {} dawns over the camp", clock.day());
    }
    if outcome.fire_burned_out {
        info!(
            "The campfire has burned out (day {}, hour {:.1})",
            clock.day(),
            clock.hour()
        );
    }
}
