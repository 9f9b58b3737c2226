//! CorePlugin wires the frame clock, the shared random source and the ordered
//! per-frame simulation pipeline.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use super::{config::CoreSettings, rng::SimRng};

const MIN_TIME_SCALE: f32 = 0.001;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Stages of a single simulation frame. They run strictly in this order so a
/// hit landed by a mob suppresses the victim's movement in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Clock,
    Mobs,
    Meeples,
    Publish,
}

/// Tracks the simulation step derived from real frame deltas.
///
/// The step fed to the simulation is scaled and then clamped, which bounds
/// how far a single slow frame can move the world. The raw frame delta is
/// kept separately for wall-clock timers.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    max_step: Duration,
    last_real_delta: Duration,
    last_step: Duration,
    elapsed: Duration,
    frame: u64,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier and step cap.
    pub fn new(time_scale: f32, max_step: Duration) -> Self {
        Self {
            time_scale: sanitise_scale(time_scale),
            max_step,
            last_real_delta: Duration::ZERO,
            last_step: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame: 0,
        }
    }

    pub fn from_settings(settings: &CoreSettings) -> Self {
        Self::new(
            settings.time_scale,
            Duration::from_secs_f32(settings.max_step_seconds),
        )
    }

    /// Sets the time-scale multiplier (clamped to a small positive minimum).
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = sanitise_scale(scale);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last real (unscaled, unclamped) frame delta.
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    /// Last simulation step after scaling and clamping.
    pub fn last_step(&self) -> Duration {
        self.last_step
    }

    pub fn step_seconds(&self) -> f32 {
        self.last_step.as_secs_f32()
    }

    /// Total simulated time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Number of frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Applies a real delta, storing both the raw delta and the clamped step.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_step = real_delta.mul_f32(self.time_scale).min(self.max_step);
        self.elapsed += self.last_step;
        self.frame = self.frame.saturating_add(1);
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::from_settings(&CoreSettings::default())
    }
}

fn sanitise_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.max(MIN_TIME_SCALE)
    } else {
        MIN_TIME_SCALE
    }
}

/// Registers the frame clock, random source and pipeline ordering.
#[derive(Debug, Clone, Default)]
pub struct CorePlugin {
    settings: Option<CoreSettings>,
}

impl CorePlugin {
    /// Uses the given settings instead of reading `config/core.toml`.
    pub fn with_settings(settings: CoreSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = self
            .settings
            .clone()
            .unwrap_or_else(CoreSettings::load_or_default);

        app.configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Mobs,
                SimulationSet::Meeples,
                SimulationSet::Publish,
            )
                .chain(),
        )
        .insert_resource(SimulationClock::from_settings(&settings))
        .insert_resource(SimRng::from_optional_seed(settings.rng_seed))
        .insert_resource(settings)
        .add_systems(Startup, log_startup_time_scale)
        .add_systems(
            Update,
            update_simulation_clock
                .in_set(SimulationSet::Clock)
                .before(crate::world::time::advance_world_clock),
        );

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks.after(SimulationSet::Clock));
        }
    }
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>, settings: Res<CoreSettings>) {
    info!(
        "CorePlugin initialised with time scale {:.3} (max step {:.3}s, seed {:?})",
        clock.time_scale(),
        settings.max_step_seconds,
        settings.rng_seed
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_step()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | frame: {} | scale: {:.3} | real dt: {:.4}s | step: {:.4}s",
            clock.elapsed().as_secs_f32(),
            clock.frame(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_step().as_secs_f32(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_scales_delta_with_multiplier() {
        let mut clock = SimulationClock::new(2.5, Duration::from_secs(10));
        clock.tick(Duration::from_secs_f32(1.2));

        assert_eq!(clock.time_scale(), 2.5);
        assert_eq!(clock.last_real_delta(), Duration::from_secs_f32(1.2));
        assert_eq!(clock.last_step(), Duration::from_secs_f32(1.2).mul_f32(2.5));
        assert_eq!(clock.elapsed(), clock.last_step());
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn clock_clamps_long_frames() {
        let mut clock = SimulationClock::default();
        clock.tick(Duration::from_millis(750));

        assert_eq!(clock.last_real_delta(), Duration::from_millis(750));
        assert!((clock.step_seconds() - 0.1).abs() < 1e-6);
        assert!((clock.elapsed_seconds() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn clock_clamps_min_time_scale() {
        let mut clock = SimulationClock::new(0.0, Duration::from_millis(100));
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);

        clock.set_time_scale(f32::NAN);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
    }
}
