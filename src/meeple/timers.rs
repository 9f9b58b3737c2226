//! Wall-clock timers for the short player-ordered actions.
//!
//! Eating, healing, rituals and sleep last a fixed real-time span that does
//! not stretch with the day length or the simulation time scale.
use std::time::Duration;

use bevy::prelude::*;

use crate::core::plugin::SimulationClock;

use super::components::{MeepleAction, MeepleId, MeepleRoster};

#[derive(Debug, Clone)]
struct TimedAction {
    meeple: MeepleId,
    action: MeepleAction,
    timer: Timer,
}

/// Pending busy-state timers, one per started action.
#[derive(Resource, Debug, Default)]
pub struct TimedActionSchedule {
    pending: Vec<TimedAction>,
}

impl TimedActionSchedule {
    /// Starts a timer for `meeple`, replacing any timer it still had running.
    pub fn schedule(&mut self, meeple: MeepleId, action: MeepleAction, duration: Duration) {
        self.cancel(meeple);
        self.pending.push(TimedAction {
            meeple,
            action,
            timer: Timer::new(duration, TimerMode::Once),
        });
    }

    /// Advances every timer by `real_delta` and hands back the ones that ran out.
    pub fn tick(&mut self, real_delta: Duration) -> Vec<(MeepleId, MeepleAction)> {
        let mut finished = Vec::new();
        self.pending.retain_mut(|entry| {
            entry.timer.tick(real_delta);
            if entry.timer.is_finished() {
                finished.push((entry.meeple, entry.action));
                false
            } else {
                true
            }
        });
        finished
    }

    /// Drops the running timer of a meeple that was knocked out of its action.
    pub fn cancel(&mut self, meeple: MeepleId) {
        self.pending.retain(|entry| entry.meeple != meeple);
    }

    pub fn is_pending(&self, meeple: MeepleId) -> bool {
        self.pending.iter().any(|entry| entry.meeple == meeple)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Returns meeples to idle once their timed action has run its course.
pub fn finish_timed_actions(
    clock: Res<SimulationClock>,
    mut schedule: ResMut<TimedActionSchedule>,
    mut roster: ResMut<MeepleRoster>,
) {
    for (id, action) in schedule.tick(clock.last_real_delta()) {
        let Some(meeple) = roster.get_mut(id) else {
            continue;
        };
        // A hit may have sent the meeple home in the meantime.
        if meeple.action == action {
            meeple.action = MeepleAction::Idle;
            debug!("{} finished {}", meeple.name, action.label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_finish_independently() {
        let mut schedule = TimedActionSchedule::default();
        schedule.schedule(MeepleId::new(1), MeepleAction::Eating, Duration::from_secs(2));
        schedule.schedule(MeepleId::new(2), MeepleAction::Sleeping, Duration::from_secs(5));

        assert!(schedule.tick(Duration::from_millis(1500)).is_empty());
        let done = schedule.tick(Duration::from_millis(600));
        assert_eq!(done, vec![(MeepleId::new(1), MeepleAction::Eating)]);
        assert!(!schedule.is_pending(MeepleId::new(1)));
        assert!(schedule.is_pending(MeepleId::new(2)));

        let done = schedule.tick(Duration::from_secs(3));
        assert_eq!(done, vec![(MeepleId::new(2), MeepleAction::Sleeping)]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn reissued_action_gets_its_full_duration() {
        let mut schedule = TimedActionSchedule::default();
        let elara = MeepleId::new(2);
        schedule.schedule(elara, MeepleAction::Sleeping, Duration::from_secs(5));
        assert!(schedule.tick(Duration::from_millis(1200)).is_empty());

        // Knocked awake, walked home, told to sleep again.
        schedule.schedule(elara, MeepleAction::Sleeping, Duration::from_secs(5));
        assert_eq!(schedule.len(), 1);
        assert!(schedule.tick(Duration::from_millis(3900)).is_empty());
        assert!(schedule.is_pending(elara));

        let done = schedule.tick(Duration::from_millis(1200));
        assert_eq!(done, vec![(elara, MeepleAction::Sleeping)]);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut schedule = TimedActionSchedule::default();
        schedule.schedule(MeepleId::new(1), MeepleAction::Eating, Duration::from_secs(2));
        schedule.schedule(MeepleId::new(2), MeepleAction::Healing, Duration::from_secs(2));

        schedule.cancel(MeepleId::new(1));

        let done = schedule.tick(Duration::from_secs(3));
        assert_eq!(done, vec![(MeepleId::new(2), MeepleAction::Healing)]);
        assert!(schedule.is_empty());
    }
}
