use std::time::Duration;

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};

use medvil::{economy::EventLog, VillagePlugins};

const FRAMES_PER_SECOND: f64 = 60.0;

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / FRAMES_PER_SECOND,
            ))),
            LogPlugin::default(),
            VillagePlugins,
        ))
        .add_systems(Last, echo_event_log)
        .run();
}

/// Mirrors new event-log lines to the console, since nothing renders them.
fn echo_event_log(log: Res<EventLog>, mut seen: Local<Option<u64>>) {
    let revision = log.revision();
    let fresh = match *seen {
        Some(previous) => revision.wrapping_sub(previous) as usize,
        None => log.len(),
    };
    *seen = Some(revision);

    let mut lines: Vec<&str> = log.entries().take(fresh).collect();
    lines.reverse();
    for line in lines {
        info!(target: "village", "{}", line);
    }
}
