//! Village chronicle: a rolling record of hits, harvests and fire lighting,
//! mirrored to a JSON-lines file for offline inspection.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use crate::{
    core::plugin::SimulationClock,
    meeple::components::{MeepleId, Status},
    mob::{components::MobId, events::MeepleHitEvent},
    world::nodes::{NodeId, ResourceKind},
};

use super::events::{FireLitEvent, HarvestCompletedEvent};

/// In-memory chronicle, newest record last.
#[derive(Resource, Debug)]
pub struct VillageChronicle {
    capacity: usize,
    records: VecDeque<ChronicleRecord>,
}

impl VillageChronicle {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: ChronicleRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn records(&self) -> impl Iterator<Item = &ChronicleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChronicleRecord {
    pub occurred_at_seconds: f32,
    pub day: u32,
    pub entry: ChronicleEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChronicleEntry {
    MeepleHit {
        mob: MobId,
        meeple: MeepleId,
        status: Status,
    },
    Harvest {
        meeple: MeepleId,
        node: NodeId,
        resource: ResourceKind,
        quantity: u32,
    },
    FireLit {
        meeple: MeepleId,
        hours_added: f32,
        hours_left: f32,
    },
}

/// Collects this frame's messages into the chronicle and the pending file log.
pub fn record_village_chronicle(
    clock: Res<SimulationClock>,
    mut chronicle: ResMut<VillageChronicle>,
    mut log: ResMut<ChronicleLog>,
    mut hits: MessageReader<MeepleHitEvent>,
    mut harvests: MessageReader<HarvestCompletedEvent>,
    mut fires: MessageReader<FireLitEvent>,
) {
    let now = clock.elapsed_seconds();

    let hit_records = hits.read().map(|event| ChronicleRecord {
        occurred_at_seconds: event.time_seconds,
        day: event.day,
        entry: ChronicleEntry::MeepleHit {
            mob: event.mob,
            meeple: event.meeple,
            status: event.status,
        },
    });
    let harvest_records = harvests.read().map(|event| ChronicleRecord {
        occurred_at_seconds: now,
        day: event.day,
        entry: ChronicleEntry::Harvest {
            meeple: event.meeple,
            node: event.node,
            resource: event.resource,
            quantity: event.quantity,
        },
    });
    let fire_records = fires.read().map(|event| ChronicleRecord {
        occurred_at_seconds: now,
        day: event.day,
        entry: ChronicleEntry::FireLit {
            meeple: event.meeple,
            hours_added: event.hours_added,
            hours_left: event.hours_left,
        },
    });

    for record in hit_records.chain(harvest_records).chain(fire_records) {
        log.push(&record);
        chronicle.push(record);
    }
}

/// Pending chronicle lines waiting to be appended to disk.
#[derive(Resource, Debug)]
pub struct ChronicleLog {
    output_path: PathBuf,
    pending: Vec<ChronicleRecord>,
}

impl ChronicleLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &ChronicleRecord) {
        self.pending.push(record.clone());
    }

    fn ensure_directory(&self) -> std::io::Result<()> {
        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        self.ensure_directory()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;

        for record in std::mem::take(&mut self.pending) {
            let line: ChronicleLine = record.into();
            serde_json::to_writer(&mut file, &line)?;
            file.write_all(b"\n")?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Appends pending chronicle lines, warning if the file cannot be written.
pub fn flush_village_chronicle(mut log: ResMut<ChronicleLog>) {
    if let Err(err) = log.flush() {
        warn!(
            "Failed to persist village chronicle to {:?}: {}",
            log.path(),
            err
        );
    }
}

#[derive(Serialize)]
struct ChronicleLine {
    occurred_at_seconds: f32,
    day: u32,
    event: ChronicleLineEvent,
}

impl From<ChronicleRecord> for ChronicleLine {
    fn from(value: ChronicleRecord) -> Self {
        Self {
            occurred_at_seconds: value.occurred_at_seconds,
            day: value.day,
            event: value.entry.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum ChronicleLineEvent {
    MeepleHit {
        mob: String,
        meeple: String,
        status: String,
    },
    Harvest {
        meeple: String,
        node: String,
        resource: ResourceKind,
        quantity: u32,
    },
    FireLit {
        meeple: String,
        hours_added: f32,
        hours_left: f32,
    },
}

impl From<ChronicleEntry> for ChronicleLineEvent {
    fn from(value: ChronicleEntry) -> Self {
        match value {
            ChronicleEntry::MeepleHit {
                mob,
                meeple,
                status,
            } => Self::MeepleHit {
                mob: mob.to_string(),
                meeple: meeple.to_string(),
                status: status.label().to_string(),
            },
            ChronicleEntry::Harvest {
                meeple,
                node,
                resource,
                quantity,
            } => Self::Harvest {
                meeple: meeple.to_string(),
                node: node.to_string(),
                resource,
                quantity,
            },
            ChronicleEntry::FireLit {
                meeple,
                hours_added,
                hours_left,
            } => Self::FireLit {
                meeple: meeple.to_string(),
                hours_added,
                hours_left,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::{env, fs, time::SystemTime};

    fn harvest(at: f32) -> ChronicleRecord {
        ChronicleRecord {
            occurred_at_seconds: at,
            day: 1,
            entry: ChronicleEntry::Harvest {
                meeple: MeepleId::new(1),
                node: NodeId::new(105),
                resource: ResourceKind::Wood,
                quantity: 12,
            },
        }
    }

    #[test]
    fn chronicle_drops_old_records_when_full() {
        let mut chronicle = VillageChronicle::new(2);
        chronicle.push(harvest(1.0));
        chronicle.push(harvest(2.0));
        chronicle.push(harvest(3.0));

        assert_eq!(chronicle.len(), 2);
        assert!(chronicle
            .records()
            .all(|record| record.occurred_at_seconds >= 2.0));
    }

    #[test]
    fn chronicle_log_writes_json_lines() {
        let unique_suffix = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let path = env::temp_dir().join(format!("village_chronicle_test_{}.jsonl", unique_suffix));
        let _ = fs::remove_file(&path);

        let mut log = ChronicleLog::new(&path);
        log.push(&harvest(4.5));
        log.push(&ChronicleRecord {
            occurred_at_seconds: 6.0,
            day: 2,
            entry: ChronicleEntry::MeepleHit {
                mob: MobId::new(1003),
                meeple: MeepleId::new(2),
                status: Status::Infected,
            },
        });
        log.flush().expect("chronicle should flush");
        assert!(log.is_empty());

        let raw = fs::read_to_string(&path).expect("chronicle file should exist");
        let lines: Vec<_> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Value = serde_json::from_str(lines[0]).expect("json line should parse");
        assert_eq!(first["event"]["event_type"], "harvest");
        assert_eq!(first["event"]["node"], "NODE-0105");
        assert_eq!(first["event"]["resource"], "wood");
        assert_eq!(first["event"]["quantity"], 12);

        let second: Value = serde_json::from_str(lines[1]).expect("json line should parse");
        assert_eq!(second["day"], 2);
        assert_eq!(second["event"]["event_type"], "meeple_hit");
        assert_eq!(second["event"]["mob"], "MOB-1003");
        assert_eq!(second["event"]["status"], "Infected");

        let _ = fs::remove_file(&path);
    }
}
