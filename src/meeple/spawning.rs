//! The three villagers every session starts with.
use bevy::prelude::*;

use super::components::{Meeple, MeepleId, MeepleRoster, Role, Status};

/// Builds the founding roster, each villager idle at their own hearth.
pub fn founding_roster() -> MeepleRoster {
    let prototypes = [
        (
            "Haldor",
            Role::Chef,
            Status::Fit,
            Color::srgb_u8(0x4a, 0x6f, 0xa5),
            Vec3::new(2.0, 0.0, 2.0),
        ),
        (
            "Elara",
            Role::Priestess,
            Status::Normal,
            Color::srgb_u8(0xa5, 0x4a, 0x6f),
            Vec3::new(-2.0, 0.0, 2.0),
        ),
        (
            "Barnaby",
            Role::Drunkard,
            Status::Tired,
            Color::srgb_u8(0x6f, 0xa5, 0x4a),
            Vec3::new(0.0, 0.0, -3.0),
        ),
    ];

    let meeples = prototypes
        .into_iter()
        .enumerate()
        .map(|(index, (name, role, status, color, home))| {
            Meeple::new(MeepleId::new(index as u32 + 1), name, role, status, color, home)
        })
        .collect();

    MeepleRoster::new(meeples)
}

/// Announces who is at the camp when the session begins.
pub fn announce_roster(roster: Res<MeepleRoster>) {
    for meeple in roster.iter() {
        info!(
            "{} ({}) the {} joins the camp, feeling {}",
            meeple.name,
            meeple.id,
            meeple.role.label(),
            meeple.status.label()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeple::components::MeepleAction;

    #[test]
    fn founders_start_idle_at_home() {
        let roster = founding_roster();
        assert_eq!(roster.len(), 3);

        let haldor = roster.get(MeepleId::new(1)).expect("Haldor");
        assert_eq!(haldor.name, "Haldor");
        assert_eq!(haldor.status, Status::Fit);
        assert_eq!(haldor.position, Vec3::new(2.0, 0.0, 2.0));

        let barnaby = roster.get(MeepleId::new(3)).expect("Barnaby");
        assert_eq!(barnaby.role, Role::Drunkard);
        assert_eq!(barnaby.status, Status::Tired);

        assert!(roster
            .iter()
            .all(|meeple| meeple.action == MeepleAction::Idle && meeple.position == meeple.base_position));
    }
}
