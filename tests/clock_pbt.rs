use bevy::{color::Color, math::Vec3};
use medvil::{
    core::SimRng,
    meeple::{
        components::{ActionTarget, Meeple, MeepleId, Role, Status},
        systems::step_meeple,
        MeepleSettings,
    },
    mob::{
        components::{Mob, MobId, MobState},
        systems::{step_mob, MobFrame, PatrolBand},
        MobSettings,
    },
    world::{
        nodes::{NodeId, TreeNode},
        spatial::{heading_angle, heading_vector, within_vision_cone},
        time::{WorldClock, WorldTimeSettings, HOURS_PER_DAY},
    },
};
use proptest::prelude::*;

prop_compose! {
    fn arb_plane_position()(
        x in -60.0f32..60.0,
        z in -60.0f32..60.0
    ) -> Vec3 {
        Vec3::new(x, 0.0, z)
    }
}

fn arb_mob_state() -> impl Strategy<Value = MobState> {
    prop_oneof![
        Just(MobState::Patrol),
        Just(MobState::Wait),
        Just(MobState::AttackDash),
        Just(MobState::Fleeing),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_clock_hour_stays_in_range_and_days_count_wraps(
        steps in prop::collection::vec(0.0f32..500.0, 1..64),
        start_hour in 0.0f32..24.0,
        fire in 0.0f32..30.0
    ) {
        let settings = WorldTimeSettings::default();
        let mut clock = WorldClock::new(&settings)
            .with_hour(start_hour)
            .with_fire_hours(fire);

        for step in steps {
            let day_before = clock.day();
            let hour_before = clock.hour();
            let outcome = clock.advance(step, &settings);

            prop_assert!(clock.hour() >= 0.0 && clock.hour() < HOURS_PER_DAY,
                "hour {} out of range", clock.hour());
            prop_assert!(clock.fire_hours_left() >= 0.0);
            prop_assert_eq!(clock.day(), day_before + outcome.days_rolled);

            let expected_rolls = ((hour_before + outcome.hours) / HOURS_PER_DAY).floor() as u32;
            // Float rounding at an exact boundary may land either side.
            prop_assert!(outcome.days_rolled.abs_diff(expected_rolls) <= 1);
        }
    }

    #[test]
    fn test_heading_helpers_stay_finite(
        angle in -10.0f32..10.0,
        origin in arb_plane_position(),
        target in arb_plane_position(),
        min_cosine in -1.0f32..1.0
    ) {
        let forward = heading_vector(angle);
        prop_assert!(forward.is_finite());
        prop_assert!((forward.length() - 1.0).abs() < 1e-4);
        prop_assert!(heading_angle(forward).is_finite());
        // Coincident points are never "seen".
        prop_assert!(!within_vision_cone(origin, angle, origin, min_cosine));
        let _ = within_vision_cone(origin, angle, target, min_cosine);
    }

    #[test]
    fn test_mob_steps_keep_positions_finite(
        position in arb_plane_position(),
        angle in -7.0f32..7.0,
        state in arb_mob_state(),
        meeple_position in arb_plane_position(),
        fire_lit in any::<bool>(),
        is_night in any::<bool>(),
        seed in any::<u64>()
    ) {
        let settings = MobSettings::default();
        let mut rng = SimRng::seeded(seed);
        let mut mob = Mob::new(MobId::new(1000), position, angle, settings.patrol_speed);
        mob.state = state;
        if state == MobState::AttackDash {
            mob.dash_target = Some(meeple_position);
        }
        if state == MobState::Wait {
            mob.wait_timer = 1.0;
        }
        let mut meeples = [villager(meeple_position)];
        let frame = MobFrame {
            band: PatrolBand::for_conditions(&settings, fire_lit, is_night),
            is_night,
            now: 5.0,
            dt: 0.1,
        };

        for _ in 0..50 {
            step_mob(&mut mob, &mut meeples, &frame, &settings, &mut rng);
            prop_assert!(mob.position.is_finite());
            prop_assert!(mob.angle.is_finite());
        }
    }

    #[test]
    fn test_meeple_walk_keeps_positions_finite(
        start in arb_plane_position(),
        destination in arb_plane_position(),
        trees in prop::collection::vec(arb_plane_position(), 0..12)
    ) {
        let settings = MeepleSettings::default();
        let trees: Vec<TreeNode> = trees
            .into_iter()
            .enumerate()
            .map(|(index, position)| TreeNode {
                id: NodeId::new(100 + index as u32),
                position,
                wood_available: true,
                food_available: false,
            })
            .collect();
        let mut meeple = villager(start);
        meeple.order_move(destination, ActionTarget::None, None);

        for _ in 0..100 {
            step_meeple(&mut meeple, &trees, 0.1, &settings);
            prop_assert!(meeple.position.is_finite());
        }
    }
}

fn villager(position: Vec3) -> Meeple {
    let mut meeple = Meeple::new(
        MeepleId::new(1),
        "Elara",
        Role::Priestess,
        Status::Normal,
        Color::WHITE,
        Vec3::new(-2.0, 0.0, 2.0),
    );
    meeple.position = position;
    meeple
}
