use world_core::fixture::SnapshotBuilder;
use world_core::{RoomManager, DEATH_REVIVE_MS};

/// One vertical monster in room 0: sprite 5, start block y=2, patrols
/// blocks 2..=4, normal speed, 2 frames.
fn world_with_monster(flags: u8) -> RoomManager {
    let mut b = SnapshotBuilder::new();
    let frame = [0xFFu8; 8];
    b.sprite(5, 1, 1, &[&frame, &frame]);
    b.room_monsters(
        0,
        &[
            5, 0, 0, 0, // sprite ids
            0x10, 0x00, // one monster of the first vertical id
            2, 3, 2, 4, flags, 0x07, 0, 2, // y x min max flags color cur frames
        ],
    );
    RoomManager::decode(&b.build()).expect("decode")
}

#[test]
fn position_is_periodic_over_the_travel_cycle() {
    let world = world_with_monster(0);
    let monster = &world.monsters_in(0)[0];
    let period = monster.period_ms();
    for t in [0u64, 123, 997, 1500] {
        assert_eq!(monster.pose(t), monster.pose(t + period), "t={t}");
        assert_eq!(monster.pose(t), monster.pose(t + 3 * period), "t={t}");
    }
}

#[test]
fn motion_is_a_triangle_wave_between_bounds() {
    let world = world_with_monster(0);
    let monster = &world.monsters_in(0)[0];
    let min = 2 * 8;
    let max = (4 + 1) * 8;
    let period = monster.period_ms();
    for t in (0..2 * period).step_by(7) {
        let pose = monster.pose(t);
        assert!(
            pose.pos.y >= min && pose.pos.y <= max,
            "y={} outside [{min},{max}] at t={t}",
            pose.pos.y
        );
        assert_eq!(pose.pos.x, 3 * 8);
    }
    // starts at the authored position
    assert_eq!(monster.pose(0).pos.y, min);
}

#[test]
fn normal_cadence_is_one_pixel_per_frame() {
    let world = world_with_monster(0);
    let monster = &world.monsters_in(0)[0];
    // travel span is blocks 2..=4 plus one: (5 - 2) * 8 = 24 pixels, so a
    // full out-and-back at one pixel per 40 ms frame takes 48 frames
    assert_eq!(monster.period_ms(), 48 * 40);
    assert_eq!(monster.pose(40).pos.y, monster.pose(0).pos.y + 1);
    assert_eq!(monster.pose(10 * 40).pos.y, monster.pose(0).pos.y + 10);
}

#[test]
fn fast_flag_doubles_the_rate() {
    let normal = world_with_monster(0);
    let fast = world_with_monster(0b1000_0000);
    let n = &normal.monsters_in(0)[0];
    let f = &fast.monsters_in(0)[0];
    assert_eq!(f.period_ms() * 2, n.period_ms());
}

#[test]
fn death_window_boundaries() {
    let mut world = world_with_monster(0);
    let id = world.monsters_in(0)[0].id;
    assert!(world.kill_monster(0, id, 1000));
    let m = &world.monsters_in(0)[0];
    assert!(m.is_dead(1000));
    assert!(m.is_dead(1000 + DEATH_REVIVE_MS - 1));
    assert!(!m.is_dead(1000 + DEATH_REVIVE_MS + 1));
}

#[test]
fn death_merge_is_monotonic() {
    let mut world = world_with_monster(0);
    let id = world.monsters_in(0)[0].id;
    assert!(world.kill_monster(0, id, 5000));
    // an older remote event never regresses the recorded death
    assert!(!world.kill_monster(0, id, 3000));
    assert_eq!(world.monsters_in(0)[0].died_at, Some(5000));
    // a strictly newer one wins
    assert!(world.kill_monster(0, id, 8000));
    assert_eq!(world.monsters_in(0)[0].died_at, Some(8000));
}

#[test]
fn death_events_for_other_rooms_are_ignored() {
    let mut world = world_with_monster(0);
    let id = world.monsters_in(0)[0].id;
    assert!(!world.kill_monster(1, id, 5000));
    assert_eq!(world.monsters_in(0)[0].died_at, None);
}
