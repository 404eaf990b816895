use glam::IVec2;
use sim_core::floater::FloaterOverlay;
use sim_core::player::step_avatar;
use sim_core::{Avatar, InputState};
use world_core::fixture::SnapshotBuilder;
use world_core::rooms::FLOATER_GUIDE_TILE;
use world_core::RoomManager;

/// Guide columns at x=6 and x=9, blocks y=10..=13: lift shaft over blocks
/// 7..=8.
fn floater_world() -> RoomManager {
    let mut b = SnapshotBuilder::new();
    b.solid_tile(FLOATER_GUIDE_TILE, 0x07);
    let g = FLOATER_GUIDE_TILE;
    b.room_stream(0, &[13, 6, g, 253, 1, 4, 13, 9, g, 253, 1, 4]);
    let mut world = RoomManager::decode(&b.build()).expect("decode");
    world.move_to_index(0);
    world
}

#[test]
fn an_active_floater_carries_the_avatar_upward() {
    let mut world = floater_world();
    let mut avatar = Avatar::bare(IVec2::new(57, 96));
    for _ in 0..5 {
        step_avatar(&mut world, &mut avatar, &InputState::IDLE, true);
    }
    assert_eq!(avatar.pos.y, 91, "one pixel up per tick");
}

#[test]
fn an_idle_floater_lets_the_avatar_fall() {
    let mut world = floater_world();
    let mut avatar = Avatar::bare(IVec2::new(57, 96));
    for _ in 0..5 {
        step_avatar(&mut world, &mut avatar, &InputState::IDLE, false);
    }
    assert_eq!(avatar.pos.y, 101);
}

#[test]
fn the_updraft_does_not_reach_outside_the_lift_column() {
    let mut world = floater_world();
    // far from the shaft
    let mut avatar = Avatar::bare(IVec2::new(180, 96));
    for _ in 0..5 {
        step_avatar(&mut world, &mut avatar, &InputState::IDLE, true);
    }
    assert_eq!(avatar.pos.y, 101, "falls despite the active window");
}

#[test]
fn the_activity_window_is_the_first_third_of_the_cycle() {
    assert!(FloaterOverlay::is_active(0));
    assert!(FloaterOverlay::is_active(9_999));
    assert!(!FloaterOverlay::is_active(10_000));
    assert!(!FloaterOverlay::is_active(29_999));
    assert!(FloaterOverlay::is_active(30_000));
}
