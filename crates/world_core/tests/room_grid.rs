use glam::IVec2;
use world_core::fixture::SnapshotBuilder;
use world_core::{RoomManager, GRID_H, GRID_W, START_ROOM};

fn empty_world() -> RoomManager {
    RoomManager::decode(&SnapshotBuilder::new().build()).expect("decode")
}

#[test]
fn session_starts_in_the_spawn_room() {
    let world = empty_world();
    assert_eq!(world.room_xy(), START_ROOM);
    assert_eq!(world.room_index(), 3 + 5 * GRID_W as u8);
}

#[test]
fn columns_wrap_like_a_torus() {
    let mut world = empty_world();
    world.move_to(IVec2::new(0, 0));
    world.move_left();
    assert_eq!(world.room_xy(), IVec2::new(GRID_W - 1, 0));
    world.move_right();
    assert_eq!(world.room_xy(), IVec2::new(0, 0));
}

#[test]
fn rows_clamp_at_both_ends() {
    let mut world = empty_world();
    world.move_to(IVec2::new(2, GRID_H - 1));
    world.move_up();
    assert_eq!(world.room_xy().y, GRID_H - 1);
    world.move_to(IVec2::new(2, 0));
    world.move_down();
    assert_eq!(world.room_xy().y, 0);
}

#[test]
fn index_round_trips_through_move_to_index() {
    let mut world = empty_world();
    for index in [0u8, 7, 8, 40, 47] {
        world.move_to_index(index);
        assert_eq!(world.room_index(), index);
    }
}
