use glam::IVec2;
use sim_core::player::step_avatar;
use sim_core::{Avatar, InputState};
use world_core::fixture::SnapshotBuilder;
use world_core::{RoomManager, START_ROOM};

fn empty_world_at(xy: IVec2) -> RoomManager {
    let mut world = RoomManager::decode(&SnapshotBuilder::new().build()).expect("decode");
    world.move_to(xy);
    world
}

fn idle_step(world: &mut RoomManager, avatar: &mut Avatar) {
    step_avatar(world, avatar, &InputState::IDLE, false);
}

#[test]
fn leaving_left_wraps_to_the_rightmost_column() {
    let mut world = empty_world_at(IVec2::new(0, 2));
    let mut avatar = Avatar::bare(IVec2::new(-5, 50));
    idle_step(&mut world, &mut avatar);
    assert_eq!(world.room_xy(), IVec2::new(7, 2));
    assert_eq!(avatar.pos.x, 240);
}

#[test]
fn leaving_right_enters_at_the_left_edge() {
    let mut world = empty_world_at(IVec2::new(7, 2));
    let mut avatar = Avatar::bare(IVec2::new(243, 50));
    idle_step(&mut world, &mut avatar);
    assert_eq!(world.room_xy(), IVec2::new(0, 2));
    assert_eq!(avatar.pos.x, 0);
}

#[test]
fn falling_out_the_bottom_enters_the_room_below_from_its_top() {
    let mut world = empty_world_at(IVec2::new(2, 3));
    let mut avatar = Avatar::bare(IVec2::new(100, 133));
    idle_step(&mut world, &mut avatar);
    assert_eq!(world.room_xy(), IVec2::new(2, 2));
    assert_eq!(avatar.pos.y, 0);
}

#[test]
fn jumping_out_the_top_enters_the_room_above() {
    let mut world = empty_world_at(IVec2::new(2, 3));
    let mut avatar = Avatar::bare(IVec2::new(100, -2));
    idle_step(&mut world, &mut avatar);
    assert_eq!(world.room_xy(), IVec2::new(2, 4));
    assert_eq!(avatar.pos.y, 128);
}

#[test]
fn the_top_row_clamps_instead_of_transitioning() {
    let mut world = empty_world_at(IVec2::new(2, 5));
    let mut avatar = Avatar::bare(IVec2::new(100, -3));
    idle_step(&mut world, &mut avatar);
    assert_eq!(world.room_xy(), IVec2::new(2, 5));
    assert_eq!(avatar.pos.y, 5);
}

#[test]
fn drowning_warps_home_instead_of_scrolling_down() {
    let mut world = empty_world_at(IVec2::new(4, 0));
    let mut avatar = Avatar::bare(IVec2::new(100, 161));
    idle_step(&mut world, &mut avatar);
    assert_eq!(world.room_xy(), START_ROOM);
    assert_eq!(avatar.pos, IVec2::new(130, 20));
}
