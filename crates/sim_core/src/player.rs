//! Avatar movement: walk with step-up assist, ladders, trampolines, jump
//! arc, gravity and room-edge transitions, resolved in a fixed order every
//! tick.

use glam::IVec2;
use world_core::{RoomManager, GRID_H, START_ROOM};

use crate::avatar::Avatar;
use crate::input::InputState;

/// Jump arc ceiling, in one-pixel ascent steps.
const JUMP_HEIGHT: i32 = 26;

/// Leaving the left edge re-enters the neighbour at this x.
const LEFT_EXIT_X: i32 = 256 - 24 + 8;
/// Past this x the avatar has left through the right edge.
const RIGHT_EXIT_X: i32 = 256 - 24 + 10;
/// Past this y (outside water rooms) the avatar has left through the floor.
const BOTTOM_EXIT_Y: i32 = 192 - 32 - 32 + 4;
/// Entering from below starts at this y.
const TOP_ENTRY_Y: i32 = 19 * 8 - 32 + 4 + 4;
/// Below this y in a water room the avatar has drowned.
const WATER_DROWN_Y: i32 = 160;
/// Respawn pixel after drowning, in the spawn room.
const RESPAWN_POS: IVec2 = IVec2::new(130, 20);

fn hits(world: &RoomManager, avatar: &mut Avatar, shift: IVec2) -> bool {
    world.collides(avatar.silhouette(), shift)
}

/// One physics tick. `floater_active` is the time-based phase of the
/// floater cycle; the positional check happens here.
pub fn step_avatar(
    world: &mut RoomManager,
    avatar: &mut Avatar,
    input: &InputState,
    floater_active: bool,
) {
    let in_water_room = world.room_xy().y == 0;
    let in_floater = floater_active && world.is_in_lift_column(avatar.silhouette());

    // an elevator floor moving up digs into the feet; stand on top of it
    if hits(world, avatar, IVec2::ZERO) && !hits(world, avatar, IVec2::new(0, -1)) {
        avatar.pos.y -= 1;
    }

    if input.left && !input.right {
        walk(world, avatar, -1);
    }
    if input.right && !input.left {
        walk(world, avatar, 1);
    }

    if world.is_in_ladder(avatar.silhouette()) {
        if input.jump && !input.down && !hits(world, avatar, IVec2::new(0, -1)) {
            avatar.pos.y -= 1;
        }
        if input.down && !input.jump && !hits(world, avatar, IVec2::new(0, 1)) {
            avatar.pos.y += 1;
        }
    } else {
        vertical(world, avatar, input, in_floater);
    }

    edges(world, avatar, in_water_room);
}

fn walk(world: &mut RoomManager, avatar: &mut Avatar, dir: i32) {
    let walked = if !hits(world, avatar, IVec2::new(dir, 0)) {
        true
    } else if !hits(world, avatar, IVec2::new(dir, -1)) {
        // step-up assist: blocked straight ahead, clear one pixel higher
        avatar.pos.y -= 1;
        true
    } else {
        false
    };
    if walked {
        avatar.pos.x += dir;
        avatar.facing_left = dir < 0;
        avatar.frame = if dir < 0 {
            avatar.frame.checked_sub(1).unwrap_or(3)
        } else {
            (avatar.frame + 1) % 4
        };
    }
}

fn vertical(world: &mut RoomManager, avatar: &mut Avatar, input: &InputState, in_floater: bool) {
    if in_floater && !hits(world, avatar, IVec2::new(0, -1)) {
        avatar.pos.y -= 1;
    }

    let on_solid = hits(world, avatar, IVec2::new(0, 1));

    // solid tiles drawn over trampoline blocks win; those spots are
    // ordinary ground
    let on_trampoline = !on_solid && world.is_on_trampoline(avatar.silhouette());

    let on_stable_ground = !in_floater
        && (on_solid
            || world.is_on_stand_on(avatar.silhouette())
            || world.is_on_ladder_top(avatar.silhouette())
            || on_trampoline);

    if on_stable_ground && !on_trampoline {
        avatar.fall_height = 0;
    }

    if on_trampoline {
        if input.jump {
            avatar.jump_frame = 1;
            avatar.jump_max_height = (avatar.fall_height * 2).max(JUMP_HEIGHT);
        } else {
            // automatic bounces shrink by half until negligible
            avatar.jump_max_height = avatar.fall_height / 2;
            avatar.jump_frame = i32::from(avatar.jump_max_height > 1);
        }
        avatar.fall_height = 0;
    } else if input.jump && on_stable_ground {
        avatar.jump_frame = 1;
        avatar.jump_max_height = JUMP_HEIGHT;
        avatar.fall_height = 0;
    }

    let ascending = avatar.jump_frame > 0 && avatar.jump_frame < avatar.jump_max_height;
    if ascending && !hits(world, avatar, IVec2::new(0, -1)) {
        avatar.jump_frame += 1;
        avatar.pos.y -= 1;
    } else if !in_floater && !on_stable_ground && !hits(world, avatar, IVec2::new(0, 1)) {
        avatar.jump_frame = 0;
        avatar.pos.y += 1;
        avatar.fall_height += 1;
    }

    // descend through a ladder top
    if input.down
        && !input.jump
        && world.is_on_ladder_top(avatar.silhouette())
        && !hits(world, avatar, IVec2::new(0, 1))
    {
        avatar.pos.y += 1;
    }
}

fn edges(world: &mut RoomManager, avatar: &mut Avatar, in_water_room: bool) {
    if avatar.pos.x < -4 {
        avatar.pos.x = LEFT_EXIT_X;
        world.move_left();
    }
    if avatar.pos.x > RIGHT_EXIT_X {
        avatar.pos.x = 0;
        world.move_right();
    }
    if !in_water_room && avatar.pos.y > BOTTOM_EXIT_Y {
        avatar.pos.y = 0;
        world.move_down();
    }
    if in_water_room && avatar.pos.y > WATER_DROWN_Y {
        // drowning warps home instead of scrolling further down
        world.move_to(START_ROOM);
        avatar.pos = RESPAWN_POS;
    }
    if avatar.pos.y < 0 {
        if world.room_xy().y == GRID_H - 1 {
            // no rooms above the top row
            avatar.pos.y = 5;
            return;
        }
        avatar.pos.y = TOP_ENTRY_Y;
        world.move_up();
    }
}
