//! Teleporter overlay: a 20-second blinker that repaints its emitter and
//! beam blocks every tick and relocates the avatar on the active→inactive
//! edge.
//!
//! Edge-triggering matters: a level-triggered check would bounce the
//! avatar straight back from the destination room's own teleporter.

use glam::IVec2;
use rom_core::ColorAttribute;
use world_core::RoomManager;

use crate::avatar::Avatar;

pub const CYCLE_MS: u64 = 20_000;
pub const ACTIVE_MS: u64 = 5_000;

const BEAM_WIDTH_BLOCKS: i32 = 4;
const BEAM_HEIGHT_BLOCKS: i32 = 4;

#[derive(Default)]
pub struct TeleporterOverlay {
    active: bool,
    was_active: bool,
}

impl TeleporterOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(t_ms: u64) -> bool {
        t_ms % CYCLE_MS < ACTIVE_MS
    }

    /// Advance the blinker and repaint the current room's teleporter
    /// blocks, if it has one.
    pub fn animate(&mut self, t_ms: u64, world: &mut RoomManager) {
        let Some(tp) = world.teleporter_for_current_room().copied() else {
            self.was_active = false;
            self.active = true;
            return;
        };
        self.was_active = self.active;
        self.active = Self::is_active(t_ms);

        let at = tp.block_pos;
        let room = world.current_room_mut();
        if !self.active {
            for x in 0..BEAM_WIDTH_BLOCKS {
                let ink = ((t_ms / 75 + x as u64) % 7 + 1) as u8;
                room.base
                    .set_block_color(at + IVec2::new(x, 0), ColorAttribute::new(ink, 0, false));
                if self.was_active {
                    // wipe the beam the moment it switches off
                    for y in 0..BEAM_HEIGHT_BLOCKS {
                        room.base.set_block_color(
                            at + IVec2::new(x, y + 1),
                            ColorAttribute::new(7, 0, false),
                        );
                    }
                }
            }
            return;
        }

        let air = ColorAttribute::new(0, ((t_ms / 25) % 7 + 1) as u8, false);
        for x in 0..BEAM_WIDTH_BLOCKS {
            // emitters sweep the other way while the beam is on
            let ink = ((t_ms / 75 + (4 - x) as u64) % 7 + 1) as u8;
            room.base
                .set_block_color(at + IVec2::new(x, 0), ColorAttribute::new(ink, 0, false));
            for y in 0..BEAM_HEIGHT_BLOCKS {
                room.base.set_block_color(at + IVec2::new(x, y + 1), air);
            }
        }
    }

    /// Relocate the avatar if the beam just switched off with the avatar
    /// inside the departure zone. Returns whether a teleport happened.
    pub fn teleport_if_required(&self, world: &mut RoomManager, avatar: &mut Avatar) -> bool {
        let Some(tp) = world.teleporter_for_current_room().copied() else {
            return false;
        };
        if self.active || !self.was_active {
            return false;
        }
        let tx = tp.block_pos.x * 8;
        let ty = tp.block_pos.y * 8;
        let inside = avatar.pos.x > tx
            && avatar.pos.x < tx + 20
            && avatar.pos.y > ty + 6
            && avatar.pos.y < ty + 15;
        if !inside {
            return false;
        }
        world.move_to_index(tp.to_room);
        avatar.pos = tp.to_pixel;
        log::debug!("teleported to room {} at {:?}", tp.to_room, tp.to_pixel);
        true
    }
}
