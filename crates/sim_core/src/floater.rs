//! Floater overlay: updrafts between guide columns.
//!
//! The time window is global; the positional part (is the avatar inside a
//! lift column) is checked by the physics step. This module only owns the
//! cycle and the guide-column color animation.

use glam::IVec2;
use rom_core::ColorAttribute;
use world_core::RoomManager;

pub const CYCLE_MS: u64 = 30_000;
pub const ACTIVE_MS: u64 = 10_000;

#[derive(Default)]
pub struct FloaterOverlay;

impl FloaterOverlay {
    pub fn is_active(t_ms: u64) -> bool {
        t_ms % CYCLE_MS < ACTIVE_MS
    }

    /// Repaint the guide columns of every floater in the current room:
    /// white while idle, a rolling color cycle while the updraft is on.
    pub fn apply(&self, t_ms: u64, world: &mut RoomManager) {
        let floaters = world.current_room().floaters.clone();
        if floaters.is_empty() {
            return;
        }
        let active = Self::is_active(t_ms);
        let room = world.current_room_mut();
        for f in &floaters {
            for y in 0..f.height {
                let color = if active {
                    ColorAttribute::new(((t_ms / 50 + y as u64) % 7 + 1) as u8, 0, false)
                } else {
                    ColorAttribute::new(7, 0, false)
                };
                room.base.set_block_color(IVec2::new(f.x, f.top + y), color);
                room.base
                    .set_block_color(IVec2::new(f.x + 3, f.top + y), color);
            }
        }
    }
}
