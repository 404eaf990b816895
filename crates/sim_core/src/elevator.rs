//! Elevator overlay: one platform travelling a fixed shaft that spans the
//! whole grid column of rooms.
//!
//! The route is precomputed once: stop positions joined by one-pixel ramp
//! entries and padded with dwell entries, then indexed by time. The
//! shaft's slice of the custom collision mask is rebuilt from scratch
//! every tick.

use glam::IVec2;
use world_core::{RoomManager, GRID_H};

/// Grid column whose rooms the shaft passes through.
pub const SHAFT_COLUMN: i32 = 5;

const STOP_BLOCKS: [i32; 8] = [8, 34, 36, 51, 57, 68, 81, 94];
const STEP_MS: u64 = 50;
const DWELL_ENTRIES: usize = 100;

const SHAFT_X_PX: i32 = 15 * 8;
const SHAFT_WIDTH_PX: i32 = 3 * 8;
const PLATFORM_THICKNESS_PX: i32 = 2;
/// The topmost shaft room keeps this roof band out of the rebuilt region.
const ROOF_BAND_PX: i32 = 2 * 8;
/// Visible room height; the bottom rows preview the room below.
const VISIBLE_PX: i32 = 20 * 8;
/// Vertical pixel distance between the tops of two stacked rooms.
const ROOM_STRIDE_PX: i32 = (20 - 3) * 8;

pub struct ElevatorOverlay {
    route: Vec<i32>,
}

impl Default for ElevatorOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevatorOverlay {
    pub fn new() -> Self {
        let mut stops: Vec<i32> = STOP_BLOCKS.iter().map(|b| b * 8).collect();
        stops.extend(STOP_BLOCKS[..STOP_BLOCKS.len() - 1].iter().rev().map(|b| b * 8));

        let mut route = Vec::new();
        for i in 0..stops.len() {
            let from = stops[i];
            let to = stops[(i + 1) % stops.len()];
            if to > from {
                route.extend(from..to);
            } else {
                route.extend((to..from).rev());
            }
            route.extend(std::iter::repeat(to).take(DWELL_ENTRIES));
        }
        Self { route }
    }

    /// Platform position in shaft-global pixels.
    pub fn global_y(&self, t_ms: u64) -> i32 {
        self.route[(t_ms / STEP_MS) as usize % self.route.len()]
    }

    /// Platform position within the current room, when the shaft passes
    /// through it and the platform is on screen there.
    pub fn local_y(&self, t_ms: u64, world: &RoomManager) -> Option<i32> {
        let xy = world.room_xy();
        if xy.x != SHAFT_COLUMN {
            return None;
        }
        let rooms_from_top = (GRID_H - 1) - xy.y;
        let room_min = ROOM_STRIDE_PX * rooms_from_top;
        let global = self.global_y(t_ms);
        (global >= room_min && global <= room_min + VISIBLE_PX).then(|| global - room_min)
    }

    /// Rebuild the shaft's custom-mask slice for the current room.
    pub fn apply(&self, t_ms: u64, world: &mut RoomManager) {
        let xy = world.room_xy();
        if xy.x != SHAFT_COLUMN {
            return;
        }
        let topmost = xy.y == GRID_H - 1;
        let local = self.local_y(t_ms, world);
        let room = world.current_room_mut();
        let top = if topmost { ROOF_BAND_PX } else { 0 };
        room.base
            .fill_custom(IVec2::new(SHAFT_X_PX, top), SHAFT_WIDTH_PX, VISIBLE_PX - top, false);
        if let Some(y) = local {
            room.base.fill_custom(
                IVec2::new(SHAFT_X_PX, y),
                SHAFT_WIDTH_PX,
                PLATFORM_THICKNESS_PX,
                true,
            );
        }
    }
}
