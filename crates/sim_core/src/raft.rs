//! Raft and water overlay for the bottom row of rooms.
//!
//! The raft circles the whole world: its global x is derived from time
//! modulo the world width, then projected into the current room. The
//! water rows are redrawn every tick from the snapshot's ripple bytes.

use anyhow::{Context, Result};
use glam::IVec2;
use rom_core::addresses::{RAFT_FRAMES, WATER_BYTES, WATER_BYTES_LEN};
use rom_core::{ColorAttribute, Snapshot};
use surface_core::Surface;
use world_core::{RoomManager, GRID_W, ROOM_WIDTH_PX};

const RAFT_FRAME_COUNT: usize = 4;
const RAFT_WIDTH_BLOCKS: i32 = 4;
/// Pixel row the raft and its collision strip travel on.
const RAFT_ROW_PX: i32 = 18 * 8;
/// Playable width of one room as the raft sees it, in pixels.
const ROOM_SPAN_PX: i64 = 30 * 8;
const WORLD_WIDTH_PX: i64 = ROOM_SPAN_PX * GRID_W as i64;

/// Pixel row of the water band within a room.
const WATER_ROW_PX: i32 = 19 * 8;

pub struct RaftOverlay {
    frames: Vec<Surface>,
    ripple: Vec<u8>,
    water: Surface,
}

impl RaftOverlay {
    pub fn decode(snap: &Snapshot) -> Result<Self> {
        let color = ColorAttribute::new(2, 0, false);
        let mut frames = Vec::with_capacity(RAFT_FRAME_COUNT);
        for frame in 0..RAFT_FRAME_COUNT as i32 {
            let mut s = Surface::new(IVec2::ZERO, RAFT_WIDTH_BLOCKS * 8, 8);
            for block in 0..RAFT_WIDTH_BLOCKS {
                for y in 0..8 {
                    let byte = snap
                        .peek(RAFT_FRAMES + (y + block * 8 + frame * 8 * RAFT_WIDTH_BLOCKS) as u16)
                        .context("raft frame data")?;
                    // frame data is stored as single-block strips, drawn
                    // with a per-frame skew
                    s.plot_byte(IVec2::new(block * 8 - (3 - frame) * 2 + 1, y), byte, color);
                }
            }
            frames.push(s);
        }
        let ripple = snap
            .copy(WATER_BYTES, WATER_BYTES_LEN as usize)
            .context("water ripple bytes")?
            .to_vec();
        Ok(Self {
            frames,
            ripple,
            water: Surface::new(IVec2::new(0, WATER_ROW_PX), ROOM_WIDTH_PX, 8),
        })
    }

    fn raft_global_x(t_ms: u64) -> i64 {
        WORLD_WIDTH_PX - (t_ms / 50) as i64 % WORLD_WIDTH_PX
    }

    fn raw_local_x(t_ms: u64, world: &RoomManager) -> i64 {
        // rooms count from the right along the raft's direction of travel
        let room = (GRID_W - 1 - world.room_xy().x) as i64;
        let global = Self::raft_global_x(t_ms);
        if room == 0 {
            if global < 2 * ROOM_WIDTH_PX as i64 {
                global
            } else {
                global - WORLD_WIDTH_PX
            }
        } else {
            global - room * ROOM_SPAN_PX
        }
    }

    /// Raft position within the current room, or None when it is off this
    /// room's screen. The x may be slightly negative while the raft slides
    /// off the left edge.
    pub fn raft_local_x(t_ms: u64, world: &RoomManager) -> Option<i32> {
        let x = Self::raw_local_x(t_ms, world);
        (-24..=(32 * 8)).contains(&x).then_some(x as i32)
    }

    pub fn frame_index(t_ms: u64) -> usize {
        (t_ms / 125) as usize % RAFT_FRAME_COUNT
    }

    /// Drawn raft sprite for this instant, positioned in room coordinates,
    /// when visible in the current room.
    pub fn raft_surface(&mut self, t_ms: u64, world: &RoomManager) -> Option<&Surface> {
        let x = Self::raft_local_x(t_ms, world)?;
        let frame = &mut self.frames[Self::frame_index(t_ms)];
        frame.set_origin(IVec2::new(x, RAFT_ROW_PX));
        Some(frame)
    }

    /// Water band, redrawn for this instant; origin is its room position.
    pub fn water_surface(&self) -> &Surface {
        &self.water
    }

    /// Rebuild the raft collision strip and the water animation for the
    /// current room. Does nothing above the bottom row.
    pub fn apply(&mut self, t_ms: u64, world: &mut RoomManager) {
        if world.room_xy().y > 0 {
            return;
        }

        let raft_x = Self::raw_local_x(t_ms, world);
        let room = world.current_room_mut();

        // wipe the raft's travel row, ink and collision both
        let clear = ColorAttribute::new(2, 0, false);
        for block in 0..32 {
            for y in 0..8 {
                room.base
                    .plot_byte_masked(IVec2::new(block * 8, RAFT_ROW_PX + y), 0, clear, 0);
            }
        }

        let width = (if raft_x < 0 { 32 + raft_x } else { 32 }) as i32;
        if width > 0 && raft_x < ROOM_WIDTH_PX as i64 {
            room.base.fill_custom(
                IVec2::new(raft_x.max(0) as i32, RAFT_ROW_PX),
                width,
                8,
                true,
            );
        }

        // ripple rows scroll with time; the rest of the band is flat
        let offset = (t_ms / 125) as usize;
        let water_ink = ColorAttribute::new(7, 1, true);
        for block in 0..32usize {
            for y in 0..8usize {
                let byte = if y < 3 {
                    self.ripple[(y + (block + offset) * 4) % self.ripple.len()]
                } else {
                    0
                };
                self.water
                    .plot_byte_masked(IVec2::new(block as i32 * 8, y as i32), byte, water_ink, 0);
            }
        }
    }
}
