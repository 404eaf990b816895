//! Laser overlay: beams sweeping between turret pairs.
//!
//! Beam width follows a grow/shrink/rest triangle over time; a
//! per-position phase offset keeps separate beams out of sync. Active
//! cells carry a full hazard byte in the custom mask, cleared cells none.

use anyhow::{Context, Result};
use glam::IVec2;
use rom_core::addresses::LASER_FRAMES;
use rom_core::{ColorAttribute, Snapshot};
use world_core::{LaserSpan, RoomManager};

const FRAME_COUNT: usize = 4;
/// The beam rests for as long as two full grow/shrink sweeps.
const REST_FACTOR: u64 = 3;

pub struct LaserOverlay {
    frames: [[u8; 8]; FRAME_COUNT],
}

impl LaserOverlay {
    pub fn decode(snap: &Snapshot) -> Result<Self> {
        let mut frames = [[0u8; 8]; FRAME_COUNT];
        for (i, frame) in frames.iter_mut().enumerate() {
            let bytes = snap
                .copy(LASER_FRAMES + i as u16 * 8, 8)
                .context("laser frame data")?;
            frame.copy_from_slice(bytes);
        }
        Ok(Self { frames })
    }

    /// Beam width in blocks at `t_ms` for a span anchored at its left
    /// turret.
    pub fn beam_width(span: &LaserSpan, t_ms: u64) -> i32 {
        let max = span.max_width as u64;
        if max == 0 {
            return 0;
        }
        // beams anchored at different positions fire out of phase
        let jitter = span.start.x as u64 * 7000 + span.start.y as u64 * 18300;
        let phase = (t_ms + jitter) / 100 % (max * 2 * REST_FACTOR);
        if phase < max {
            phase as i32
        } else if phase < max * 2 {
            (max * 2 - phase) as i32
        } else {
            0
        }
    }

    /// Redraw every beam in the current room for this instant.
    pub fn apply(&self, t_ms: u64, world: &mut RoomManager) {
        let spans = world.current_room().lasers.clone();
        if spans.is_empty() {
            return;
        }
        let color = ColorAttribute::new(((t_ms % 7) + 1) as u8, 0, true);
        let frame = &self.frames[(t_ms / 60) as usize % FRAME_COUNT];
        let room = world.current_room_mut();
        for span in &spans {
            let width = Self::beam_width(span, t_ms);
            for x in 0..span.max_width {
                let active = x < width;
                for y in 0..8 {
                    let pos = IVec2::new((span.start.x + x) * 8, span.start.y * 8 + y);
                    if active {
                        room.base
                            .plot_byte_masked(pos, frame[y as usize], color, 0xFF);
                    } else {
                        room.base.plot_byte_masked(pos, 0, color, 0);
                    }
                }
            }
        }
    }
}
