//! Patrol monsters: parsed per room, simulated in closed form.
//!
//! A monster's position is a pure function of the shared simulation time -
//! a triangle wave over its travel span - not an accumulated velocity. Two
//! peers computing from the same reconciled time base therefore agree
//! exactly, which matters because monster state is never transmitted; only
//! death events are.

use anyhow::{Context, Result};
use glam::IVec2;
use rom_core::sprites::resolve_sprite;
use rom_core::{ColorAttribute, Snapshot};
use surface_core::Surface;

/// A dead monster revives this long after its death timestamp.
pub const DEATH_REVIVE_MS: u64 = 5000;

/// Pixels advanced per millisecond, expressed as ticks of the triangle
/// wave: the normal cadence covers one pixel per 40 ms frame.
const RATE_NORMAL: f64 = 0.025;
const RATE_FAST: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterPose {
    pub pos: IVec2,
    pub frame: usize,
    pub facing_left: bool,
}

#[derive(Debug)]
pub struct Monster {
    pub id: u16,
    pub horizontal: bool,
    /// The coordinate that never changes (y for horizontal movers, x for
    /// vertical ones), in pixels.
    pub fixed: i32,
    /// Varying-coordinate travel range in pixels.
    pub min: i32,
    pub span: i32,
    /// Phase offset putting the monster at its authored start position at
    /// t = 0 (reversed-start monsters begin in the return half).
    pub phase0: i32,
    pub fast: bool,
    pub color: ColorAttribute,
    frames: Vec<Surface>,
    pub died_at: Option<u64>,
}

impl Monster {
    fn rate(&self) -> f64 {
        if self.fast {
            RATE_FAST
        } else {
            RATE_NORMAL
        }
    }

    /// Full out-and-back period in milliseconds.
    pub fn period_ms(&self) -> u64 {
        ((2 * self.span) as f64 / self.rate()).round() as u64
    }

    pub fn pose(&self, t_ms: u64) -> MonsterPose {
        let tick = (t_ms as f64 * self.rate()).round() as i64;
        let cycle = (2 * self.span).max(2) as i64;
        let off = (self.phase0 as i64 + tick).rem_euclid(cycle);
        let (varying, returning) = if off < self.span as i64 {
            (self.min as i64 + off, false)
        } else {
            (self.min as i64 + 2 * self.span as i64 - off, true)
        };
        let pos = if self.horizontal {
            IVec2::new(varying as i32, self.fixed)
        } else {
            IVec2::new(self.fixed, varying as i32)
        };
        MonsterPose {
            pos,
            frame: tick.rem_euclid(self.frames.len().max(1) as i64) as usize,
            facing_left: self.horizontal && returning,
        }
    }

    /// Inert (and rendered faded) while within the revive window.
    pub fn is_dead(&self, t_ms: u64) -> bool {
        self.died_at
            .map(|d| d + DEATH_REVIVE_MS > t_ms)
            .unwrap_or(false)
    }

    /// Monotonic death merge: a strictly newer timestamp always wins, an
    /// older one never regresses recorded state. Returns whether anything
    /// changed.
    pub fn record_death(&mut self, t_ms: u64) -> bool {
        match self.died_at {
            Some(cur) if cur >= t_ms => false,
            _ => {
                self.died_at = Some(t_ms);
                true
            }
        }
    }

    /// Collision frame for the given pose, positioned in room coordinates.
    pub fn frame_surface(&mut self, pose: &MonsterPose) -> &Surface {
        let idx = pose.frame.min(self.frames.len() - 1);
        let frame = &mut self.frames[idx];
        frame.set_origin(pose.pos);
        frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Parse a room's monster stream: four sprite ids (two vertical, two
/// horizontal), two packed count nibbles, then 8 authored bytes per
/// monster.
pub fn parse_room_monsters(snap: &Snapshot, room: u8, ptr: u16) -> Result<Vec<Monster>> {
    let mut r = snap.reader(ptr);
    let vertical1 = r.take()?;
    let vertical2 = r.take()?;
    let horizontal1 = r.take()?;
    let horizontal2 = r.take()?;
    let v_counts = r.take()?;
    let h_counts = r.take()?;

    let groups = [
        (false, vertical1, v_counts >> 4),
        (false, vertical2, v_counts & 0x0F),
        (true, horizontal1, h_counts >> 4),
        (true, horizontal2, h_counts & 0x0F),
    ];

    let mut monsters = Vec::new();
    for (horizontal, sprite_id, count) in groups {
        for _ in 0..count {
            let y = r.take()? as i32;
            let x = r.take()? as i32;
            let min = r.take()? as i32;
            let max = r.take()? as i32;
            let flags = r.take()?;
            let color = ColorAttribute::from_byte(r.take()?);
            let _current_frame = r.take()?; // authored value, ignored
            let frame_count = r.take()?;

            if frame_count == 0 {
                log::warn!("room {room}: monster sprite {sprite_id} with zero frames, skipped");
                continue;
            }

            let sprite = resolve_sprite(snap, sprite_id, frame_count)
                .with_context(|| format!("sprite {sprite_id}"))?;
            let reversed = flags & 0b0000_0001 != 0;
            let fast = flags & 0b1000_0000 != 0;

            // start position in pixels; reversed movers start one block in
            let mut start = IVec2::new(x * 8, y * 8);
            if reversed {
                if horizontal {
                    start.x += 8;
                } else {
                    start.y += 8;
                }
            }

            let min_px = min * 8;
            let max_px = (max + 1) * 8;
            let span = (max_px - min_px).max(1);
            let varying = if horizontal { start.x } else { start.y };
            let phase0 = if reversed {
                span + (max_px - varying)
            } else {
                varying - min_px
            }
            .rem_euclid(2 * span);

            let frames = sprite
                .frames
                .iter()
                .map(|rows| {
                    Surface::from_bitmap(start, sprite.width, sprite.height_px(), color, rows, 0)
                })
                .collect();

            let id = room as u16 * 100 + monsters.len() as u16;
            monsters.push(Monster {
                id,
                horizontal,
                fixed: if horizontal { start.y } else { start.x },
                min: min_px,
                span,
                phase0,
                fast,
                color,
                frames,
                died_at: None,
            });
        }
    }
    Ok(monsters)
}
