//! The player avatar: walk-cycle frames decoded from the snapshot plus a
//! fixed collision silhouette.
//!
//! The silhouette is narrower than the drawn sprite and the same for every
//! frame, so collision behavior never depends on the animation phase.

use anyhow::{Context, Result};
use glam::IVec2;
use rom_core::addresses::{AVATAR_FRAMES_LEFT, AVATAR_FRAMES_RIGHT};
use rom_core::{ColorAttribute, Snapshot};
use surface_core::Surface;

pub const AVATAR_WIDTH_BLOCKS: u8 = 3;
pub const AVATAR_HEIGHT_PX: i32 = 32;
/// The sprite's pixel data is this much shorter than its nominal 4-block
/// height.
const HEIGHT_DEFICIENCY_PX: i32 = 4;
const FRAME_ROWS: i32 = AVATAR_HEIGHT_PX - HEIGHT_DEFICIENCY_PX;
const FRAME_LEN: usize = AVATAR_WIDTH_BLOCKS as usize * FRAME_ROWS as usize;
pub const FRAMES_PER_DIRECTION: usize = 4;

/// Frame pixel data is not left-aligned in its rows; per-frame shifts.
const X_ADJUST_RIGHT: [i32; FRAMES_PER_DIRECTION] = [-2, -4, -6, -8];
const X_ADJUST_LEFT: [i32; FRAMES_PER_DIRECTION] = [-4, -6, -8, -10];

pub struct Avatar {
    pub pos: IVec2,
    pub facing_left: bool,
    pub frame: usize,
    pub jump_frame: i32,
    pub jump_max_height: i32,
    pub fall_height: i32,
    frames_right: Vec<Surface>,
    frames_left: Vec<Surface>,
    silhouette: Surface,
}

impl Avatar {
    pub fn decode(snap: &Snapshot, pos: IVec2) -> Result<Self> {
        let color = ColorAttribute::new(5, 0, false);
        let grab = |base: u16, adjusts: [i32; FRAMES_PER_DIRECTION]| -> Result<Vec<Surface>> {
            (0..FRAMES_PER_DIRECTION)
                .map(|i| {
                    let rows = snap
                        .copy(base + (i * FRAME_LEN) as u16, FRAME_LEN)
                        .with_context(|| format!("avatar frame {i}"))?;
                    Ok(Surface::from_bitmap(
                        IVec2::ZERO,
                        AVATAR_WIDTH_BLOCKS,
                        FRAME_ROWS,
                        color,
                        rows,
                        adjusts[i],
                    ))
                })
                .collect()
        };
        Ok(Self {
            pos,
            facing_left: false,
            frame: 0,
            jump_frame: 0,
            jump_max_height: 0,
            fall_height: 0,
            frames_right: grab(AVATAR_FRAMES_RIGHT, X_ADJUST_RIGHT)?,
            frames_left: grab(AVATAR_FRAMES_LEFT, X_ADJUST_LEFT)?,
            silhouette: build_silhouette(),
        })
    }

    /// A fixtureless avatar for physics tests: no drawn frames, only the
    /// collision silhouette.
    pub fn bare(pos: IVec2) -> Self {
        Self {
            pos,
            facing_left: false,
            frame: 0,
            jump_frame: 0,
            jump_max_height: 0,
            fall_height: 0,
            frames_right: Vec::new(),
            frames_left: Vec::new(),
            silhouette: build_silhouette(),
        }
    }

    /// Collision silhouette positioned at the avatar's current pixel
    /// position.
    pub fn silhouette(&mut self) -> &Surface {
        self.silhouette.set_origin(self.pos);
        &self.silhouette
    }

    /// Drawn sprite for the current facing and walk frame, positioned at
    /// the avatar. Falls back to the silhouette when frames were not
    /// decoded.
    pub fn frame_surface(&mut self) -> &Surface {
        let has_frame = if self.facing_left {
            self.frame < self.frames_left.len()
        } else {
            self.frame < self.frames_right.len()
        };
        if has_frame {
            let frames = if self.facing_left {
                &mut self.frames_left
            } else {
                &mut self.frames_right
            };
            let f = &mut frames[self.frame];
            f.set_origin(self.pos);
            f
        } else {
            self.silhouette()
        }
    }
}

/// Rows 2..26 of the nominal sprite box: 0b01111111 in the left block,
/// 0b11100000 in the middle one.
fn build_silhouette() -> Surface {
    let mut s = Surface::new(
        IVec2::ZERO,
        AVATAR_WIDTH_BLOCKS as i32 * 8,
        AVATAR_HEIGHT_PX,
    );
    let color = ColorAttribute::default();
    for y in 0..(AVATAR_HEIGHT_PX - HEIGHT_DEFICIENCY_PX - 4) {
        s.plot_byte(IVec2::new(0, y + 2), 0b0111_1111, color);
        s.plot_byte(IVec2::new(8, y + 2), 0b1110_0000, color);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silhouette_is_narrower_than_the_sprite_box() {
        let mut a = Avatar::bare(IVec2::ZERO);
        let s = a.silhouette();
        assert!(s.solid_at(1, 2));
        assert!(s.solid_at(10, 2));
        assert!(!s.solid_at(0, 2), "leftmost column stays clear");
        assert!(!s.solid_at(11, 2), "right of the shoulder stays clear");
        assert!(!s.solid_at(1, 0), "top rows stay clear");
        assert!(!s.solid_at(1, 26), "feet deficiency rows stay clear");
    }

    #[test]
    fn silhouette_tracks_the_avatar_position() {
        let mut a = Avatar::bare(IVec2::new(40, 96));
        assert_eq!(a.silhouette().origin(), IVec2::new(40, 96));
        a.pos.x += 5;
        assert_eq!(a.silhouette().origin(), IVec2::new(45, 96));
    }
}
