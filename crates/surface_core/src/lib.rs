//! surface_core: rectangular pixel canvas combining visible ink, a solid
//! collision mask, per-block color attributes and an optional custom
//! collision mask.
//!
//! The custom mask exists for the places where visuals and solidity must
//! diverge (moving platforms, hazard beams): when present it takes
//! precedence over the solid mask for every collision query, but never for
//! rendering. Surfaces are allocated once per room and mutated in place by
//! the overlay animators; each overlay owns a disjoint region of the custom
//! mask, so no two writers contend for the same cell within a tick.

use glam::IVec2;
use rom_core::ColorAttribute;

#[derive(Debug, Clone)]
pub struct Surface {
    origin: IVec2,
    width: i32,
    height: i32,
    ink: Vec<bool>,
    solid: Vec<bool>,
    custom: Option<Vec<bool>>,
    attrs: Vec<ColorAttribute>,
    attr_cols: i32,
}

impl Surface {
    /// Create a blank surface. Width and height are in pixels and should be
    /// multiples of 8 (attribute blocks are 8x8).
    pub fn new(origin: IVec2, width: i32, height: i32) -> Self {
        let px = (width * height) as usize;
        let attr_cols = (width + 7) / 8;
        let attr_rows = (height + 7) / 8;
        Self {
            origin,
            width,
            height,
            ink: vec![false; px],
            solid: vec![false; px],
            custom: None,
            attrs: vec![ColorAttribute::default(); (attr_cols * attr_rows) as usize],
            attr_cols,
        }
    }

    /// Build a surface from raw bitmap rows, one byte per block column per
    /// pixel line. `x_adjust` shifts the plotted bits horizontally for
    /// sprite data that is not left-aligned in its rows.
    pub fn from_bitmap(
        origin: IVec2,
        width_blocks: u8,
        height_px: i32,
        color: ColorAttribute,
        rows: &[u8],
        x_adjust: i32,
    ) -> Self {
        let mut s = Self::new(origin, width_blocks as i32 * 8, height_px);
        for y in 0..height_px {
            for bx in 0..width_blocks as i32 {
                let idx = (y * width_blocks as i32 + bx) as usize;
                let byte = rows.get(idx).copied().unwrap_or(0);
                s.plot_byte(IVec2::new(bx * 8 + x_adjust, y), byte, color);
            }
        }
        s
    }

    pub fn origin(&self) -> IVec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: IVec2) {
        self.origin = origin;
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Visible ink bit at local pixel coordinates.
    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).map(|i| self.ink[i]).unwrap_or(false)
    }

    /// Collision bit at local pixel coordinates: custom mask when present,
    /// solid mask otherwise.
    pub fn collision_at(&self, x: i32, y: i32) -> bool {
        match self.idx(x, y) {
            Some(i) => match &self.custom {
                Some(c) => c[i],
                None => self.solid[i],
            },
            None => false,
        }
    }

    /// Solid-mask bit, ignoring any custom mask.
    pub fn solid_at(&self, x: i32, y: i32) -> bool {
        self.idx(x, y).map(|i| self.solid[i]).unwrap_or(false)
    }

    pub fn block_color(&self, block: IVec2) -> ColorAttribute {
        let i = (block.y * self.attr_cols + block.x) as usize;
        self.attrs.get(i).copied().unwrap_or_default()
    }

    fn set_attr(&mut self, block_x: i32, block_y: i32, color: ColorAttribute) {
        if block_x < 0 || block_y < 0 || block_x >= self.attr_cols {
            return;
        }
        let i = (block_y * self.attr_cols + block_x) as usize;
        if i < self.attrs.len() {
            self.attrs[i] = color;
        }
    }

    /// Unpack `byte` into 8 horizontal pixels (MSB first), setting ink and
    /// the solid mask, and record the block color.
    pub fn plot_byte(&mut self, pos: IVec2, byte: u8, color: ColorAttribute) {
        self.plot_byte_inner(pos, byte, color, true, None);
    }

    /// Like [`plot_byte`](Self::plot_byte) but never touching the solid
    /// mask; used for decorative tiles that render without colliding.
    pub fn plot_byte_decor(&mut self, pos: IVec2, byte: u8, color: ColorAttribute) {
        self.plot_byte_inner(pos, byte, color, false, None);
    }

    /// Like [`plot_byte`](Self::plot_byte) but the collision bits come from
    /// `mask` and land in the custom mask; the solid mask is untouched.
    pub fn plot_byte_masked(&mut self, pos: IVec2, byte: u8, color: ColorAttribute, mask: u8) {
        self.plot_byte_inner(pos, byte, color, false, Some(mask));
    }

    fn plot_byte_inner(
        &mut self,
        pos: IVec2,
        byte: u8,
        color: ColorAttribute,
        solid: bool,
        mask: Option<u8>,
    ) {
        self.set_attr(pos.x.div_euclid(8), pos.y.div_euclid(8), color);
        if mask.is_some() && self.custom.is_none() {
            // first custom write: seed the mask from the solid bits so the
            // rest of the surface keeps colliding as before
            self.custom = Some(self.solid.clone());
        }
        for bit in 0..8 {
            let x = pos.x + bit;
            let Some(i) = self.idx(x, pos.y) else { continue };
            let on = byte & (0x80 >> bit) != 0;
            self.ink[i] = on;
            if solid {
                self.solid[i] = on;
            }
            if let (Some(m), Some(c)) = (mask, self.custom.as_mut()) {
                c[i] = m & (0x80 >> bit) != 0;
            }
        }
    }

    /// Recolor an 8x8 block without touching any collision bits.
    pub fn set_block_color(&mut self, block: IVec2, color: ColorAttribute) {
        self.set_attr(block.x, block.y, color);
    }

    /// Bulk-write a rectangular region of the custom collision mask. The
    /// rectangle is clamped to the surface; the mask is seeded from the
    /// solid bits on first use.
    pub fn fill_custom(&mut self, min: IVec2, w: i32, h: i32, value: bool) {
        let width = self.width;
        let height = self.height;
        let custom = self
            .custom
            .get_or_insert_with(|| self.solid.clone());
        let x0 = min.x.max(0);
        let y0 = min.y.max(0);
        let x1 = (min.x + w).min(width);
        let y1 = (min.y + h).min(height);
        for y in y0..y1 {
            for x in x0..x1 {
                custom[(y * width + x) as usize] = value;
            }
        }
    }

    pub fn has_custom_mask(&self) -> bool {
        self.custom.is_some()
    }

    /// Bit-exact overlap test against another surface, in world
    /// coordinates. Rejects via bounding box first, then scans the smaller
    /// surface's collision bits mapped into the other's frame. Symmetric.
    pub fn overlaps(&self, other: &Surface) -> bool {
        self.overlaps_shifted(other, IVec2::ZERO)
    }

    /// [`overlaps`](Self::overlaps) with `self` displaced by `shift`
    /// without mutating it; used for one-pixel collision probes.
    pub fn overlaps_shifted(&self, other: &Surface, shift: IVec2) -> bool {
        let a_org = self.origin + shift;
        let b_org = other.origin;
        if a_org.x + self.width < b_org.x
            || a_org.x > b_org.x + other.width
            || a_org.y + self.height < b_org.y
            || a_org.y > b_org.y + other.height
        {
            return false;
        }

        let self_smaller = self.width * self.height <= other.width * other.height;
        let (small, big, small_org, big_org) = if self_smaller {
            (self, other, a_org, b_org)
        } else {
            (other, self, b_org, a_org)
        };

        for y in 0..small.height {
            for x in 0..small.width {
                if !small.collision_at(x, y) {
                    continue;
                }
                let bx = x + small_org.x - big_org.x;
                let by = y + small_org.y - big_org.y;
                if big.collision_at(bx, by) {
                    return true;
                }
            }
        }
        false
    }
}
