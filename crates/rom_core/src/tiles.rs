//! Tile (UDG) definitions resolved through the snapshot's pointer table.
//!
//! A tile record is `{width, height}` in blocks, then `width*height*8`
//! bitmap bytes, then a variable-length color block: a non-zero first color
//! byte is a single shared color for the whole tile; a zero flag byte means
//! one color byte per 8x8 block follows. Getting that conditional length
//! wrong shifts every later read against the same table, so it is covered
//! by tests below.

use crate::addresses::TILE_POINTERS;
use crate::attr::ColorAttribute;
use crate::error::RomError;
use crate::snapshot::Snapshot;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Tile ids at or above this value never resolve; 251..=254 are repeat
/// direction codes and 255 is the stream sentinel.
pub const TILE_ID_LIMIT: u8 = 250;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDef {
    /// Width in 8x8 blocks.
    pub width: u8,
    /// Height in 8x8 blocks.
    pub height: u8,
    /// Row-major bitmap bytes, `width * height * 8` of them.
    pub rows: Vec<u8>,
    /// One color per block, row-major.
    pub colors: Vec<ColorAttribute>,
}

impl TileDef {
    /// Bitmap byte for pixel line `line` (0..8) of block `(block_x, block_row)`.
    pub fn row_byte(&self, block_x: u8, block_row: u8, line: u8) -> u8 {
        let w = self.width as usize;
        self.rows[block_x as usize + block_row as usize * w * 8 + line as usize * w]
    }

    pub fn color_at(&self, block_x: u8, block_row: u8) -> ColorAttribute {
        self.colors[block_row as usize * self.width as usize + block_x as usize]
    }
}

/// Cached id -> definition resolution over the tile pointer table.
pub struct TileTable {
    base: u16,
    cache: HashMap<u8, TileDef>,
}

impl Default for TileTable {
    fn default() -> Self {
        Self::new(TILE_POINTERS)
    }
}

impl TileTable {
    pub fn new(base: u16) -> Self {
        Self {
            base,
            cache: HashMap::new(),
        }
    }

    /// Resolve a tile id. Idempotent: repeated calls return the identical
    /// cached definition.
    pub fn resolve(&mut self, snap: &Snapshot, id: u8) -> Result<&TileDef, RomError> {
        match self.cache.entry(id) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let def = decode_tile(snap, self.base, id)?;
                Ok(v.insert(def))
            }
        }
    }
}

fn decode_tile(snap: &Snapshot, base: u16, id: u8) -> Result<TileDef, RomError> {
    let ptr = snap.pointer(base + id as u16 * 2)?;
    if ptr == 0 {
        return Err(RomError::NilPointer { table: "tile", id });
    }

    let mut r = snap.reader(ptr);
    let width = r.take()?;
    let height = r.take()?;
    let blocks = width as usize * height as usize;
    let rows = snap.copy(r.addr(), blocks * 8)?.to_vec();

    let color_base = r.addr().wrapping_add((blocks * 8) as u16);
    let flag = snap.peek(color_base)?;
    let colors = if flag != 0 {
        vec![ColorAttribute::from_byte(flag); blocks]
    } else {
        snap.copy(color_base.wrapping_add(1), blocks)?
            .iter()
            .map(|&b| ColorAttribute::from_byte(b))
            .collect()
    };

    Ok(TileDef {
        width,
        height,
        rows,
        colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BASE_ADDRESS, RAM_LEN};

    const TABLE: u16 = 0x7000;
    const DATA: u16 = 0x7100;

    struct Image(Vec<u8>);

    impl Image {
        fn new() -> Self {
            Image(vec![0u8; RAM_LEN])
        }
        fn poke(&mut self, addr: u16, bytes: &[u8]) {
            let off = (addr - BASE_ADDRESS) as usize;
            self.0[off..off + bytes.len()].copy_from_slice(bytes);
        }
        fn snap(self) -> Snapshot {
            Snapshot::from_ram_image(self.0).expect("image")
        }
    }

    fn tile_record(width: u8, height: u8, fill: u8, colors: &[u8]) -> Vec<u8> {
        let mut v = vec![width, height];
        v.extend(std::iter::repeat(fill).take(width as usize * height as usize * 8));
        v.extend_from_slice(colors);
        v
    }

    #[test]
    fn shared_color_when_flag_nonzero() {
        let mut img = Image::new();
        img.poke(TABLE, &DATA.to_le_bytes());
        // 2x1 tile, shared color byte 0x45 for both blocks
        img.poke(DATA, &tile_record(2, 1, 0xFF, &[0x45]));
        let snap = img.snap();
        let mut tiles = TileTable::new(TABLE);
        let def = tiles.resolve(&snap, 0).expect("tile");
        assert_eq!(def.colors.len(), 2);
        assert_eq!(def.color_at(0, 0), ColorAttribute::from_byte(0x45));
        assert_eq!(def.color_at(1, 0), ColorAttribute::from_byte(0x45));
    }

    #[test]
    fn per_block_colors_follow_zero_flag() {
        let mut img = Image::new();
        img.poke(TABLE, &DATA.to_le_bytes());
        img.poke(DATA, &tile_record(2, 1, 0xAA, &[0, 0x02, 0x03]));
        let snap = img.snap();
        let mut tiles = TileTable::new(TABLE);
        let def = tiles.resolve(&snap, 0).expect("tile");
        assert_eq!(def.color_at(0, 0), ColorAttribute::from_byte(0x02));
        assert_eq!(def.color_at(1, 0), ColorAttribute::from_byte(0x03));
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut img = Image::new();
        img.poke(TABLE, &DATA.to_le_bytes());
        img.poke(DATA, &tile_record(1, 1, 0x81, &[0x07]));
        let snap = img.snap();
        let mut tiles = TileTable::new(TABLE);
        let first = tiles.resolve(&snap, 0).expect("tile").clone();
        let second = tiles.resolve(&snap, 0).expect("tile").clone();
        assert_eq!(first, second);
    }

    #[test]
    fn nil_pointer_is_fatal() {
        let img = Image::new();
        let snap = img.snap();
        let mut tiles = TileTable::new(TABLE);
        assert_eq!(
            tiles.resolve(&snap, 3).unwrap_err(),
            RomError::NilPointer { table: "tile", id: 3 }
        );
    }

    #[test]
    fn bitmap_bytes_are_column_then_line_indexed() {
        let mut img = Image::new();
        img.poke(TABLE, &DATA.to_le_bytes());
        // 2x1 tile with distinct bytes so layout mistakes show up
        let mut rec = vec![2, 1];
        rec.extend((0u8..16).collect::<Vec<_>>());
        rec.push(0x47);
        img.poke(DATA, &rec);
        let snap = img.snap();
        let mut tiles = TileTable::new(TABLE);
        let def = tiles.resolve(&snap, 0).expect("tile");
        // line n of block x sits at x + n*width
        assert_eq!(def.row_byte(0, 0, 0), 0);
        assert_eq!(def.row_byte(1, 0, 0), 1);
        assert_eq!(def.row_byte(0, 0, 1), 2);
        assert_eq!(def.row_byte(1, 0, 7), 15);
    }
}
