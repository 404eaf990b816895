//! Synthetic snapshot images for tests and tooling.
//!
//! Builds a headerless RAM image with the fixed tables populated at their
//! real addresses, so decoding code paths run against small, fully
//! controlled worlds without shipping a real snapshot.

use glam::IVec2;
use rom_core::addresses::{
    ATTRIBUTE_RAM, ROOM_LAYOUT_PTR, ROOM_MONSTER_PTR, ROOM_RECORD_LEN, ROOM_TABLE,
    SPRITE_POINTERS, TELEPORTER_RECORD_LEN, TELEPORTER_TABLE, TILE_POINTERS,
};
use rom_core::snapshot::{BASE_ADDRESS, RAM_LEN};
use rom_core::Snapshot;

/// Free data area used by the bump allocator.
const ALLOC_START: u16 = 0xB000;
const ALLOC_END: u16 = 0xEC00;

pub struct SnapshotBuilder {
    image: Vec<u8>,
    cursor: u16,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            image: vec![0u8; RAM_LEN],
            cursor: ALLOC_START,
        }
    }

    pub fn poke(&mut self, addr: u16, bytes: &[u8]) {
        let off = (addr - BASE_ADDRESS) as usize;
        self.image[off..off + bytes.len()].copy_from_slice(bytes);
    }

    /// Place `bytes` in the free data area and return their address.
    pub fn alloc(&mut self, bytes: &[u8]) -> u16 {
        let addr = self.cursor;
        assert!(
            addr + bytes.len() as u16 <= ALLOC_END,
            "fixture data area exhausted"
        );
        self.poke(addr, bytes);
        self.cursor += bytes.len() as u16;
        addr
    }

    /// Register a tile: bitmap rows plus its color block bytes, exactly as
    /// stored (`colors` starts with the shared-color/flag byte).
    pub fn tile(&mut self, id: u8, width: u8, height: u8, rows: &[u8], colors: &[u8]) -> &mut Self {
        assert_eq!(rows.len(), width as usize * height as usize * 8);
        let mut rec = vec![width, height];
        rec.extend_from_slice(rows);
        rec.extend_from_slice(colors);
        let addr = self.alloc(&rec);
        self.poke(TILE_POINTERS + id as u16 * 2, &addr.to_le_bytes());
        self
    }

    /// A 1x1 fully solid tile with a single shared color.
    pub fn solid_tile(&mut self, id: u8, color: u8) -> &mut Self {
        self.tile(id, 1, 1, &[0xFF; 8], &[color])
    }

    /// Set room `room`'s placement stream (without the trailing sentinel).
    pub fn room_stream(&mut self, room: u8, stream: &[u8]) -> &mut Self {
        let mut data = stream.to_vec();
        data.push(255);
        let addr = self.alloc(&data);
        self.poke(
            ROOM_TABLE + room as u16 * ROOM_RECORD_LEN + ROOM_LAYOUT_PTR,
            &addr.to_le_bytes(),
        );
        self
    }

    /// Set room `room`'s placement stream verbatim (no sentinel added).
    pub fn room_stream_raw(&mut self, room: u8, stream: &[u8]) -> &mut Self {
        let addr = self.alloc(stream);
        self.poke(
            ROOM_TABLE + room as u16 * ROOM_RECORD_LEN + ROOM_LAYOUT_PTR,
            &addr.to_le_bytes(),
        );
        self
    }

    /// Set room `room`'s monster stream bytes.
    pub fn room_monsters(&mut self, room: u8, stream: &[u8]) -> &mut Self {
        let addr = self.alloc(stream);
        self.poke(
            ROOM_TABLE + room as u16 * ROOM_RECORD_LEN + ROOM_MONSTER_PTR,
            &addr.to_le_bytes(),
        );
        self
    }

    /// Register sprite `id` with the given frames (all `width*height*8`
    /// bytes long).
    pub fn sprite(&mut self, id: u8, width: u8, height: u8, frames: &[&[u8]]) -> &mut Self {
        let size = (width & 0b11) | (height << 2);
        let mut rec = vec![size];
        for f in frames {
            assert_eq!(f.len(), width as usize * height as usize * 8);
            rec.extend_from_slice(f);
        }
        let addr = self.alloc(&rec);
        self.poke(SPRITE_POINTERS + id as u16 * 2, &addr.to_le_bytes());
        self
    }

    /// Fill teleporter slot `slot`.
    pub fn teleporter(
        &mut self,
        slot: u16,
        from_room: u8,
        block: IVec2,
        to_room: u8,
        to_pixel: IVec2,
    ) -> &mut Self {
        let attr = ATTRIBUTE_RAM + block.y as u16 * 32 + block.x as u16;
        let rec = [
            from_room,
            (attr & 0xFF) as u8,
            (attr >> 8) as u8,
            to_room,
            to_pixel.y as u8,
            (to_pixel.x / 8) as u8,
        ];
        self.poke(TELEPORTER_TABLE + slot * TELEPORTER_RECORD_LEN, &rec);
        self
    }

    /// Finish the image: rooms left untouched get shared empty placement
    /// and monster streams.
    pub fn build(mut self) -> Snapshot {
        let empty_layout = self.alloc(&[255]);
        let empty_monsters = self.alloc(&[0; 6]);
        for room in 0..48u16 {
            let rec = ROOM_TABLE + room * ROOM_RECORD_LEN;
            let layout_off = (rec + ROOM_LAYOUT_PTR - BASE_ADDRESS) as usize;
            if self.image[layout_off] == 0 && self.image[layout_off + 1] == 0 {
                self.poke(rec + ROOM_LAYOUT_PTR, &empty_layout.to_le_bytes());
            }
            let monster_off = (rec + ROOM_MONSTER_PTR - BASE_ADDRESS) as usize;
            if self.image[monster_off] == 0 && self.image[monster_off + 1] == 0 {
                self.poke(rec + ROOM_MONSTER_PTR, &empty_monsters.to_le_bytes());
            }
        }
        Snapshot::from_ram_image(self.image).expect("fixture image has a fixed valid size")
    }
}
