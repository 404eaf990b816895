//! Sprite data resolved through the sprite pointer table.
//!
//! Sprite records start with one packed size byte (width in blocks in bits
//! 0..1, height in bits 2..7) followed by raw frame rows; animation frames
//! sit back to back, `width * height * 8` bytes each.

use crate::addresses::SPRITE_POINTERS;
use crate::error::RomError;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone)]
pub struct SpriteDef {
    /// Width in 8x8 blocks.
    pub width: u8,
    /// Height in 8x8 blocks.
    pub height: u8,
    /// One bitmap per animation frame, row-major rows.
    pub frames: Vec<Vec<u8>>,
}

impl SpriteDef {
    pub fn width_px(&self) -> i32 {
        self.width as i32 * 8
    }

    pub fn height_px(&self) -> i32 {
        self.height as i32 * 8
    }
}

/// Resolve sprite `id` with `frame_count` consecutive frames.
pub fn resolve_sprite(snap: &Snapshot, id: u8, frame_count: u8) -> Result<SpriteDef, RomError> {
    resolve_sprite_at(snap, SPRITE_POINTERS, id, frame_count)
}

pub fn resolve_sprite_at(
    snap: &Snapshot,
    table: u16,
    id: u8,
    frame_count: u8,
) -> Result<SpriteDef, RomError> {
    let ptr = snap.pointer(table + id as u16 * 2)?;
    if ptr == 0 {
        return Err(RomError::NilPointer { table: "sprite", id });
    }

    let size = snap.peek(ptr)?;
    let width = size & 0b11;
    let height = (size & 0b1111_1100) >> 2;
    let frame_len = width as usize * height as usize * 8;

    let mut frames = Vec::with_capacity(frame_count as usize);
    let mut addr = ptr.wrapping_add(1);
    for _ in 0..frame_count {
        frames.push(snap.copy(addr, frame_len)?.to_vec());
        addr = addr.wrapping_add(frame_len as u16);
    }

    Ok(SpriteDef {
        width,
        height,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{BASE_ADDRESS, RAM_LEN};

    #[test]
    fn unpacks_size_byte_and_frames() {
        let table: u16 = 0x9000;
        let data: u16 = 0x9100;
        let mut image = vec![0u8; RAM_LEN];
        let poke = |image: &mut Vec<u8>, addr: u16, bytes: &[u8]| {
            let off = (addr - BASE_ADDRESS) as usize;
            image[off..off + bytes.len()].copy_from_slice(bytes);
        };
        poke(&mut image, table + 4, &data.to_le_bytes());
        // width 2, height 2 -> size byte 0b0000_1010
        let mut rec = vec![0b0000_1010u8];
        rec.extend(std::iter::repeat(0x11).take(32));
        rec.extend(std::iter::repeat(0x22).take(32));
        poke(&mut image, data, &rec);

        let snap = Snapshot::from_ram_image(image).expect("image");
        let def = resolve_sprite_at(&snap, table, 2, 2).expect("sprite");
        assert_eq!((def.width, def.height), (2, 2));
        assert_eq!(def.frames.len(), 2);
        assert!(def.frames[0].iter().all(|&b| b == 0x11));
        assert!(def.frames[1].iter().all(|&b| b == 0x22));
    }

    #[test]
    fn nil_sprite_pointer_is_fatal() {
        let image = vec![0u8; RAM_LEN];
        let snap = Snapshot::from_ram_image(image).expect("image");
        assert!(matches!(
            resolve_sprite_at(&snap, 0x9000, 0, 1),
            Err(RomError::NilPointer { table: "sprite", .. })
        ));
    }
}
