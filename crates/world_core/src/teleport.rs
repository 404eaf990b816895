//! Teleporter table: static 6-byte records parsed once at startup.

use anyhow::Result;
use glam::IVec2;
use rom_core::addresses::{
    ATTRIBUTE_RAM, TELEPORTER_COUNT, TELEPORTER_RECORD_LEN, TELEPORTER_TABLE,
};
use rom_core::Snapshot;

const BLOCKS_PER_LINE: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teleporter {
    pub from_room: u8,
    /// Trigger zone anchor in blocks.
    pub block_pos: IVec2,
    pub to_room: u8,
    /// Arrival position in pixels.
    pub to_pixel: IVec2,
}

/// Parse the teleporter table, skipping unused or malformed slots.
pub fn parse_teleporters(snap: &Snapshot, room_count: u8) -> Result<Vec<Teleporter>> {
    let mut out = Vec::new();
    for slot in 0..TELEPORTER_COUNT {
        let mut r = snap.reader(TELEPORTER_TABLE + slot * TELEPORTER_RECORD_LEN);
        let from_room = r.take()?;
        let attr_addr = r.take_pointer()?;
        let to_room = r.take()?;
        let to_y = r.take()? as i32;
        let to_x = r.take()? as i32;

        // trigger positions are stored as attribute-RAM addresses
        if attr_addr < ATTRIBUTE_RAM || from_room >= room_count || to_room >= room_count {
            log::debug!("teleporter slot {slot}: unused or malformed, skipped");
            continue;
        }
        let attr_pos = attr_addr - ATTRIBUTE_RAM;
        out.push(Teleporter {
            from_room,
            block_pos: IVec2::new(
                (attr_pos % BLOCKS_PER_LINE) as i32,
                (attr_pos / BLOCKS_PER_LINE) as i32,
            ),
            to_room,
            to_pixel: IVec2::new(to_x * 8, to_y),
        });
    }
    Ok(out)
}
