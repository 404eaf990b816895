//! Room decoding: turns a placement-command stream into a render surface
//! plus the parallel classification surfaces physics queries against.
//!
//! The stream is 3-byte records `(y, x, tile_id)`. A byte in 251..=254
//! after a record introduces a repeat extension `(direction, step, count)`
//! that stamps the tile repeatedly - how staircases, ladders and girder
//! runs are encoded compactly. Byte 255 terminates the stream.

use crate::monsters::{parse_room_monsters, Monster};
use anyhow::{bail, Context, Result};
use glam::IVec2;
use rom_core::addresses::{ROOM_LAYOUT_PTR, ROOM_MONSTER_PTR, ROOM_RECORD_LEN, ROOM_TABLE};
use rom_core::tiles::TILE_ID_LIMIT;
use rom_core::{ColorAttribute, Snapshot, TileDef, TileTable};
use surface_core::Surface;

pub const ROOM_WIDTH_PX: i32 = 256;
pub const ROOM_HEIGHT_PX: i32 = 192;

/// Safety bound on placement records per room; streams longer than this
/// have lost their sentinel.
const MAX_PLACEMENTS: usize = 4096;

/// Tile id classification tables. These are part of the snapshot-layout
/// contract, same standing as the fixed table addresses.
pub const LADDER_TILES: [u8; 2] = [28, 29];
pub const TRAMPOLINE_TILES: [u8; 2] = [44, 45];
pub const STAND_ON_TILES: [u8; 3] = [52, 53, 54];
/// Decorative ids (airship hull parts among them) render without ever
/// entering the solid mask.
pub const DECOR_TILES: [u8; 4] = [96, 97, 98, 99];
/// Laser turret markers; a left/right pair on one row spans a beam.
pub const LASER_LEFT_TILE: u8 = 70;
pub const LASER_RIGHT_TILE: u8 = 71;
/// Guide column tile flanking a floater's lift shaft.
pub const FLOATER_GUIDE_TILE: u8 = 78;
/// Two girder ids render with a wrong color in the authored data; they are
/// forced to yellow ink like the original did.
pub const GIRDER_RECOLOR_TILES: [u8; 2] = [64, 65];

/// A laser beam span between a turret pair, in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaserSpan {
    /// First beam cell (the block right of the left turret).
    pub start: IVec2,
    /// Beam length in blocks.
    pub max_width: i32,
}

/// A floater: guide columns at `x` and `x + 3` blocks, lift shaft between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloaterColumn {
    pub x: i32,
    pub top: i32,
    pub height: i32,
}

#[derive(Debug)]
pub struct Room {
    pub index: u8,
    /// Render surface: ink + block colors + the solid mask; overlays add a
    /// custom mask at runtime.
    pub base: Surface,
    /// Classification surfaces, collision bits only.
    pub ladders: Surface,
    pub trampolines: Surface,
    pub stand_on: Surface,
    pub lift: Surface,
    pub lasers: Vec<LaserSpan>,
    pub floaters: Vec<FloaterColumn>,
}

enum TileClass {
    Plain,
    Ladder,
    Trampoline,
    StandOn,
    Decor,
}

fn classify(id: u8) -> TileClass {
    if LADDER_TILES.contains(&id) {
        TileClass::Ladder
    } else if TRAMPOLINE_TILES.contains(&id) {
        TileClass::Trampoline
    } else if STAND_ON_TILES.contains(&id) {
        TileClass::StandOn
    } else if DECOR_TILES.contains(&id) {
        TileClass::Decor
    } else {
        TileClass::Plain
    }
}

/// Decode room `index` (layout + monsters) from the snapshot.
pub fn decode_room(
    snap: &Snapshot,
    tiles: &mut TileTable,
    index: u8,
) -> Result<(Room, Vec<Monster>)> {
    let record = ROOM_TABLE + ROOM_RECORD_LEN * index as u16;
    let layout_ptr = snap
        .pointer(record + ROOM_LAYOUT_PTR)
        .with_context(|| format!("room {index}: layout pointer"))?;
    if layout_ptr == 0 {
        bail!("room {index}: nil layout pointer");
    }
    let room = decode_layout(snap, tiles, index, layout_ptr)
        .with_context(|| format!("room {index}: placement stream"))?;

    let monster_ptr = snap
        .pointer(record + ROOM_MONSTER_PTR)
        .with_context(|| format!("room {index}: monster pointer"))?;
    let monsters = if monster_ptr == 0 {
        Vec::new()
    } else {
        parse_room_monsters(snap, index, monster_ptr)
            .with_context(|| format!("room {index}: monster stream"))?
    };

    Ok((room, monsters))
}

fn decode_layout(snap: &Snapshot, tiles: &mut TileTable, index: u8, ptr: u16) -> Result<Room> {
    let blank = || Surface::new(IVec2::ZERO, ROOM_WIDTH_PX, ROOM_HEIGHT_PX);
    let mut room = Room {
        index,
        base: blank(),
        ladders: blank(),
        trampolines: blank(),
        stand_on: blank(),
        lift: blank(),
        lasers: Vec::new(),
        floaters: Vec::new(),
    };

    let mut left_turrets: Vec<IVec2> = Vec::new();
    let mut right_turrets: Vec<IVec2> = Vec::new();
    let mut guides: Vec<IVec2> = Vec::new();

    let mut r = snap.reader(ptr);
    let mut placements = 0usize;
    while r.lookahead()? != 255 {
        placements += 1;
        if placements > MAX_PLACEMENTS {
            bail!("no stream sentinel within {MAX_PLACEMENTS} records");
        }
        let y = r.take()? as i32;
        let x = r.take()? as i32;
        let id = r.take()?;

        let mut stamps = vec![IVec2::new(x, y)];
        let next = r.lookahead()?;
        if (251..=254).contains(&next) {
            let direction = r.take()?;
            let step = r.take()? as i32;
            let count = r.take()? as i32;
            let (dx, dy) = match direction {
                254 => (1, 0),
                251 => (-1, 0),
                253 => (0, -1),
                252 => (0, 1),
                _ => unreachable!("direction byte guarded by range check"),
            };
            stamps.clear();
            let mut cur = IVec2::new(x, y);
            for _ in 0..count {
                stamps.push(cur);
                cur += IVec2::new(dx * step, dy * step);
            }
        }

        for at in stamps {
            match id {
                LASER_LEFT_TILE => left_turrets.push(at),
                LASER_RIGHT_TILE => right_turrets.push(at),
                FLOATER_GUIDE_TILE => guides.push(at),
                _ => {}
            }
            stamp_tile(snap, tiles, &mut room, at, id)?;
        }
    }

    room.lasers = pair_turrets(index, &left_turrets, &right_turrets);
    room.floaters = group_guides(&guides);
    for f in &room.floaters {
        mark_lift_shaft(&mut room.lift, f);
    }

    Ok(room)
}

fn stamp_tile(
    snap: &Snapshot,
    tiles: &mut TileTable,
    room: &mut Room,
    at: IVec2,
    id: u8,
) -> Result<()> {
    if id >= TILE_ID_LIMIT {
        log::warn!("room {}: unknown tile id {id}, skipped", room.index);
        return Ok(());
    }
    let def: &TileDef = tiles.resolve(snap, id)?;
    let class = classify(id);
    let recolor = GIRDER_RECOLOR_TILES
        .contains(&id)
        .then(|| ColorAttribute::new(6, 0, false));

    for row in 0..def.height {
        for line in 0..8u8 {
            for bx in 0..def.width {
                let byte = def.row_byte(bx, row, line);
                // tiles stack upward from their anchor row
                let pos = IVec2::new(
                    at.x * 8 + bx as i32 * 8,
                    at.y * 8 - row as i32 * 8 + line as i32,
                );
                let color = recolor.unwrap_or_else(|| def.color_at(bx, row));
                // only plain tiles enter the walkable solid mask; classified
                // tiles render in the base and collide through their own
                // surface (ladders are passable, trampolines and stand-on
                // platforms only matter from above)
                match class {
                    TileClass::Plain => room.base.plot_byte(pos, byte, color),
                    _ => room.base.plot_byte_decor(pos, byte, color),
                }
                match class {
                    TileClass::Ladder => room.ladders.plot_byte(pos, byte, color),
                    TileClass::Trampoline => room.trampolines.plot_byte(pos, byte, color),
                    TileClass::StandOn => room.stand_on.plot_byte(pos, byte, color),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn pair_turrets(index: u8, left: &[IVec2], right: &[IVec2]) -> Vec<LaserSpan> {
    let mut spans = Vec::new();
    for l in left {
        // nearest right turret on the row, not the first in stream order
        let nearest = right
            .iter()
            .filter(|r| r.y == l.y && r.x > l.x)
            .min_by_key(|r| r.x - l.x);
        match nearest {
            Some(r) => spans.push(LaserSpan {
                start: IVec2::new(l.x + 1, l.y),
                max_width: r.x - l.x - 1,
            }),
            None => log::warn!("room {index}: unpaired laser turret at {},{}", l.x, l.y),
        }
    }
    spans
}

fn group_guides(guides: &[IVec2]) -> Vec<FloaterColumn> {
    // group guide blocks into vertical columns keyed by x
    let mut columns: Vec<FloaterColumn> = Vec::new();
    for g in guides {
        match columns.iter_mut().find(|c| c.x == g.x) {
            Some(c) => {
                let bottom = (c.top + c.height - 1).max(g.y);
                c.top = c.top.min(g.y);
                c.height = bottom - c.top + 1;
            }
            None => columns.push(FloaterColumn {
                x: g.x,
                top: g.y,
                height: 1,
            }),
        }
    }
    // a floater is a column pair three blocks apart; keep the left column
    columns.sort_by_key(|c| c.x);
    let paired: Vec<FloaterColumn> = columns
        .iter()
        .filter(|c| columns.iter().any(|r| r.x == c.x + 3 && r.top == c.top))
        .copied()
        .collect();
    paired
}

fn mark_lift_shaft(lift: &mut Surface, f: &FloaterColumn) {
    // lift shaft is the two-block interior, extended two blocks above the
    // guides so an avatar is carried over the top
    let color = ColorAttribute::default();
    for y in (f.top * 8 - 16)..((f.top + f.height + 2) * 8) {
        for bx in 0..2 {
            lift.plot_byte(IVec2::new((f.x + 1 + bx) * 8, y), 0xFF, color);
        }
    }
}
