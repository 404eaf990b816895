//! The 8x6 room grid: decodes every room once, tracks the active index and
//! routes collision queries to the active room's surfaces.
//!
//! Columns wrap (the world is a horizontal torus); rows clamp at the top
//! and bottom. All 48 rooms stay resident for the session, so a transition
//! is just an index change.

use crate::monsters::Monster;
use crate::rooms::{decode_room, Room};
use crate::teleport::{parse_teleporters, Teleporter};
use anyhow::{Context, Result};
use glam::IVec2;
use rom_core::{Snapshot, TileTable};
use surface_core::Surface;

pub const GRID_W: i32 = 8;
pub const GRID_H: i32 = 6;
pub const ROOM_COUNT: usize = 48;

/// Default spawn room.
pub const START_ROOM: IVec2 = IVec2::new(3, 5);

#[derive(Debug)]
pub struct RoomManager {
    rooms: Vec<Room>,
    monsters: Vec<Vec<Monster>>,
    teleporters: Vec<Teleporter>,
    room_x: i32,
    room_y: i32,
}

impl RoomManager {
    /// Decode all 48 rooms and the teleporter table from the snapshot.
    pub fn decode(snap: &Snapshot) -> Result<Self> {
        let mut tiles = TileTable::default();
        let mut rooms = Vec::with_capacity(ROOM_COUNT);
        let mut monsters = Vec::with_capacity(ROOM_COUNT);
        for index in 0..ROOM_COUNT as u8 {
            let (room, room_monsters) =
                decode_room(snap, &mut tiles, index).with_context(|| format!("room {index}"))?;
            rooms.push(room);
            monsters.push(room_monsters);
        }
        let teleporters = parse_teleporters(snap, ROOM_COUNT as u8)?;
        log::info!(
            "world decoded: {} rooms, {} monsters, {} teleporters",
            rooms.len(),
            monsters.iter().map(Vec::len).sum::<usize>(),
            teleporters.len()
        );
        Ok(Self {
            rooms,
            monsters,
            teleporters,
            room_x: START_ROOM.x,
            room_y: START_ROOM.y,
        })
    }

    pub fn room_index(&self) -> u8 {
        (self.room_x + self.room_y * GRID_W) as u8
    }

    pub fn room_xy(&self) -> IVec2 {
        IVec2::new(self.room_x, self.room_y)
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.room_index() as usize]
    }

    pub fn current_room_mut(&mut self) -> &mut Room {
        let i = self.room_index() as usize;
        &mut self.rooms[i]
    }

    pub fn room(&self, index: u8) -> &Room {
        &self.rooms[index as usize]
    }

    pub fn move_left(&mut self) {
        self.room_x = (self.room_x + GRID_W - 1) % GRID_W;
    }

    pub fn move_right(&mut self) {
        self.room_x = (self.room_x + 1) % GRID_W;
    }

    /// Row 5 is the topmost; moving up clamps there.
    pub fn move_up(&mut self) {
        self.room_y = (self.room_y + 1).min(GRID_H - 1);
    }

    /// Row 0 is the bottom (water) row; moving down clamps there.
    pub fn move_down(&mut self) {
        self.room_y = (self.room_y - 1).max(0);
    }

    pub fn move_to(&mut self, xy: IVec2) {
        self.room_x = xy.x.rem_euclid(GRID_W);
        self.room_y = xy.y.clamp(0, GRID_H - 1);
    }

    pub fn move_to_index(&mut self, index: u8) {
        self.move_to(IVec2::new(
            index as i32 % GRID_W,
            index as i32 / GRID_W,
        ));
    }

    pub fn teleporter_for_current_room(&self) -> Option<&Teleporter> {
        let idx = self.room_index();
        self.teleporters.iter().find(|t| t.from_room == idx)
    }

    // --- collision query routing -----------------------------------------

    /// Probe a surface (typically the avatar's collision silhouette)
    /// against the active room, displaced by `shift`.
    pub fn collides(&self, probe: &Surface, shift: IVec2) -> bool {
        probe.overlaps_shifted(&self.current_room().base, shift)
    }

    pub fn is_in_ladder(&self, probe: &Surface) -> bool {
        probe.overlaps(&self.current_room().ladders)
    }

    /// Standing on a ladder's top edge: ladder pixels one below but not at
    /// the current position.
    pub fn is_on_ladder_top(&self, probe: &Surface) -> bool {
        let ladders = &self.current_room().ladders;
        probe.overlaps_shifted(ladders, IVec2::new(0, 1)) && !probe.overlaps(ladders)
    }

    pub fn is_on_trampoline(&self, probe: &Surface) -> bool {
        probe.overlaps_shifted(&self.current_room().trampolines, IVec2::new(0, 1))
    }

    /// Stand-on-only surfaces block downward motion but nothing else.
    pub fn is_on_stand_on(&self, probe: &Surface) -> bool {
        probe.overlaps_shifted(&self.current_room().stand_on, IVec2::new(0, 1))
    }

    pub fn is_in_lift_column(&self, probe: &Surface) -> bool {
        probe.overlaps(&self.current_room().lift)
    }

    // --- monsters ---------------------------------------------------------

    pub fn current_monsters(&self) -> &[Monster] {
        &self.monsters[self.room_index() as usize]
    }

    pub fn monsters_in(&self, room: u8) -> &[Monster] {
        &self.monsters[room as usize]
    }

    pub fn current_monsters_mut(&mut self) -> &mut [Monster] {
        let i = self.room_index() as usize;
        &mut self.monsters[i]
    }

    /// Apply an externally observed monster death. Ignored unless the
    /// monster is room-local and the timestamp is strictly newer.
    pub fn kill_monster(&mut self, room: u8, monster_id: u16, t_ms: u64) -> bool {
        if room as usize >= ROOM_COUNT {
            return false;
        }
        match self.monsters[room as usize]
            .iter_mut()
            .find(|m| m.id == monster_id)
        {
            Some(m) => m.record_death(t_ms),
            None => {
                log::warn!("death event for unknown monster {monster_id} in room {room}");
                false
            }
        }
    }

    /// Collide the avatar against the active room's live monsters; each hit
    /// monster records a local death at `t_ms`. Returns the ids that were
    /// freshly hit.
    pub fn monsters_hit_by(&mut self, probe: &Surface, t_ms: u64) -> Vec<u16> {
        let i = self.room_index() as usize;
        let mut hit = Vec::new();
        for m in &mut self.monsters[i] {
            if m.is_dead(t_ms) {
                continue;
            }
            let pose = m.pose(t_ms);
            if m.frame_surface(&pose).overlaps(probe) && m.record_death(t_ms) {
                hit.push(m.id);
            }
        }
        hit
    }
}
