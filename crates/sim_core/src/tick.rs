//! The fixed-tick simulation loop.
//!
//! Everything runs off one shared simulation-time value, in a fixed order
//! within the tick: monsters (closed form, nothing to advance), lasers,
//! teleporter animation, elevator, raft/water, floaters, avatar physics,
//! monster collision, teleporter trigger. Single-threaded; the overlays
//! are the only surface writers and own disjoint custom-mask regions.

use anyhow::Result;
use glam::IVec2;
use rom_core::Snapshot;
use world_core::RoomManager;

use crate::avatar::Avatar;
use crate::elevator::ElevatorOverlay;
use crate::floater::FloaterOverlay;
use crate::input::InputState;
use crate::laser::LaserOverlay;
use crate::player;
use crate::raft::RaftOverlay;
use crate::teleporter::TeleporterOverlay;

/// 25 Hz.
pub const TICK_MS: u64 = 40;

/// Default spawn pixel inside the spawn room.
pub const SPAWN_POS: IVec2 = IVec2::new(130, 20);

/// A monster freshly killed by the local avatar this tick; the embedder
/// forwards these to its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathEvent {
    pub room: u8,
    pub monster_id: u16,
    pub died_at: u64,
}

pub struct Sim {
    pub world: RoomManager,
    pub avatar: Avatar,
    pub input: InputState,
    teleporter: TeleporterOverlay,
    elevator: ElevatorOverlay,
    raft: RaftOverlay,
    lasers: LaserOverlay,
    floaters: FloaterOverlay,
    t_ms: u64,
}

impl Sim {
    pub fn new(snap: &Snapshot) -> Result<Self> {
        Ok(Self {
            world: RoomManager::decode(snap)?,
            avatar: Avatar::decode(snap, SPAWN_POS)?,
            input: InputState::default(),
            teleporter: TeleporterOverlay::new(),
            elevator: ElevatorOverlay::new(),
            raft: RaftOverlay::decode(snap)?,
            lasers: LaserOverlay::decode(snap)?,
            floaters: FloaterOverlay,
            t_ms: 0,
        })
    }

    pub fn time_ms(&self) -> u64 {
        self.t_ms
    }

    /// Advance one tick.
    pub fn step(&mut self) -> Vec<DeathEvent> {
        self.step_at(self.t_ms + TICK_MS)
    }

    /// Run the tick pipeline at an absolute simulation time. Exposed so an
    /// embedder reconciling against a shared clock can drive it directly.
    pub fn step_at(&mut self, t_ms: u64) -> Vec<DeathEvent> {
        self.t_ms = t_ms;

        self.lasers.apply(t_ms, &mut self.world);
        self.teleporter.animate(t_ms, &mut self.world);
        self.elevator.apply(t_ms, &mut self.world);
        self.raft.apply(t_ms, &mut self.world);
        self.floaters.apply(t_ms, &mut self.world);

        player::step_avatar(
            &mut self.world,
            &mut self.avatar,
            &self.input,
            FloaterOverlay::is_active(t_ms),
        );

        let hits = self.world.monsters_hit_by(self.avatar.frame_surface(), t_ms);
        let room = self.world.room_index();
        let events = hits
            .into_iter()
            .map(|monster_id| DeathEvent {
                room,
                monster_id,
                died_at: t_ms,
            })
            .collect();

        self.teleporter.teleport_if_required(&mut self.world, &mut self.avatar);
        events
    }

    /// Apply a death observed on a peer. Stale or foreign events are
    /// dropped.
    pub fn apply_remote_death(&mut self, event: DeathEvent) -> bool {
        self.world
            .kill_monster(event.room, event.monster_id, event.died_at)
    }
}
