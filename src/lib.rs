//! Top-level crate: configuration plus re-exports of the workspace
//! pieces, so embedders can depend on one crate.

pub mod config;

pub use net_core::{AvatarState, Message, MonsterDeath, RoomOccupancy};
pub use rom_core::Snapshot;
pub use sim_core::{Avatar, DeathEvent, InputState, Sim, TICK_MS};
pub use surface_core::Surface;
pub use world_core::RoomManager;
