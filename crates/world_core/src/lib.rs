//! world_core: decodes the snapshot's 48 rooms into render/collision
//! surfaces, parses and simulates patrol monsters, and owns the room grid.
//!
//! Everything is decoded once at startup and stays resident for the
//! session; changing rooms is an index change, never a load.

pub mod fixture;
pub mod manager;
pub mod monsters;
pub mod rooms;
pub mod teleport;

pub use manager::{RoomManager, GRID_H, GRID_W, ROOM_COUNT, START_ROOM};
pub use monsters::{Monster, MonsterPose, DEATH_REVIVE_MS};
pub use rooms::{Room, FloaterColumn, LaserSpan, ROOM_HEIGHT_PX, ROOM_WIDTH_PX};
pub use teleport::Teleporter;
