//! Fixed addresses of the supported snapshot layout. The format is
//! versioned implicitly by these locations; a snapshot with different
//! tables will fail decoding rather than load wrong.

/// Room records: 12 bytes each, 48 rooms.
pub const ROOM_TABLE: u16 = 0x69E6;
pub const ROOM_RECORD_LEN: u16 = 12;
/// Byte offset of the placement-stream pointer inside a room record.
pub const ROOM_LAYOUT_PTR: u16 = 0;
/// Byte offset of the monster-stream pointer inside a room record.
pub const ROOM_MONSTER_PTR: u16 = 7;

/// Tile pointer table: 2 bytes per tile id.
pub const TILE_POINTERS: u16 = 0x6C46;

/// Sprite pointer table: 2 bytes per sprite id.
pub const SPRITE_POINTERS: u16 = 0xAE60;

/// Teleporter table: 6 bytes per entry.
pub const TELEPORTER_TABLE: u16 = 0xEDBC;
pub const TELEPORTER_COUNT: u16 = 10;
pub const TELEPORTER_RECORD_LEN: u16 = 6;
/// Teleporter trigger positions are stored as attribute-RAM addresses.
pub const ATTRIBUTE_RAM: u16 = 0x5800;

/// Four 8-byte animation frames for the laser beam graphic.
pub const LASER_FRAMES: u16 = 0xECBD;

/// Four raft frames, four blocks of 8 rows each.
pub const RAFT_FRAMES: u16 = 0x6899;
/// Ripple bytes cycled through by the water animation.
pub const WATER_BYTES: u16 = 0x6985;
pub const WATER_BYTES_LEN: u16 = 97;

/// Avatar walk cycles, four frames per direction.
pub const AVATAR_FRAMES_RIGHT: u16 = 0x633A;
pub const AVATAR_FRAMES_LEFT: u16 = 0x648A;
