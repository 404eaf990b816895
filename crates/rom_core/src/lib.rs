//! rom_core: byte-addressed access to a 48K memory snapshot.
//!
//! The snapshot is loaded once at startup and treated as read-only for the
//! rest of the session. Everything the game world is built from lives at
//! fixed, well-known addresses inside it (see [`addresses`]): an indirection
//! table of tile pointers, per-room placement and monster streams, sprite
//! data, and the teleporter table. This crate owns the address translation
//! and the low-level table decoders; room assembly lives in `world_core`.

pub mod addresses;
pub mod attr;
pub mod error;
pub mod snapshot;
pub mod sprites;
pub mod tiles;

pub use attr::ColorAttribute;
pub use error::RomError;
pub use snapshot::{Reader, Snapshot};
pub use sprites::SpriteDef;
pub use tiles::{TileDef, TileTable};
