//! net_core: the wire schema between game instances.
//!
//! Deliberately small: a tagged envelope around three message types. The
//! actual socket transport lives with the embedder; this crate only
//! turns messages into bytes and back.

pub mod message;

pub use message::{
    AvatarState, Message, MonsterDeath, PeerAvatarState, RoomOccupancy, WireDecode, WireEncode,
    WIRE_VERSION,
};
