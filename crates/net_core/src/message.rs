//! Wire message types and their little-endian codecs.
//!
//! Only three things ever cross the wire: where an avatar is, that a
//! monster died, and how many players occupy each room. Everything else
//! (monster motion, overlay phases) is derived locally from the shared
//! simulation clock, so it never needs transmitting.
//!
//! Messages travel inside [`Message`], a version-plus-tag envelope. Every
//! payload has a fixed size determined by its tag, so a stream of
//! envelopes is self-delimiting: decode them back to back until the
//! buffer is empty.

use anyhow::bail;

/// Bumped whenever any payload layout changes; peers on different
/// versions must not talk.
pub const WIRE_VERSION: u8 = 1;

const TAG_AVATAR: u8 = 1;
const TAG_PEER_AVATAR: u8 = 2;
const TAG_MONSTER_DEATH: u8 = 3;
const TAG_ROOM_OCCUPANCY: u8 = 4;

/// Envelope around everything that crosses the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Avatar(AvatarState),
    PeerAvatar(PeerAvatarState),
    Death(MonsterDeath),
    Occupancy(RoomOccupancy),
}

impl Message {
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.push(WIRE_VERSION);
        match self {
            Message::Avatar(m) => {
                out.push(TAG_AVATAR);
                m.encode(out);
            }
            Message::PeerAvatar(m) => {
                out.push(TAG_PEER_AVATAR);
                m.encode(out);
            }
            Message::Death(m) => {
                out.push(TAG_MONSTER_DEATH);
                m.encode(out);
            }
            Message::Occupancy(m) => {
                out.push(TAG_ROOM_OCCUPANCY);
                m.encode(out);
            }
        }
    }

    /// Decode one envelope, advancing `inp` past it; call repeatedly to
    /// drain a buffer of concatenated envelopes.
    pub fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let [version, tag] = take::<2>(inp)?;
        if version != WIRE_VERSION {
            bail!("unsupported wire version: {version}");
        }
        Ok(match tag {
            TAG_AVATAR => Message::Avatar(AvatarState::decode(inp)?),
            TAG_PEER_AVATAR => Message::PeerAvatar(PeerAvatarState::decode(inp)?),
            TAG_MONSTER_DEATH => Message::Death(MonsterDeath::decode(inp)?),
            TAG_ROOM_OCCUPANCY => Message::Occupancy(RoomOccupancy::decode(inp)?),
            other => bail!("unknown message tag: {other}"),
        })
    }
}

/// Types implementing wire encoding write themselves into a byte buffer.
pub trait WireEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing wire decoding reconstruct themselves from a byte
/// slice, advancing it past the consumed bytes.
pub trait WireDecode: Sized {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self>;
}

fn take<const N: usize>(inp: &mut &[u8]) -> anyhow::Result<[u8; N]> {
    if inp.len() < N {
        bail!("short read");
    }
    let (a, b) = inp.split_at(N);
    *inp = b;
    let mut buf = [0u8; N];
    buf.copy_from_slice(a);
    Ok(buf)
}

/// One avatar's pose, broadcast every tick it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarState {
    pub room: u8,
    /// Pixel position; x can be slightly negative mid-transition.
    pub x: i16,
    pub y: i16,
    pub facing_left: bool,
    pub frame: u8,
}

impl WireEncode for AvatarState {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.room);
        out.extend_from_slice(&self.x.to_le_bytes());
        out.extend_from_slice(&self.y.to_le_bytes());
        out.push(u8::from(self.facing_left));
        out.push(self.frame);
    }
}

impl WireDecode for AvatarState {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let room = take::<1>(inp)?[0];
        let x = i16::from_le_bytes(take::<2>(inp)?);
        let y = i16::from_le_bytes(take::<2>(inp)?);
        let facing_left = match take::<1>(inp)?[0] {
            0 => false,
            1 => true,
            v => bail!("bad facing byte: {v}"),
        };
        let frame = take::<1>(inp)?[0];
        if frame > 3 {
            bail!("bad walk frame: {frame}");
        }
        Ok(Self {
            room,
            x,
            y,
            facing_left,
            frame,
        })
    }
}

/// Server-relayed avatar state, keyed by the peer it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAvatarState {
    pub peer_id: u64,
    pub state: AvatarState,
}

impl WireEncode for PeerAvatarState {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.peer_id.to_le_bytes());
        self.state.encode(out);
    }
}

impl WireDecode for PeerAvatarState {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let peer_id = u64::from_le_bytes(take::<8>(inp)?);
        let state = AvatarState::decode(inp)?;
        Ok(Self { peer_id, state })
    }
}

/// A monster death stamped with the killer's simulation time. Receivers
/// apply it through the monotonic merge, so stale events are harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterDeath {
    pub room: u8,
    pub monster_id: u16,
    pub died_at: u64,
}

impl WireEncode for MonsterDeath {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.room);
        out.extend_from_slice(&self.monster_id.to_le_bytes());
        out.extend_from_slice(&self.died_at.to_le_bytes());
    }
}

impl WireDecode for MonsterDeath {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let room = take::<1>(inp)?[0];
        let monster_id = u16::from_le_bytes(take::<2>(inp)?);
        let died_at = u64::from_le_bytes(take::<8>(inp)?);
        Ok(Self {
            room,
            monster_id,
            died_at,
        })
    }
}

/// Player count per room, for the lobby map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub counts: [u8; 48],
}

impl WireEncode for RoomOccupancy {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.counts);
    }
}

impl WireDecode for RoomOccupancy {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        Ok(Self {
            counts: take::<48>(inp)?,
        })
    }
}
