//! Immutable snapshot buffer with game-address translation.
//!
//! Addresses are Z80 memory addresses; the image holds RAM from
//! `BASE_ADDRESS` (16384) upward, optionally preceded by a fixed-length
//! header (`.sna` images carry 27 header bytes). Translation is
//! `offset = header_len + address - BASE_ADDRESS`.

use crate::error::RomError;
use anyhow::Context;
use std::path::Path;

/// First RAM address present in the image.
pub const BASE_ADDRESS: u16 = 16384;
/// Header length of a `.sna` format snapshot.
pub const SNA_HEADER_LEN: usize = 27;
/// 48K of RAM follows the base address.
pub const RAM_LEN: usize = 49152;

pub struct Snapshot {
    bytes: Vec<u8>,
    header_len: usize,
}

impl Snapshot {
    /// Wrap a `.sna` image (27-byte header + 48K RAM dump).
    pub fn from_sna_bytes(bytes: Vec<u8>) -> Result<Self, RomError> {
        let expected = SNA_HEADER_LEN + RAM_LEN;
        if bytes.len() < expected {
            return Err(RomError::Truncated {
                len: bytes.len(),
                expected,
            });
        }
        Ok(Self {
            bytes,
            header_len: SNA_HEADER_LEN,
        })
    }

    /// Wrap a headerless RAM dump starting at `BASE_ADDRESS`.
    pub fn from_ram_image(bytes: Vec<u8>) -> Result<Self, RomError> {
        if bytes.len() < RAM_LEN {
            return Err(RomError::Truncated {
                len: bytes.len(),
                expected: RAM_LEN,
            });
        }
        Ok(Self {
            bytes,
            header_len: 0,
        })
    }

    /// Load a `.sna` snapshot from disk.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read snapshot: {}", path.display()))?;
        let snap = Self::from_sna_bytes(bytes)
            .with_context(|| format!("parse snapshot: {}", path.display()))?;
        log::info!("snapshot loaded: {} ({} bytes)", path.display(), snap.bytes.len());
        Ok(snap)
    }

    fn offset(&self, address: u16, len: usize) -> Result<usize, RomError> {
        if address < BASE_ADDRESS {
            return Err(RomError::BelowBase { address });
        }
        let off = self.header_len + (address - BASE_ADDRESS) as usize;
        if off + len > self.bytes.len() {
            return Err(RomError::OutOfRange { address, len });
        }
        Ok(off)
    }

    pub fn peek(&self, address: u16) -> Result<u8, RomError> {
        let off = self.offset(address, 1)?;
        Ok(self.bytes[off])
    }

    pub fn copy(&self, address: u16, len: usize) -> Result<&[u8], RomError> {
        let off = self.offset(address, len)?;
        Ok(&self.bytes[off..off + len])
    }

    /// Little-endian 2-byte pointer at `address`.
    pub fn pointer(&self, address: u16) -> Result<u16, RomError> {
        let b = self.copy(address, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn reader(&self, address: u16) -> Reader<'_> {
        Reader {
            snap: self,
            addr: address,
        }
    }
}

/// Sequential byte reader over a snapshot, mirroring the decode loops that
/// walk variable-length streams.
pub struct Reader<'a> {
    snap: &'a Snapshot,
    addr: u16,
}

impl<'a> Reader<'a> {
    pub fn addr(&self) -> u16 {
        self.addr
    }

    pub fn take(&mut self) -> Result<u8, RomError> {
        let b = self.snap.peek(self.addr)?;
        self.addr = self.addr.wrapping_add(1);
        Ok(b)
    }

    /// Peek at the next byte without consuming it.
    pub fn lookahead(&self) -> Result<u8, RomError> {
        self.snap.peek(self.addr)
    }

    pub fn take_pointer(&mut self) -> Result<u16, RomError> {
        let p = self.snap.pointer(self.addr)?;
        self.addr = self.addr.wrapping_add(2);
        Ok(p)
    }
}
