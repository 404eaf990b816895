//! Decode errors. An out-of-range address or a nil table pointer means the
//! snapshot is corrupt or from an incompatible layout; callers abort the
//! affected asset's initialization instead of reading garbage.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RomError {
    #[error("address {address:#06x}+{len} falls outside the snapshot image")]
    OutOfRange { address: u16, len: usize },
    #[error("address {address:#06x} is below the RAM base")]
    BelowBase { address: u16 },
    #[error("nil pointer in {table} table for id {id}")]
    NilPointer { table: &'static str, id: u8 },
    #[error("snapshot image is {len} bytes, expected at least {expected}")]
    Truncated { len: usize, expected: usize },
}
