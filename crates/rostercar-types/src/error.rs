use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid CID: {0}")]
    InvalidCid(String),

    #[error("unsupported CID version: {0}")]
    UnsupportedVersion(u64),

    #[error("unsupported block codec: 0x{0:x}")]
    UnsupportedCodec(u64),

    #[error("unsupported multihash: code 0x{code:x}, {len} byte digest")]
    UnsupportedHash { code: u64, len: usize },

    #[error("truncated varint")]
    TruncatedVarint,

    #[error("varint overflows u64")]
    VarintOverflow,
}
