use rostercar_types::{ContentId, TypeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarError {
    #[error("invalid CAR header: {0}")]
    InvalidHeader(String),

    #[error("unsupported CAR version: {0}")]
    UnsupportedVersion(u64),

    #[error("CAR header declares no roots")]
    NoRoots,

    #[error("truncated CAR data at offset {offset}: {reason}")]
    Truncated { offset: u64, reason: String },

    #[error("bad CID at offset {offset}: {source}")]
    Cid {
        offset: u64,
        #[source]
        source: TypeError,
    },

    #[error("block at offset {offset} does not hash to {id}")]
    BlockMismatch { id: ContentId, offset: u64 },

    #[error("root {0} is not among the archive's blocks")]
    MissingRoot(ContentId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CarResult<T> = Result<T, CarError>;
