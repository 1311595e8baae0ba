//! Error types for DAG import.

use rostercar_types::{BlockCodec, ContentId};

/// Errors that can occur while building or decoding the DAG.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// The payload sequence was empty. Nothing was written to the store.
    #[error("no payloads to import")]
    EmptyInput,

    /// The import configuration is unusable.
    #[error("invalid import config: {0}")]
    InvalidConfig(String),

    /// A node's bytes could not be decoded.
    #[error("malformed {what}: {reason}")]
    Decode {
        /// The message being decoded.
        what: &'static str,
        /// What went wrong.
        reason: String,
    },

    /// A block had a different codec than the caller expected.
    #[error("block {id} has codec {actual}, expected {expected}")]
    UnexpectedCodec {
        /// The offending block.
        id: ContentId,
        /// The codec the caller needed.
        expected: BlockCodec,
        /// The codec the block declares.
        actual: BlockCodec,
    },

    /// A dag-pb node carried a different UnixFS type than expected.
    #[error("node {id} is not a {expected}")]
    WrongNodeType {
        /// The offending block.
        id: ContentId,
        /// The expected UnixFS type.
        expected: &'static str,
    },

    /// The block store rejected a block.
    #[error("store error: {0}")]
    Store(#[from] rostercar_store::StoreError),
}

impl DagError {
    pub(crate) fn decode(what: &'static str, reason: impl Into<String>) -> Self {
        Self::Decode {
            what,
            reason: reason.into(),
        }
    }
}

/// Convenience alias for DAG results.
pub type DagResult<T> = Result<T, DagError>;
