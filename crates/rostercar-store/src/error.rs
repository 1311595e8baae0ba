use rostercar_types::ContentId;

/// Errors from block store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The block's bytes do not hash to its identifier.
    #[error("hash mismatch for {id}: computed {computed}")]
    HashMismatch { id: ContentId, computed: ContentId },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
