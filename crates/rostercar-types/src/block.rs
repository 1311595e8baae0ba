use bytes::Bytes;

use crate::cid::{BlockCodec, ContentId};

/// An immutable block: bytes plus the identifier derived from them.
///
/// `Block` does not hash on construction. Use `rostercar_crypto::ContentHasher`
/// to build a block whose identifier is known to match, or to verify one
/// that arrived from elsewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    id: ContentId,
    data: Bytes,
}

impl Block {
    /// Pair an identifier with its bytes.
    pub fn new(id: ContentId, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// The block's identifier.
    pub fn id(&self) -> &ContentId {
        &self.id
    }

    /// The codec declared by the identifier.
    pub fn codec(&self) -> BlockCodec {
        self.id.codec()
    }

    /// The block's bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Size of the block's bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Split into identifier and bytes.
    pub fn into_parts(self) -> (ContentId, Bytes) {
        (self.id, self.data)
    }
}
