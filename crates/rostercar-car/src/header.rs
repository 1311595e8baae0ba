use ipld_core::cid::Cid;
use rostercar_types::ContentId;
use serde::{Deserialize, Serialize};

use crate::error::{CarError, CarResult};

/// CARv1 header.
///
/// Encoded as a dag-cbor map. Field order here is the canonical dag-cbor key
/// order (`roots` sorts before `version`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarHeader {
    pub roots: Vec<Cid>,
    pub version: u64,
}

impl CarHeader {
    /// A version 1 header with the given roots.
    pub fn new(roots: &[ContentId]) -> Self {
        Self {
            roots: roots.iter().map(|id| *id.as_cid()).collect(),
            version: 1,
        }
    }

    /// dag-cbor bytes, without the length prefix.
    pub fn encode(&self) -> CarResult<Vec<u8>> {
        serde_ipld_dagcbor::to_vec(self).map_err(|e| CarError::InvalidHeader(e.to_string()))
    }

    /// Parse and validate dag-cbor header bytes.
    pub fn decode(data: &[u8]) -> CarResult<Self> {
        let header: Self = serde_ipld_dagcbor::from_slice(data)
            .map_err(|e| CarError::InvalidHeader(e.to_string()))?;
        if header.version != 1 {
            return Err(CarError::UnsupportedVersion(header.version));
        }
        if header.roots.is_empty() {
            return Err(CarError::NoRoots);
        }
        Ok(header)
    }

    /// Roots as content identifiers.
    pub fn root_ids(&self) -> CarResult<Vec<ContentId>> {
        self.roots
            .iter()
            .map(|cid| {
                ContentId::from_cid(*cid).map_err(|e| CarError::InvalidHeader(e.to_string()))
            })
            .collect()
    }
}
