use std::fmt;
use std::io::Read;

use ipld_core::cid::multihash::Multihash;
use ipld_core::cid::{Cid, Version};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Multihash code for sha2-256.
pub const SHA2_256: u64 = 0x12;

const SHA2_256_LEN: usize = 32;

/// The codec tag carried by a [`ContentId`].
///
/// The codec says how a block's bytes are to be interpreted: opaque leaf
/// content, or a dag-pb node that links to other blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockCodec {
    /// Raw leaf bytes (multicodec `0x55`).
    Raw,
    /// Protobuf-encoded merkle node (multicodec `0x70`).
    DagPb,
}

impl BlockCodec {
    /// The multicodec code for this codec.
    pub const fn code(&self) -> u64 {
        match self {
            Self::Raw => 0x55,
            Self::DagPb => 0x70,
        }
    }

    /// Parse from a multicodec code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0x55 => Some(Self::Raw),
            0x70 => Some(Self::DagPb),
            _ => None,
        }
    }
}

impl fmt::Display for BlockCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::DagPb => write!(f, "dag-pb"),
        }
    }
}

/// Content identifier for a stored block.
///
/// A `ContentId` is always a CIDv1 with a sha2-256 multihash and one of the
/// two [`BlockCodec`]s. Equality, ordering and hashing are by value, so two
/// identifiers built independently from the same bytes are interchangeable
/// as map keys. Deserialization goes through [`ContentId::from_cid`], so a
/// CID with another version, codec or hash is rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Cid", into = "Cid")]
pub struct ContentId(Cid);

impl ContentId {
    /// Build an identifier from a codec and a precomputed sha2-256 digest.
    pub fn new(codec: BlockCodec, digest: [u8; 32]) -> Self {
        let hash = Multihash::<64>::wrap(SHA2_256, &digest)
            .expect("a 32-byte digest always fits a 64-byte multihash");
        Self(Cid::new_v1(codec.code(), hash))
    }

    /// Accept an arbitrary CID if it is a v1 sha2-256 CID with a known codec.
    pub fn from_cid(cid: Cid) -> Result<Self, TypeError> {
        if cid.version() != Version::V1 {
            return Err(TypeError::UnsupportedVersion(cid.version().into()));
        }
        if BlockCodec::from_code(cid.codec()).is_none() {
            return Err(TypeError::UnsupportedCodec(cid.codec()));
        }
        let hash = cid.hash();
        if hash.code() != SHA2_256 || hash.digest().len() != SHA2_256_LEN {
            return Err(TypeError::UnsupportedHash {
                code: hash.code(),
                len: hash.digest().len(),
            });
        }
        Ok(Self(cid))
    }

    /// Parse the binary CID form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        let cid = Cid::try_from(bytes).map_err(|e| TypeError::InvalidCid(e.to_string()))?;
        Self::from_cid(cid)
    }

    /// Read one binary CID from the front of a reader.
    pub fn read_bytes<R: Read>(reader: R) -> Result<Self, TypeError> {
        let cid = Cid::read_bytes(reader).map_err(|e| TypeError::InvalidCid(e.to_string()))?;
        Self::from_cid(cid)
    }

    /// The codec tag.
    pub fn codec(&self) -> BlockCodec {
        // Checked on construction.
        match BlockCodec::from_code(self.0.codec()) {
            Some(codec) => codec,
            None => unreachable!("ContentId holds an unsupported codec"),
        }
    }

    /// The raw sha2-256 digest.
    pub fn digest(&self) -> &[u8] {
        self.0.hash().digest()
    }

    /// The binary CID form persisted inside archives.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    /// Length of [`Self::to_bytes`].
    pub fn encoded_len(&self) -> usize {
        self.0.encoded_len()
    }

    /// The underlying CID.
    pub fn as_cid(&self) -> &Cid {
        &self.0
    }

    /// Legacy CIDv0 (`Qm...`) string. Only dag-pb identifiers have one.
    pub fn to_legacy_string(&self) -> Option<String> {
        if self.codec() != BlockCodec::DagPb {
            return None;
        }
        Cid::new_v0(*self.0.hash()).ok().map(|cid| cid.to_string())
    }

    /// Short hex representation of the digest (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.digest()[..4])
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({}:{})", self.codec(), self.short_hex())
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Cid> for ContentId {
    type Error = TypeError;

    fn try_from(cid: Cid) -> Result<Self, Self::Error> {
        Self::from_cid(cid)
    }
}

impl From<ContentId> for Cid {
    fn from(id: ContentId) -> Self {
        id.0
    }
}
