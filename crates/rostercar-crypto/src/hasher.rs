use bytes::Bytes;
use rostercar_types::{Block, BlockCodec, ContentId};
use sha2::{Digest, Sha256};

/// Codec-tagged sha2-256 content hasher.
///
/// Each hasher carries the [`BlockCodec`] that ends up in the identifier. The
/// digest covers only the block bytes; the codec travels beside it in the
/// CID, so a raw leaf and a dag-pb node with identical bytes still get
/// different identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentHasher {
    codec: BlockCodec,
}

impl ContentHasher {
    /// Hasher for raw leaves.
    pub const RAW: Self = Self {
        codec: BlockCodec::Raw,
    };
    /// Hasher for dag-pb nodes (directories, chunked files).
    pub const DAG_PB: Self = Self {
        codec: BlockCodec::DagPb,
    };

    /// Hasher for an arbitrary codec.
    pub const fn new(codec: BlockCodec) -> Self {
        Self { codec }
    }

    /// Compute the identifier of `data`.
    pub fn hash(&self, data: &[u8]) -> ContentId {
        ContentId::new(self.codec, Self::raw_hash(data))
    }

    /// Hash `data` and pair it with its identifier.
    pub fn block(&self, data: impl Into<Bytes>) -> Block {
        let data = data.into();
        Block::new(self.hash(&data), data)
    }

    /// Verify that data produces the expected identifier.
    pub fn verify(&self, data: &[u8], expected: &ContentId) -> bool {
        self.hash(data) == *expected
    }

    /// Verify a block under the codec its own identifier declares.
    pub fn verify_block(block: &Block) -> bool {
        Self::new(block.codec()).verify(block.data(), block.id())
    }

    /// Plain sha2-256 digest.
    pub fn raw_hash(data: &[u8]) -> [u8; 32] {
        Sha256::digest(data).into()
    }

    /// The codec stamped on identifiers from this hasher.
    pub fn codec(&self) -> BlockCodec {
        self.codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let data = b"<svg>A</svg>";
        assert_eq!(ContentHasher::RAW.hash(data), ContentHasher::RAW.hash(data));
    }

    #[test]
    fn different_codecs_produce_different_ids() {
        let data = b"same content";
        let raw = ContentHasher::RAW.hash(data);
        let node = ContentHasher::DAG_PB.hash(data);
        assert_ne!(raw, node);
        assert_eq!(raw.digest(), node.digest());
    }

    #[test]
    fn empty_raw_block_has_well_known_cid() {
        let id = ContentHasher::RAW.hash(b"");
        assert_eq!(
            id.to_string(),
            "bafkreihdwdcefgh4dqkjv67uzcmw7ojee6xedzdetojuzjevtenxquvyku"
        );
    }

    #[test]
    fn empty_directory_has_well_known_cid() {
        // PBNode { Data: UnixFS { Type: Directory } }
        let id = ContentHasher::DAG_PB.hash(&[0x0a, 0x02, 0x08, 0x01]);
        assert_eq!(
            id.to_string(),
            "bafybeiczsscdsbs7ffqz55asqdf3smv6klcw3gofszvwlyarci47bgf354"
        );
        assert_eq!(
            id.to_legacy_string().as_deref(),
            Some("QmUNLLsPACCz1vLxQVkXqqLX5R1X345qqfHbsf67hvA3Nn")
        );
    }

    #[test]
    fn raw_hash_is_plain_sha256() {
        let digest = ContentHasher::raw_hash(b"");
        assert_eq!(digest[..4], [0xe3, 0xb0, 0xc4, 0x42]);
    }

    #[test]
    fn verify_correct_data() {
        let id = ContentHasher::RAW.hash(b"test data");
        assert!(ContentHasher::RAW.verify(b"test data", &id));
    }

    #[test]
    fn verify_incorrect_data() {
        let id = ContentHasher::RAW.hash(b"original");
        assert!(!ContentHasher::RAW.verify(b"tampered", &id));
    }

    #[test]
    fn verify_wrong_codec() {
        let id = ContentHasher::RAW.hash(b"data");
        assert!(!ContentHasher::DAG_PB.verify(b"data", &id));
    }

    #[test]
    fn block_carries_matching_id() {
        let block = ContentHasher::DAG_PB.block(b"node".to_vec());
        assert_eq!(block.codec(), BlockCodec::DagPb);
        assert!(ContentHasher::verify_block(&block));

        let forged = Block::new(*block.id(), b"other".to_vec());
        assert!(!ContentHasher::verify_block(&forged));
    }
}
