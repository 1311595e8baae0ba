use std::collections::HashSet;
use std::path::Path;

use bytes::Bytes;
use rostercar_crypto::ContentHasher;
use rostercar_types::{varint, Block, ContentId};
use tracing::debug;

use crate::error::{CarError, CarResult};
use crate::header::CarHeader;

/// Summary of a successful [`CarReader::verify`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyReport {
    pub roots: Vec<ContentId>,
    pub block_count: usize,
    pub block_bytes: u64,
}

/// Reads CARv1 archives produced by [`CarWriter`](crate::CarWriter).
///
/// The reader needs nothing but the archive bytes: every block carries its
/// own identifier, so [`verify`](Self::verify) can recompute each one.
#[derive(Debug)]
pub struct CarReader {
    data: Bytes,
    header: CarHeader,
    roots: Vec<ContentId>,
    body_offset: usize,
}

impl CarReader {
    /// Parse the header of an in-memory archive.
    pub fn from_bytes(data: impl Into<Bytes>) -> CarResult<Self> {
        let data = data.into();
        let (len, consumed) = varint::decode(&data).map_err(|e| CarError::Truncated {
            offset: 0,
            reason: e.to_string(),
        })?;
        let end = consumed
            .checked_add(len as usize)
            .filter(|end| *end <= data.len())
            .ok_or_else(|| CarError::Truncated {
                offset: 0,
                reason: "header extends beyond data".into(),
            })?;
        let header = CarHeader::decode(&data[consumed..end])?;
        let roots = header.root_ids()?;
        Ok(Self {
            data,
            header,
            roots,
            body_offset: end,
        })
    }

    /// Read an archive from disk.
    pub fn open(path: &Path) -> CarResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn header(&self) -> &CarHeader {
        &self.header
    }

    pub fn roots(&self) -> &[ContentId] {
        &self.roots
    }

    /// Iterate over block frames without verifying them.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks {
            data: &self.data,
            pos: self.body_offset,
        }
    }

    /// Recompute every block's identifier and check that every root is
    /// present.
    pub fn verify(&self) -> CarResult<VerifyReport> {
        let mut seen = HashSet::new();
        let mut block_count = 0;
        let mut block_bytes = 0;
        let mut iter = self.blocks();
        loop {
            let offset = iter.pos as u64;
            let Some(block) = iter.next().transpose()? else {
                break;
            };
            if !ContentHasher::verify_block(&block) {
                return Err(CarError::BlockMismatch {
                    id: *block.id(),
                    offset,
                });
            }
            block_count += 1;
            block_bytes += block.size();
            seen.insert(*block.id());
        }
        if let Some(missing) = self.roots.iter().find(|root| !seen.contains(*root)) {
            return Err(CarError::MissingRoot(*missing));
        }
        debug!(blocks = block_count, bytes = block_bytes, "verified CAR");
        Ok(VerifyReport {
            roots: self.roots.clone(),
            block_count,
            block_bytes,
        })
    }
}

/// Iterator over the block frames of a [`CarReader`].
pub struct Blocks<'a> {
    data: &'a Bytes,
    pos: usize,
}

impl Blocks<'_> {
    fn read_frame(&mut self) -> CarResult<Block> {
        let offset = self.pos as u64;
        let (len, consumed) =
            varint::decode(&self.data[self.pos..]).map_err(|e| CarError::Truncated {
                offset,
                reason: e.to_string(),
            })?;
        let start = self.pos + consumed;
        let end = start
            .checked_add(len as usize)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| CarError::Truncated {
                offset,
                reason: "frame extends beyond data".into(),
            })?;
        let frame = &self.data[start..end];
        let id = ContentId::read_bytes(frame).map_err(|source| CarError::Cid { offset, source })?;
        let block_start = start + id.encoded_len();
        if block_start > end {
            return Err(CarError::Truncated {
                offset,
                reason: "CID longer than frame".into(),
            });
        }
        self.pos = end;
        Ok(Block::new(id, self.data.slice(block_start..end)))
    }
}

impl Iterator for Blocks<'_> {
    type Item = CarResult<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        let result = self.read_frame();
        if result.is_err() {
            // Stop after the first malformed frame.
            self.pos = self.data.len();
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::CarWriter;
    use rostercar_dag::{import, Payload};
    use rostercar_store::{BlockStore, InMemoryBlockStore};
    use rostercar_types::BlockCodec;

    fn archive(payloads: Vec<Payload>) -> (ContentId, Vec<u8>) {
        let store = InMemoryBlockStore::new();
        let root = import(payloads, &store).unwrap();
        let bytes = CarWriter::new(root, &store).unwrap().to_vec();
        (root, bytes)
    }

    fn cards() -> Vec<Payload> {
        vec![
            Payload::new("a.svg", "<svg>A</svg>"),
            Payload::new("b.svg", "<svg>B</svg>"),
        ]
    }

    #[test]
    fn reads_back_written_archive() {
        let (root, bytes) = archive(cards());
        let reader = CarReader::from_bytes(bytes).unwrap();
        assert_eq!(reader.roots(), &[root]);

        let blocks: Vec<Block> = reader.blocks().collect::<CarResult<_>>().unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].data().as_ref(), b"<svg>A</svg>");
        assert_eq!(blocks[2].id(), &root);
        assert_eq!(blocks[2].codec(), BlockCodec::DagPb);
    }

    #[test]
    fn every_frame_rehashes_to_its_cid() {
        let (_, bytes) = archive(cards());
        let reader = CarReader::from_bytes(bytes).unwrap();
        for block in reader.blocks() {
            assert!(ContentHasher::verify_block(&block.unwrap()));
        }
        let report = reader.verify().unwrap();
        assert_eq!(report.block_count, 3);
        assert_eq!(report.block_bytes, 12 + 12 + reader.blocks().last().unwrap().unwrap().size());
    }

    #[test]
    fn tampered_block_fails_verification() {
        let (_, mut bytes) = archive(cards());
        let pos = bytes
            .windows(12)
            .position(|w| w == b"<svg>A</svg>")
            .unwrap();
        bytes[pos + 5] = b'Z';
        let reader = CarReader::from_bytes(bytes).unwrap();
        let err = reader.verify().unwrap_err();
        assert!(matches!(err, CarError::BlockMismatch { .. }));
    }

    #[test]
    fn missing_root_fails_verification() {
        let store = InMemoryBlockStore::new();
        store.put(ContentHasher::RAW.block(b"leaf".to_vec())).unwrap();
        let absent = ContentHasher::DAG_PB.hash(b"absent");
        let bytes = CarWriter::new(absent, &store).unwrap().to_vec();
        let err = CarReader::from_bytes(bytes).unwrap().verify().unwrap_err();
        assert!(matches!(err, CarError::MissingRoot(id) if id == absent));
    }

    #[test]
    fn truncated_frame_is_reported() {
        let (_, mut bytes) = archive(cards());
        bytes.truncate(bytes.len() - 3);
        let reader = CarReader::from_bytes(bytes).unwrap();
        let results: Vec<CarResult<Block>> = reader.blocks().collect();
        assert_eq!(results.len(), 3);
        assert!(matches!(results[2], Err(CarError::Truncated { .. })));
    }

    #[test]
    fn truncated_header_is_reported() {
        let (_, bytes) = archive(cards());
        let err = CarReader::from_bytes(bytes[..10].to_vec()).unwrap_err();
        assert!(matches!(err, CarError::Truncated { offset: 0, .. }));
    }

    #[test]
    fn empty_input_is_truncated() {
        let err = CarReader::from_bytes(Vec::new()).unwrap_err();
        assert!(matches!(err, CarError::Truncated { .. }));
    }

    #[test]
    fn open_from_disk() {
        let (root, bytes) = archive(cards());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2 Player Images.car");
        std::fs::write(&path, &bytes).unwrap();

        let reader = CarReader::open(&path).unwrap();
        assert_eq!(reader.roots(), &[root]);
        assert_eq!(reader.verify().unwrap().block_count, 3);
    }
}
