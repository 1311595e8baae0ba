//! dag-pb node codec.
//!
//! ```text
//! message PBLink { optional bytes Hash = 1; optional string Name = 2; optional uint64 Tsize = 3; }
//! message PBNode { repeated PBLink Links = 2; optional bytes Data = 1; }
//! ```
//!
//! Encoding is canonical: every link before `Data`, link fields in
//! `Hash, Name, Tsize` order, absent optionals omitted, links never sorted.
//! A derived `prost::Message` would emit fields in tag order (`Data` first),
//! so nodes are written field by field on top of `prost::encoding`.

use prost::encoding::{decode_key, decode_varint, encode_key, encode_varint, WireType};
use rostercar_types::ContentId;

use crate::error::{DagError, DagResult};

/// A link from a dag-pb node to another block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PbLink {
    pub hash: ContentId,
    pub name: Option<String>,
    pub tsize: Option<u64>,
}

impl PbLink {
    /// A named link with a cumulative size.
    pub fn new(hash: ContentId, name: impl Into<String>, tsize: u64) -> Self {
        Self {
            hash,
            name: Some(name.into()),
            tsize: Some(tsize),
        }
    }

    fn encode(&self, buf: &mut Vec<u8>) {
        write_bytes(buf, 1, &self.hash.to_bytes());
        if let Some(name) = &self.name {
            write_bytes(buf, 2, name.as_bytes());
        }
        if let Some(tsize) = self.tsize {
            write_varint(buf, 3, tsize);
        }
    }

    fn decode(data: &[u8]) -> DagResult<Self> {
        let mut fields = FieldReader::new(data, "PBLink");
        let mut hash = None;
        let mut name = None;
        let mut tsize = None;
        while let Some((field, wire)) = fields.next_key()? {
            match (field, wire) {
                (1, WireType::LengthDelimited) => {
                    let raw = fields.bytes()?;
                    let id = ContentId::from_bytes(raw)
                        .map_err(|e| DagError::decode("PBLink", e.to_string()))?;
                    hash = Some(id);
                }
                (2, WireType::LengthDelimited) => {
                    let raw = fields.bytes()?;
                    let s = std::str::from_utf8(raw)
                        .map_err(|e| DagError::decode("PBLink", e.to_string()))?;
                    name = Some(s.to_string());
                }
                (3, WireType::Varint) => tsize = Some(fields.varint()?),
                _ => return Err(fields.unexpected(field, wire)),
            }
        }
        let hash = hash.ok_or_else(|| DagError::decode("PBLink", "missing Hash"))?;
        Ok(Self { hash, name, tsize })
    }
}

/// A dag-pb node: ordered links plus opaque data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PbNode {
    pub links: Vec<PbLink>,
    pub data: Option<Vec<u8>>,
}

impl PbNode {
    /// Canonical dag-pb bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut link_buf = Vec::new();
        for link in &self.links {
            link_buf.clear();
            link.encode(&mut link_buf);
            write_bytes(&mut buf, 2, &link_buf);
        }
        if let Some(data) = &self.data {
            write_bytes(&mut buf, 1, data);
        }
        buf
    }

    /// Decode dag-pb bytes.
    pub fn decode(data: &[u8]) -> DagResult<Self> {
        let mut fields = FieldReader::new(data, "PBNode");
        let mut node = PbNode::default();
        while let Some((field, wire)) = fields.next_key()? {
            match (field, wire) {
                (1, WireType::LengthDelimited) => {
                    if node.data.is_some() {
                        return Err(DagError::decode("PBNode", "duplicate Data"));
                    }
                    node.data = Some(fields.bytes()?.to_vec());
                }
                (2, WireType::LengthDelimited) => {
                    if node.data.is_some() {
                        return Err(DagError::decode("PBNode", "link after Data"));
                    }
                    node.links.push(PbLink::decode(fields.bytes()?)?);
                }
                _ => return Err(fields.unexpected(field, wire)),
            }
        }
        Ok(node)
    }
}

pub(crate) fn write_varint(buf: &mut Vec<u8>, tag: u32, value: u64) {
    encode_key(tag, WireType::Varint, buf);
    encode_varint(value, buf);
}

pub(crate) fn write_bytes(buf: &mut Vec<u8>, tag: u32, data: &[u8]) {
    encode_key(tag, WireType::LengthDelimited, buf);
    encode_varint(data.len() as u64, buf);
    buf.extend_from_slice(data);
}

/// Cursor over protobuf fields.
pub(crate) struct FieldReader<'a> {
    data: &'a [u8],
    what: &'static str,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(data: &'a [u8], what: &'static str) -> Self {
        Self { data, what }
    }

    /// Next `(tag, wire type)`, or `None` at the end.
    pub(crate) fn next_key(&mut self) -> DagResult<Option<(u32, WireType)>> {
        if self.data.is_empty() {
            return Ok(None);
        }
        decode_key(&mut self.data)
            .map(Some)
            .map_err(|e| DagError::decode(self.what, e.to_string()))
    }

    pub(crate) fn varint(&mut self) -> DagResult<u64> {
        decode_varint(&mut self.data).map_err(|e| DagError::decode(self.what, e.to_string()))
    }

    pub(crate) fn bytes(&mut self) -> DagResult<&'a [u8]> {
        let len = self.varint()?;
        if len > self.data.len() as u64 {
            return Err(DagError::decode(self.what, "length exceeds buffer"));
        }
        let (out, rest) = self.data.split_at(len as usize);
        self.data = rest;
        Ok(out)
    }

    pub(crate) fn unexpected(&self, tag: u32, wire: WireType) -> DagError {
        DagError::decode(
            self.what,
            format!("unexpected field {tag} with wire type {wire:?}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostercar_crypto::ContentHasher;

    fn leaf(content: &[u8]) -> ContentId {
        ContentHasher::RAW.hash(content)
    }

    #[test]
    fn empty_directory_bytes() {
        let node = PbNode {
            links: vec![],
            data: Some(vec![0x08, 0x01]),
        };
        assert_eq!(node.encode(), vec![0x0a, 0x02, 0x08, 0x01]);
    }

    #[test]
    fn link_layout() {
        let id = leaf(b"A");
        let node = PbNode {
            links: vec![PbLink::new(id, "a.svg", 1)],
            data: None,
        };
        let bytes = node.encode();

        let cid = id.to_bytes();
        let mut expected = vec![0x12, (2 + cid.len() + 2 + 5 + 2) as u8];
        expected.extend_from_slice(&[0x0a, cid.len() as u8]);
        expected.extend_from_slice(&cid);
        expected.extend_from_slice(&[0x12, 5]);
        expected.extend_from_slice(b"a.svg");
        expected.extend_from_slice(&[0x18, 1]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn links_precede_data() {
        let node = PbNode {
            links: vec![PbLink::new(leaf(b"A"), "a", 1)],
            data: Some(vec![0x08, 0x01]),
        };
        let bytes = node.encode();
        assert_eq!(bytes[0], 0x12);
        assert_eq!(&bytes[bytes.len() - 4..], &[0x0a, 0x02, 0x08, 0x01]);
    }

    #[test]
    fn decode_encoded_node() {
        let node = PbNode {
            links: vec![
                PbLink::new(leaf(b"B"), "b.svg", 1),
                PbLink {
                    hash: leaf(b"A"),
                    name: None,
                    tsize: None,
                },
            ],
            data: Some(vec![0x08, 0x01]),
        };
        assert_eq!(PbNode::decode(&node.encode()).unwrap(), node);
    }

    #[test]
    fn decode_rejects_link_after_data() {
        let mut bytes = vec![0x0a, 0x00];
        let link = PbNode {
            links: vec![PbLink::new(leaf(b"A"), "a", 1)],
            data: None,
        };
        bytes.extend_from_slice(&link.encode());
        assert!(matches!(
            PbNode::decode(&bytes),
            Err(DagError::Decode { what: "PBNode", .. })
        ));
    }

    #[test]
    fn decode_rejects_truncated_bytes() {
        let err = PbNode::decode(&[0x0a, 0x05, 0x01]).unwrap_err();
        assert!(matches!(err, DagError::Decode { .. }));
    }

    #[test]
    fn decode_rejects_unknown_field() {
        let err = PbNode::decode(&[0x18, 0x01]).unwrap_err();
        assert!(err.to_string().contains("unexpected field 3"));
    }

    #[test]
    fn decode_rejects_zero_tag() {
        let err = PbNode::decode(&[0x00, 0x01]).unwrap_err();
        assert!(matches!(err, DagError::Decode { what: "PBNode", .. }));
    }

    #[test]
    fn decode_rejects_link_without_hash() {
        let mut bytes = Vec::new();
        write_bytes(&mut bytes, 2, &[0x12, 0x01, b'a']);
        assert!(PbNode::decode(&bytes).is_err());
    }
}
