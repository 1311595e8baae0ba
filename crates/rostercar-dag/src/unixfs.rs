//! UnixFS `Data` message carried in the `Data` field of dag-pb nodes.
//!
//! ```text
//! message Data {
//!   required DataType Type = 1;
//!   optional bytes Data = 2;
//!   optional uint64 filesize = 3;
//!   repeated uint64 blocksizes = 4;
//!   optional uint64 hashType = 5;
//!   optional uint64 fanout = 6;
//!   optional uint32 mode = 7;
//!   optional UnixTime mtime = 8;
//! }
//! ```
//!
//! Only the fields this crate writes are modeled. Decoding skips `hashType`,
//! `fanout`, `mode` and `mtime` so nodes from other writers still parse.

use prost::encoding::WireType;

use crate::error::{DagError, DagResult};
use crate::pb::{write_varint, FieldReader};

/// UnixFS node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Raw,
    Directory,
    File,
    Metadata,
    Symlink,
    HamtShard,
}

impl DataType {
    pub fn code(&self) -> u64 {
        match self {
            Self::Raw => 0,
            Self::Directory => 1,
            Self::File => 2,
            Self::Metadata => 3,
            Self::Symlink => 4,
            Self::HamtShard => 5,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Raw),
            1 => Some(Self::Directory),
            2 => Some(Self::File),
            3 => Some(Self::Metadata),
            4 => Some(Self::Symlink),
            5 => Some(Self::HamtShard),
            _ => None,
        }
    }
}

/// The subset of the UnixFS `Data` message used by directories and files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnixFsData {
    pub data_type: DataType,
    pub filesize: Option<u64>,
    pub blocksizes: Vec<u64>,
}

impl UnixFsData {
    /// `{ Type: Directory }`.
    pub fn directory() -> Self {
        Self {
            data_type: DataType::Directory,
            filesize: None,
            blocksizes: Vec::new(),
        }
    }

    /// `{ Type: File, filesize, blocksizes }` for a file split into chunks.
    pub fn file(blocksizes: Vec<u64>) -> Self {
        Self {
            data_type: DataType::File,
            filesize: Some(blocksizes.iter().sum()),
            blocksizes,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_varint(&mut buf, 1, self.data_type.code());
        if let Some(filesize) = self.filesize {
            write_varint(&mut buf, 3, filesize);
        }
        for size in &self.blocksizes {
            write_varint(&mut buf, 4, *size);
        }
        buf
    }

    pub fn decode(data: &[u8]) -> DagResult<Self> {
        let mut fields = FieldReader::new(data, "UnixFS Data");
        let mut data_type = None;
        let mut filesize = None;
        let mut blocksizes = Vec::new();
        while let Some((field, wire)) = fields.next_key()? {
            match (field, wire) {
                (1, WireType::Varint) => {
                    let code = fields.varint()?;
                    let parsed = DataType::from_code(code).ok_or_else(|| {
                        DagError::decode("UnixFS Data", format!("unknown type {code}"))
                    })?;
                    data_type = Some(parsed);
                }
                (3, WireType::Varint) => filesize = Some(fields.varint()?),
                (4, WireType::Varint) => blocksizes.push(fields.varint()?),
                (5..=7, WireType::Varint) => {
                    fields.varint()?;
                }
                (2 | 8, WireType::LengthDelimited) => {
                    fields.bytes()?;
                }
                _ => return Err(fields.unexpected(field, wire)),
            }
        }
        let data_type =
            data_type.ok_or_else(|| DagError::decode("UnixFS Data", "missing Type"))?;
        Ok(Self {
            data_type,
            filesize,
            blocksizes,
        })
    }
}
