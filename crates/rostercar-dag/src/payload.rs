use bytes::Bytes;

/// One named input to the importer: a card's serialized markup and the file
/// name it will carry inside the archive directory.
///
/// Names are not required to be unique. Making them unique is up to the
/// caller; the importer keeps duplicates as separate directory entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub name: String,
    pub content: Bytes,
}

impl Payload {
    /// Create a payload from any string or byte content.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// A rendered card keyed by its owner's address, named `{address}.svg`.
    pub fn svg(address: &str, markup: impl Into<Bytes>) -> Self {
        Self::new(format!("{address}.svg"), markup)
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
