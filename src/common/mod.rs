pub mod binread_utils;

use binread::BinRead;
use std::borrow::Borrow;
use std::convert::TryFrom;
use std::fmt;

/// A four byte resource identifier, such as `TEX0`.
///
/// Identifiers are usually ASCII but nothing requires it; they are compared byte-for-byte and
/// `Display` escapes anything unprintable.
#[derive(BinRead, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ResourceId(pub [u8; 4]);

impl ResourceId {
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl From<[u8; 4]> for ResourceId {
    fn from(bytes: [u8; 4]) -> Self {
        ResourceId(bytes)
    }
}

impl<'a> TryFrom<&'a str> for ResourceId {
    type Error = &'a str;

    fn try_from(id: &'a str) -> Result<Self, Self::Error> {
        <[u8; 4]>::try_from(id.as_bytes())
            .map(ResourceId)
            .map_err(|_| id)
    }
}

// lets maps keyed by ResourceId be queried with a plain &[u8] / &str
impl Borrow<[u8]> for ResourceId {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ResourceId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId(\"{}\")", self)
    }
}
