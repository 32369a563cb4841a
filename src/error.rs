//! Error types for SRF decoding.

use crate::common::ResourceId;
use thiserror::Error;

/// Coarse classification of a [`SrfError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad magic, an unreadable fixed header field, or a file size mismatch.
    MalformedHeader,
    /// A read extended past the end of the source.
    TruncatedData,
    /// The directory entries do not add up to the declared directory length.
    MalformedDirectory,
    /// The underlying reader failed.
    Io,
}

#[derive(Debug, Error)]
pub enum SrfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid magic: expected \"{}\", got \"{}\"", .expected.escape_ascii(), .found.escape_ascii())]
    InvalidMagic { expected: [u8; 4], found: [u8; 4] },

    /// A fixed header field lies (partly) beyond the end of the source.
    #[error("failed to read {field} at 0x{offset:X}: source is only {available} bytes")]
    UnreadableHeaderField {
        field: &'static str,
        offset: u64,
        available: u64,
    },

    #[error("file size is incorrect: expected {declared}, got {actual}")]
    FileLengthMismatch { declared: u32, actual: u64 },

    /// The directory region declared by `header_length` runs past the end of the source.
    #[error("directory of {header_length} bytes at 0x{offset:X} extends past end of source ({available} bytes)")]
    TruncatedDirectory {
        offset: u64,
        header_length: u32,
        available: u64,
    },

    #[error(
        "payload of resource \"{resource}\" item {item} (0x{offset:X}, {size} bytes) \
         extends past end of source ({available} bytes)"
    )]
    TruncatedPayload {
        resource: ResourceId,
        item: u32,
        offset: u32,
        size: u32,
        available: u64,
    },

    /// `field` needs `needed` bytes at directory offset `offset` but only `remaining` are left.
    #[error(
        "malformed directory: {field} at directory offset 0x{offset:X} needs {needed} bytes, \
         only {remaining} remain of {header_length}"
    )]
    MalformedDirectory {
        field: &'static str,
        offset: u64,
        needed: u64,
        remaining: u64,
        header_length: u64,
    },

    /// binread rejected a record for a reason other than running out of bytes.
    #[error("failed to parse {field} at 0x{offset:X}: {message}")]
    Parse {
        field: &'static str,
        offset: u64,
        message: String,
    },
}

impl SrfError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SrfError::Io(_) => ErrorKind::Io,
            SrfError::InvalidMagic { .. }
            | SrfError::UnreadableHeaderField { .. }
            | SrfError::FileLengthMismatch { .. } => ErrorKind::MalformedHeader,
            SrfError::TruncatedDirectory { .. } | SrfError::TruncatedPayload { .. } => {
                ErrorKind::TruncatedData
            }
            SrfError::MalformedDirectory { .. } | SrfError::Parse { .. } => {
                ErrorKind::MalformedDirectory
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SrfError>;
