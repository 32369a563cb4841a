use binread::io::Cursor;
use binread::BinRead;
use log::debug;

use crate::common::binread_utils::{checked_range, read_be_field};
use crate::error::{Result, SrfError};

pub const MAGIC: [u8; 4] = *b"srf1";

/// Offset of the resource directory, directly after the three fixed fields.
pub const DIRECTORY_OFFSET: u64 = 0x0C;

/// The fixed fields at the start of every SRF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrfHeader {
    pub magic: [u8; 4],
    /// Total size of the file, which must match the real size of the source.
    pub file_length: u32,
    /// Size of the resource directory starting at [`DIRECTORY_OFFSET`].
    pub header_length: u32,
}

impl SrfHeader {
    /// Read and validate the fixed header of a whole SRF image.
    ///
    /// Fields are checked in file order, so a wrong magic is reported even if the image is too
    /// short to hold the rest of the header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_prefix(bytes, bytes.len() as u64)
    }

    /// Like [`SrfHeader::from_bytes`], but `prefix` only needs to hold the first
    /// [`DIRECTORY_OFFSET`] bytes of a source that is `source_len` bytes long.
    pub fn from_prefix(prefix: &[u8], source_len: u64) -> Result<Self> {
        let available = prefix.len() as u64;
        let mut cursor = Cursor::new(prefix);

        let magic: [u8; 4] = read_fixed(&mut cursor, "magic", available)?;
        if magic != MAGIC {
            return Err(SrfError::InvalidMagic {
                expected: MAGIC,
                found: magic,
            });
        }

        let file_length: u32 = read_fixed(&mut cursor, "file_length", available)?;
        if u64::from(file_length) != source_len {
            return Err(SrfError::FileLengthMismatch {
                declared: file_length,
                actual: source_len,
            });
        }

        let header_length: u32 = read_fixed(&mut cursor, "header_length", available)?;

        debug!(
            "srf header: file_length = 0x{:X}, header_length = 0x{:X}",
            file_length, header_length
        );

        Ok(SrfHeader {
            magic,
            file_length,
            header_length,
        })
    }

    /// The directory region of `bytes` described by this header.
    pub fn directory<'a>(&self, bytes: &'a [u8]) -> Result<&'a [u8]> {
        let available = bytes.len() as u64;

        checked_range(DIRECTORY_OFFSET, u64::from(self.header_length), available)
            .map(|range| &bytes[range])
            .ok_or(SrfError::TruncatedDirectory {
                offset: DIRECTORY_OFFSET,
                header_length: self.header_length,
                available,
            })
    }
}

// every fixed header field is a single 32-bit word
fn read_fixed<T: BinRead<Args = ()>>(
    cursor: &mut Cursor<&[u8]>,
    field: &'static str,
    available: u64,
) -> Result<T> {
    let offset = cursor.position();
    if checked_range(offset, 4, available).is_none() {
        return Err(SrfError::UnreadableHeaderField {
            field,
            offset,
            available,
        });
    }

    read_be_field(cursor, field)
}
