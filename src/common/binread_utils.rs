use binread::io::{Read, Seek, SeekFrom};
use binread::{BinRead, Endian, ReadOptions};
use std::io::ErrorKind;
use std::ops::Range;

use crate::error::{Result, SrfError};

/// Read a big endian `T` that takes arguments, tagging any failure with the name of the field.
///
/// Running out of input is reported as [`SrfError::Parse`] rather than an I/O error: callers are
/// expected to check lengths up front, so an EOF here means the record itself is inconsistent.
pub fn read_be_field_args<R: Read + Seek, T: BinRead>(
    reader: &mut R,
    field: &'static str,
    args: T::Args,
) -> Result<T> {
    let offset = reader.seek(SeekFrom::Current(0))?;

    let mut options = ReadOptions::default();
    options.endian = Endian::Big;

    T::read_options(reader, &options, args)
        .and_then(|mut value| value.after_parse(reader, &options, args).map(|()| value))
        .map_err(|err| match err {
            binread::Error::Io(err) if err.kind() != ErrorKind::UnexpectedEof => SrfError::Io(err),
            other => SrfError::Parse {
                field,
                offset,
                message: format!("{:?}", other),
            },
        })
}

/// [`read_be_field_args`] for types without arguments.
pub fn read_be_field<R: Read + Seek, T: BinRead<Args = ()>>(
    reader: &mut R,
    field: &'static str,
) -> Result<T> {
    read_be_field_args(reader, field, ())
}

/// The byte range `offset..offset + len`, if it lies entirely within `available` bytes.
///
/// Done in u64 so that no combination of 32-bit offset and size can wrap.
pub fn checked_range(offset: u64, len: u64, available: u64) -> Option<Range<usize>> {
    let end = offset.checked_add(len)?;
    if end > available {
        return None;
    }

    Some(offset as usize..end as usize)
}
