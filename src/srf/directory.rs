use binread::io::Cursor;
use binread::BinRead;
use log::trace;

use crate::common::binread_utils::{read_be_field, read_be_field_args};
use crate::common::ResourceId;
use crate::error::{Result, SrfError};

#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq)]
#[br(big)]
pub struct EntryHeader {
    pub id: ResourceId,
    pub item_count: u32,
}

impl EntryHeader {
    pub const SIZE: u64 = 8;

    /// Size of the whole entry, header plus item records.
    pub fn entry_length(&self) -> u64 {
        Self::SIZE + ItemRecord::SIZE * u64::from(self.item_count)
    }
}

/// Where one item's payload lives. `offset` is absolute, from the start of the file.
#[derive(BinRead, Debug, Clone, Copy, PartialEq, Eq)]
#[br(big)]
pub struct ItemRecord {
    pub number: u32,
    pub offset: u32,
    pub size: u32,
}

impl ItemRecord {
    pub const SIZE: u64 = 12;
}

#[derive(BinRead, Debug)]
#[br(big, import(item_count: u32))]
pub struct ItemTable {
    #[br(count = item_count)]
    pub records: Vec<ItemRecord>,
}

/// One resource entry as listed in the directory, before its payloads are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: ResourceId,
    /// Offset of the entry from the start of the directory.
    pub position: u64,
    pub records: Vec<ItemRecord>,
}

/// Walks the resource entries of a directory region in file order.
///
/// The cursor only ever advances by whole entries whose length has been checked against what is
/// left of the directory, so the walk either lands exactly on the end or stops with
/// [`SrfError::MalformedDirectory`]. Iteration ends after the first error.
pub struct Entries<'a> {
    cursor: Cursor<&'a [u8]>,
    header_length: u64,
    failed: bool,
}

impl<'a> Entries<'a> {
    /// `directory` is the whole directory region, as returned by [`SrfHeader::directory`].
    ///
    /// [`SrfHeader::directory`]: super::SrfHeader::directory
    pub fn new(directory: &'a [u8]) -> Self {
        Entries {
            header_length: directory.len() as u64,
            cursor: Cursor::new(directory),
            failed: false,
        }
    }

    fn remaining(&self) -> u64 {
        self.header_length - self.cursor.position()
    }

    fn malformed(&self, field: &'static str, offset: u64, needed: u64) -> SrfError {
        SrfError::MalformedDirectory {
            field,
            offset,
            needed,
            remaining: self.header_length - offset,
            header_length: self.header_length,
        }
    }

    fn read_entry(&mut self) -> Result<Entry> {
        let position = self.cursor.position();

        if self.remaining() < EntryHeader::SIZE {
            return Err(self.malformed("resource entry header", position, EntryHeader::SIZE));
        }
        let header: EntryHeader = read_be_field(&mut self.cursor, "resource entry header")?;

        // size the entry before touching its records so a bogus item_count can't overrun
        let entry_length = header.entry_length();
        if entry_length > self.header_length - position {
            return Err(self.malformed(
                "item records",
                position + EntryHeader::SIZE,
                entry_length - EntryHeader::SIZE,
            ));
        }
        let table: ItemTable =
            read_be_field_args(&mut self.cursor, "item records", (header.item_count,))?;

        trace!(
            "entry {} at directory offset 0x{:X}: {} items",
            header.id,
            position,
            header.item_count
        );

        self.cursor.set_position(position + entry_length);

        Ok(Entry {
            id: header.id,
            position,
            records: table.records,
        })
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining() == 0 {
            return None;
        }

        let entry = self.read_entry();
        self.failed = entry.is_err();
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn walk(directory: &[u8]) -> Result<Vec<Entry>> {
        Entries::new(directory).collect()
    }

    #[test]
    fn empty_directory() {
        assert!(walk(&[]).unwrap().is_empty());
    }

    #[test]
    fn entries_in_file_order() {
        let directory = [
            b'T', b'E', b'X', b'0', 0, 0, 0, 1, // id, item_count
            0, 0, 0, 7, 0, 0, 0, 0x40, 0, 0, 0, 3, // item 7 @ 0x40, 3 bytes
            b'S', b'N', b'D', b'0', 0, 0, 0, 0, // no items
        ];

        let entries = walk(&directory).unwrap();
        assert_eq!(
            entries,
            vec![
                Entry {
                    id: ResourceId(*b"TEX0"),
                    position: 0,
                    records: vec![ItemRecord {
                        number: 7,
                        offset: 0x40,
                        size: 3
                    }],
                },
                Entry {
                    id: ResourceId(*b"SND0"),
                    position: 20,
                    records: vec![],
                },
            ]
        );
    }

    #[test]
    fn leftover_bytes_are_malformed() {
        let directory = [b'T', b'E', b'X', b'0', 0, 0, 0, 0, 0xAA, 0xBB];

        let mut entries = Entries::new(&directory);
        assert!(entries.next().unwrap().is_ok());

        match entries.next() {
            Some(Err(SrfError::MalformedDirectory { offset, needed, remaining, .. })) => {
                assert_eq!(offset, 8);
                assert_eq!(needed, 8);
                assert_eq!(remaining, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(entries.next().is_none());
    }

    #[test]
    fn item_count_overshooting_directory() {
        // claims two items but the directory only has room for one
        let directory = [
            b'T', b'E', b'X', b'0', 0, 0, 0, 2,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ];

        let err = walk(&directory).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDirectory);
    }

    #[test]
    fn length_comes_from_directory_slice() {
        // two empty entries back to back, then a third cut short by the end of the slice
        let region = [
            b'A', b'A', b'A', b'A', 0, 0, 0, 0,
            b'B', b'B', b'B', b'B', 0, 0, 0, 0,
            b'C', b'C', b'C', b'C', 0, 0, 0, 0,
        ];

        let entries = walk(&region[..16]).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.records.is_empty()));

        match walk(&region[..20]) {
            Err(SrfError::MalformedDirectory { header_length, remaining, .. }) => {
                assert_eq!(header_length, 20);
                assert_eq!(remaining, 4);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn huge_item_count_does_not_allocate() {
        let directory = [b'T', b'E', b'X', b'0', 0xFF, 0xFF, 0xFF, 0xFF];

        match walk(&directory) {
            Err(SrfError::MalformedDirectory { needed, remaining, .. }) => {
                assert_eq!(needed, 12 * 0xFFFF_FFFF);
                assert_eq!(remaining, 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
