pub mod directory;
pub mod header;

pub use directory::{Entries, Entry, ItemRecord};
pub use header::SrfHeader;

use header::DIRECTORY_OFFSET;

use crate::common::binread_utils::checked_range;
use crate::common::ResourceId;
use crate::error::{Result, SrfError};

use log::{debug, trace, warn};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// A fully decoded SRF file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SrfData {
    pub resources: BTreeMap<ResourceId, SrfResource>,
}

/// A named group of numbered payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrfResource {
    pub id: ResourceId,
    pub items: BTreeMap<u32, Vec<u8>>,
}

impl SrfData {
    /// Decode a complete SRF image held in memory.
    ///
    /// The length of `bytes` is taken as the true size of the file. When several directory entries
    /// share an identifier, the last one replaces the others.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let header = SrfHeader::from_bytes(bytes)?;
        let directory = header.directory(bytes)?;

        let mut data = SrfData::default();
        for entry in Entries::new(directory) {
            let resource = SrfResource::from_entry(entry?, bytes)?;

            debug!("resource {}: {} items", resource.id, resource.items.len());
            if let Some(previous) = data.resources.insert(resource.id, resource) {
                warn!(
                    "resource {} listed more than once, dropping {} earlier items",
                    previous.id,
                    previous.items.len()
                );
            }
        }

        Ok(data)
    }

    /// Decode from the start of `reader`, whatever its current position.
    ///
    /// The fixed header is checked against the size of the source before anything else is
    /// buffered, so an oversized or mislabelled source is rejected without reading it all.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        let mut bytes = Vec::with_capacity(DIRECTORY_OFFSET as usize);
        reader.by_ref().take(DIRECTORY_OFFSET).read_to_end(&mut bytes)?;
        let header = SrfHeader::from_prefix(&bytes, len)?;

        // file_length matched, so the whole source fits in a u32
        bytes.reserve((header.file_length as usize).saturating_sub(bytes.len()));
        reader.read_to_end(&mut bytes)?;

        Self::from_bytes(&bytes)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        Self::read(&mut file)
    }

    /// Look up a resource by its identifier, e.g. `data.resource("TEX0")`.
    pub fn resource<I: AsRef<[u8]>>(&self, id: I) -> Option<&SrfResource> {
        self.resources.get(id.as_ref())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Resources ordered by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &SrfResource> {
        self.resources.values()
    }
}

impl SrfResource {
    pub fn new(id: ResourceId) -> Self {
        SrfResource {
            id,
            items: BTreeMap::new(),
        }
    }

    pub fn item(&self, number: u32) -> Option<&[u8]> {
        self.items.get(&number).map(Vec::as_slice)
    }

    /// Copy out the payload of every record in `entry` from the whole file image `file`.
    ///
    /// Payloads may sit anywhere in the file, overlapping each other or the directory, but must
    /// lie entirely within it.
    pub fn from_entry(entry: Entry, file: &[u8]) -> Result<Self> {
        let available = file.len() as u64;
        let mut resource = SrfResource::new(entry.id);

        for record in entry.records {
            let range = checked_range(u64::from(record.offset), u64::from(record.size), available)
                .ok_or(SrfError::TruncatedPayload {
                    resource: entry.id,
                    item: record.number,
                    offset: record.offset,
                    size: record.size,
                    available,
                })?;

            trace!(
                "{} item {}: 0x{:X} bytes at 0x{:X}",
                entry.id,
                record.number,
                record.size,
                record.offset
            );
            if resource.items.insert(record.number, file[range].to_vec()).is_some() {
                warn!("{} lists item {} more than once", entry.id, record.number);
            }
        }

        Ok(resource)
    }
}

impl<'a> IntoIterator for &'a SrfData {
    type Item = (&'a ResourceId, &'a SrfResource);
    type IntoIter = std::collections::btree_map::Iter<'a, ResourceId, SrfResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.resources.iter()
    }
}
