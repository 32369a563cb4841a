#![allow(dead_code)]

use binwrite::BinWrite;

/// Identifiers are written as a big endian word so their bytes land in order.
pub fn id_word(id: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*id)
}

#[derive(BinWrite, Debug, Clone)]
#[binwrite(big)]
pub struct Header {
    pub magic: u32,
    pub file_length: u32,
    pub header_length: u32,
}

#[derive(BinWrite, Debug, Clone)]
#[binwrite(big)]
pub struct Record {
    pub number: u32,
    pub offset: u32,
    pub size: u32,
}

#[derive(BinWrite, Debug, Clone)]
#[binwrite(big)]
pub struct Entry {
    pub id: u32,
    pub item_count: u32,
    pub records: Vec<Record>,
}

/// An SRF file laid out as header, directory, then payload data. Fields can be tampered with
/// before calling [`Image::to_bytes`].
#[derive(Debug, Clone)]
pub struct Image {
    pub header: Header,
    pub entries: Vec<Entry>,
    pub data: Vec<u8>,
}

impl Image {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.header.write(&mut out).unwrap();
        for entry in &self.entries {
            entry.write(&mut out).unwrap();
        }
        out.extend_from_slice(&self.data);
        out
    }
}

#[derive(Default)]
pub struct SrfBuilder {
    resources: Vec<([u8; 4], Vec<(u32, Vec<u8>)>)>,
}

impl SrfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource(mut self, id: &[u8; 4], items: &[(u32, &[u8])]) -> Self {
        let items = items
            .iter()
            .map(|(number, payload)| (*number, payload.to_vec()))
            .collect();
        self.resources.push((*id, items));
        self
    }

    pub fn build(&self) -> Image {
        let header_length: usize = self
            .resources
            .iter()
            .map(|(_, items)| 8 + 12 * items.len())
            .sum();

        let data_start = 12 + header_length;
        let mut data = Vec::new();
        let mut entries = Vec::new();

        for (id, items) in &self.resources {
            let mut records = Vec::new();
            for (number, payload) in items {
                records.push(Record {
                    number: *number,
                    offset: (data_start + data.len()) as u32,
                    size: payload.len() as u32,
                });
                data.extend_from_slice(payload);
            }

            entries.push(Entry {
                id: id_word(id),
                item_count: records.len() as u32,
                records,
            });
        }

        Image {
            header: Header {
                magic: id_word(b"srf1"),
                file_length: (data_start + data.len()) as u32,
                header_length: header_length as u32,
            },
            entries,
            data,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.build().to_bytes()
    }
}
