use srf_rs::srf::header::DIRECTORY_OFFSET;
use srf_rs::srf::{Entries, SrfHeader};
use srf_rs::SrfData;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "srf_info")]
struct Opt {
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    /// Also print where each item's payload lives
    #[structopt(short = "l", long = "layout")]
    layout: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opt = Opt::from_args();

    let bytes = fs::read(&opt.input)?;
    let header = SrfHeader::from_bytes(&bytes)?;

    println!("magic: {}", header.magic.escape_ascii());
    println!("file_length: {:x}, header_length: {:x}", header.file_length, header.header_length);

    if opt.layout {
        for entry in Entries::new(header.directory(&bytes)?) {
            let entry = entry?;
            let offset = DIRECTORY_OFFSET + entry.position;
            println!("{} @ 0x{:X} ({} items)", entry.id, offset, entry.records.len());
            for record in &entry.records {
                println!("    {}: 0x{:X} bytes @ 0x{:X}", record.number, record.size, record.offset);
            }
        }
    }

    // full decode, so payload bounds get checked too
    let data = SrfData::from_bytes(&bytes)?;
    println!("{} resources", data.len());
    for resource in data.iter() {
        println!("{}: {} items", resource.id, resource.items.len());
        for (number, payload) in &resource.items {
            println!("    {}: {:x} bytes", number, payload.len());
        }
    }

    Ok(())
}
