use srf_rs::SrfData;

use log::info;
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "extract_files")]
struct Opt {
    #[structopt(parse(from_os_str))]
    input: PathBuf,
    #[structopt(parse(from_os_str), default_value="output/", short="o", long="output")]
    output_folder: PathBuf
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opt = Opt::from_args();

    let data = SrfData::open(&opt.input)?;

    for (id, resource) in &data {
        // ids aren't guaranteed to be printable, Display escapes them
        let folder = opt.output_folder.join(id.to_string().replace('/', "_"));
        fs::create_dir_all(&folder)?;

        for (number, payload) in &resource.items {
            let file_path = folder.join(format!("{}.bin", number));
            info!("{}: {} bytes -> {}", id, payload.len(), file_path.display());
            File::create(&file_path)?.write_all(payload)?;
        }
    }

    Ok(())
}
