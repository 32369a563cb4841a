//! Reader for SRF resource containers.
//!
//! An SRF file is a small header followed by a directory of resources, each of which lists numbered
//! items pointing at payload bytes anywhere in the file. Decoding always materializes the whole
//! directory:
//!
//! ```no_run
//! let data = srf_rs::SrfData::open("textures.srf").unwrap();
//! if let Some(tex) = data.resource("TEX0") {
//!     for (number, payload) in &tex.items {
//!         println!("{}: {} bytes", number, payload.len());
//!     }
//! }
//! ```

pub mod common;
pub mod error;
pub mod srf;

pub use common::ResourceId;
pub use error::{ErrorKind, Result, SrfError};
pub use srf::{SrfData, SrfHeader, SrfResource};
