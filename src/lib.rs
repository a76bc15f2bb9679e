//! ghrsst-l2 - Reader for GHRSST Level-2 sea surface temperature products.
//!
//! Opens a GHRSST L2P netCDF file, either standalone or packed inside a tar
//! archive, and serves its variables as chunked lazy arrays through the
//! [`FileHandler`] contract used by a host processing pipeline.
//!
//! # Features
//!
//! - Plain netCDF or netCDF-in-tar input
//! - `ni`/`nj` exposed as generic `x`/`y` dimensions
//! - Start/end time and sensor metadata
//! - CF fill/scale decoding on demand, tile by tile
//!
//! # Example
//!
//! ```ignore
//! use ghrsst_l2::{DatasetInfo, DatasetKey, FilenameInfo, FiletypeInfo, GhrsstL2FileHandler};
//!
//! let handler = GhrsstL2FileHandler::new(
//!     "granule-GHRSST-SSTskin.nc",
//!     FilenameInfo::new(),
//!     FiletypeInfo::new("ghrsst_l2", "ghrsst_l2"),
//!     None,
//! )?;
//! println!("{} - {} ({})", handler.start_time(), handler.end_time(), handler.sensor()?);
//!
//! let info = DatasetInfo::from([("standard_name".into(), "sea_surface_temperature".into())]);
//! let sst = handler.get_dataset(&DatasetKey::new("sst"), &info)?;
//! let values = sst.compute()?;
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod config;
pub mod data;
pub mod error;
pub mod handler;
pub mod time;

pub use config::{Engine, ReaderConfig};
pub use data::{Dataset, LazyArray};
pub use error::{GhrsstError, Result};
pub use handler::{
    DatasetInfo, DatasetKey, FileHandler, FilenameInfo, FiletypeInfo, GhrsstL2FileHandler,
    MetaValue,
};
