//! netCDF access layer.
//!
//! This module opens the product (directly or out of a tar container),
//! renames its dimensions and hands out variables as chunked lazy arrays.

mod archive;
mod attributes;
mod dataset;
mod lazy_array;

pub use archive::{
    is_sst_member, is_tar_path, ArchiveMember, NETCDF_SUFFIX, SST_SKIN_MARKER, TAR_EXTENSION,
};
pub use attributes::{attr_value_to_f64, attr_value_to_string};
pub use dataset::Dataset;
pub use lazy_array::{Axis, Decoding, LazyArray};
