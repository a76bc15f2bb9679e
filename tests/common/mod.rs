//! Fixture writers shared by the integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

pub const FILL: i16 = -32768;
pub const NI: usize = 4;
pub const NJ: usize = 3;

/// Global metadata of a generated granule.
#[derive(Debug, Clone)]
pub struct Granule {
    pub start_time: &'static str,
    pub stop_time: &'static str,
    pub sensor: Option<&'static str>,
    pub ni_name: &'static str,
    /// Extra plain variable over `time` only, by name.
    pub extra_variable: Option<&'static str>,
}

impl Default for Granule {
    fn default() -> Self {
        Self {
            start_time: "20200101T000000Z",
            stop_time: "20200101T000959Z",
            sensor: Some("VIIRS"),
            ni_name: "ni",
            extra_variable: None,
        }
    }
}

/// Raw SST counts; the first pixel is fill.
pub fn sst_counts() -> Vec<i16> {
    (0..(NI * NJ) as i16)
        .map(|i| if i == 0 { FILL } else { 2900 + i })
        .collect()
}

/// Write a small L2P-shaped netCDF file.
///
/// `sea_surface_temperature(time=1, nj, ni)` is packed as i16 with fill,
/// scale and offset; `lat(nj, ni)` is plain f32; `time(time)` holds seconds
/// since 1981.
pub fn write_granule(path: &Path, granule: &Granule) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("time", 1).unwrap();
    file.add_dimension("nj", NJ).unwrap();
    file.add_dimension(granule.ni_name, NI).unwrap();

    file.add_attribute("start_time", granule.start_time).unwrap();
    file.add_attribute("stop_time", granule.stop_time).unwrap();
    if let Some(sensor) = granule.sensor {
        file.add_attribute("sensor", sensor).unwrap();
    }

    let mut time = file.add_variable::<i32>("time", &["time"]).unwrap();
    time.put_attribute("units", "seconds since 1981-01-01 00:00:00")
        .unwrap();
    time.put_values(&[1_230_768_000i32], ..).unwrap();

    if let Some(name) = granule.extra_variable {
        let mut extra = file.add_variable::<f32>(name, &["time"]).unwrap();
        extra.put_values(&[0.0f32], ..).unwrap();
    }

    let mut sst = file
        .add_variable::<i16>("sea_surface_temperature", &["time", "nj", granule.ni_name])
        .unwrap();
    sst.set_fill_value(FILL).unwrap();
    sst.put_attribute("scale_factor", 0.01f32).unwrap();
    sst.put_attribute("add_offset", 273.15f32).unwrap();
    sst.put_attribute("units", "kelvin").unwrap();
    sst.put_attribute("long_name", "sea surface skin temperature")
        .unwrap();
    sst.put_values(&sst_counts(), ..).unwrap();

    let lat_values: Vec<f32> = (0..NI * NJ).map(|i| 10.0 + i as f32).collect();
    let mut lat = file
        .add_variable::<f32>("lat", &["nj", granule.ni_name])
        .unwrap();
    lat.put_attribute("units", "degrees_north").unwrap();
    lat.put_values(&lat_values, ..).unwrap();
}

/// Write a granule with default metadata into `dir` and return its path.
pub fn plain_granule(dir: &Path) -> PathBuf {
    let path = dir.join("20200101000000-STAR-L2P_GHRSST-SSTskin-VIIRS_NPP-ACSPO_V2.61-v02.0-fv01.0.nc");
    write_granule(&path, &Granule::default());
    path
}

/// Pack files into a tar archive under the given member names, in order.
pub fn write_tar(path: &Path, members: &[(&str, &Path)]) {
    let mut builder = tar::Builder::new(File::create(path).unwrap());
    for (name, source) in members {
        builder.append_path_with_name(source, name).unwrap();
    }
    builder.finish().unwrap();
}
