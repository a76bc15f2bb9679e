//! Tests for the `ghrsst-inspect` binary.

mod common;

use assert_cmd::Command;
use common::{plain_granule, write_tar};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn prints_times_sensor_and_dimensions() {
    let dir = TempDir::new().unwrap();
    let path = plain_granule(dir.path());

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("start_time: 2020-01-01 00:00:00"))
        .stdout(predicate::str::contains("end_time:   2020-01-01 00:09:59"))
        .stdout(predicate::str::contains("sensor:     viirs"))
        .stdout(predicate::str::contains("y=3"))
        .stdout(predicate::str::contains("x=4"))
        .stdout(predicate::str::contains("sea_surface_temperature(y=3, x=4)"))
        .stdout(predicate::str::contains("ni=").not());
}

#[test]
fn computes_statistics_for_selected_variable() {
    let dir = TempDir::new().unwrap();
    let path = plain_granule(dir.path());

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .arg(&path)
        .args(["--variable", "lat", "--compute", "--chunk-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lat(y=3, x=4)"))
        .stdout(predicate::str::contains("chunks: [[2, 1], [2, 2]]"))
        .stdout(predicate::str::contains("valid:  12 of 12"))
        .stdout(predicate::str::contains("min:    10"))
        .stdout(predicate::str::contains("max:    21"))
        .stdout(predicate::str::contains("sea_surface_temperature").not());
}

#[test]
fn reads_member_from_tar_archive() {
    let dir = TempDir::new().unwrap();
    let granule = plain_granule(dir.path());
    let archive = dir.path().join("granule.tar");
    write_tar(&archive, &[("L2P_GHRSST-SSTskin-test.nc", granule.as_path())]);

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .arg(&archive)
        .args(["--engine", "netcdf-diskless"])
        .assert()
        .success()
        .stdout(predicate::str::contains("member:     L2P_GHRSST-SSTskin-test.nc"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .arg(dir.path().join("absent.nc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}

#[test]
fn unknown_variable_fails() {
    let dir = TempDir::new().unwrap();
    let path = plain_granule(dir.path());

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .arg(&path)
        .args(["-v", "sea_ice_fraction"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variable not found: sea_ice_fraction"));
}

#[test]
fn chunk_size_flag_overrides_invalid_environment() {
    let dir = TempDir::new().unwrap();
    let path = plain_granule(dir.path());

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .env("GHRSST_CHUNK_SIZE", "huge")
        .arg(&path)
        .args(["-v", "lat", "--chunk-size", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chunks: [[2, 1], [2, 2]]"));

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .env("GHRSST_CHUNK_SIZE", "huge")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GHRSST_CHUNK_SIZE"));
}

#[test]
fn chunk_size_is_read_from_environment() {
    let dir = TempDir::new().unwrap();
    let path = plain_granule(dir.path());

    Command::cargo_bin("ghrsst-inspect")
        .unwrap()
        .env("GHRSST_CHUNK_SIZE", "3")
        .arg(&path)
        .args(["-v", "lat"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chunks: [[3], [3, 1]]"));
}
