//! ghrsst-inspect - Print the contents of a GHRSST L2 product.

use anyhow::{Context, Result};
use clap::Parser;
use ghrsst_l2::{
    DatasetInfo, DatasetKey, Engine, FilenameInfo, FiletypeInfo, GhrsstL2FileHandler, LazyArray,
    ReaderConfig,
};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "ghrsst-inspect")]
#[command(about = "Inspect a GHRSST L2 netCDF product (plain or tar-packed)", long_about = None)]
struct Args {
    /// Path to the netCDF file or tar archive
    file: PathBuf,

    /// Variable to describe, by standard name (repeatable; default: all)
    #[arg(short, long = "variable")]
    variables: Vec<String>,

    /// Chunk length along x and y (default: GHRSST_CHUNK_SIZE or 4096)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Backend used to open the file: netcdf or netcdf-diskless
    #[arg(long)]
    engine: Option<Engine>,

    /// Read the values and print summary statistics
    #[arg(long)]
    compute: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match args.chunk_size {
        Some(chunk_size) => ReaderConfig::default().with_chunk_size(chunk_size),
        None => ReaderConfig::from_env()?,
    };

    let handler = GhrsstL2FileHandler::with_config(
        &args.file,
        FilenameInfo::new(),
        FiletypeInfo::new("ghrsst_l2", "ghrsst_l2"),
        args.engine,
        config,
    )
    .with_context(|| format!("Failed to open {}", args.file.display()))?;

    println!("file:       {}", args.file.display());
    if let Some(member) = handler.archive_member() {
        println!("member:     {}", member.member_name());
    }
    println!("start_time: {}", handler.start_time());
    println!("end_time:   {}", handler.end_time());
    match handler.sensor() {
        Ok(sensor) => println!("sensor:     {}", sensor),
        Err(err) => println!("sensor:     <{}>", err),
    }

    let dataset = handler.dataset()?;
    let dims: Vec<String> = dataset
        .dimensions()
        .into_iter()
        .map(|(name, len)| format!("{}={}", name, len))
        .collect();
    println!("dimensions: {}", dims.join(", "));

    let names = if args.variables.is_empty() {
        dataset.variable_names()
    } else {
        args.variables.clone()
    };

    for name in names {
        let info = DatasetInfo::from([("standard_name".to_string(), name.clone())]);
        let array = handler
            .get_dataset(&DatasetKey::new(name.clone()), &info)
            .with_context(|| format!("Failed to load variable {}", name))?;
        describe(&array, args.compute)?;
    }

    tracing::info!("ghrsst-inspect exited");
    Ok(())
}

fn init_logging(args: &Args) -> Result<()> {
    if let Some(log_path) = &args.log {
        let log_path = log_path.clone();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    tracing::info!("Starting ghrsst-inspect");
    Ok(())
}

fn describe(array: &LazyArray<'_>, compute: bool) -> Result<()> {
    let dims: Vec<String> = array
        .dims()
        .iter()
        .zip(array.shape())
        .map(|(name, len)| format!("{}={}", name, len))
        .collect();
    println!();
    println!("{}({})", array.name(), dims.join(", "));
    println!("  chunks: {:?}", array.chunks());
    if let Some(units) = array.attribute("units") {
        println!("  units:  {}", units);
    }

    if compute {
        let values = array
            .compute()
            .with_context(|| format!("Failed to read {}", array.name()))?;
        let valid: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if valid.is_empty() {
            println!("  valid:  0 of {}", values.len());
        } else {
            let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
            let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = valid.iter().sum::<f64>() / valid.len() as f64;
            println!("  valid:  {} of {}", valid.len(), values.len());
            println!("  min:    {}", min);
            println!("  max:    {}", max);
            println!("  mean:   {}", mean);
        }
    }
    Ok(())
}
