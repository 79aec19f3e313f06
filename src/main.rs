use std::fs::File;
use std::io::{BufWriter, IsTerminal};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};
use school_ingest::utils::{LogObserver, ProgressBarObserver, validate_directory};
use school_ingest::{IngestConfig, ProgressObserver, SchoolLoader, to_geojson};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

const USAGE: &str = "usage: school-ingest [DATA_DIR] [OUTPUT]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mut config = IngestConfig::from_env();
    if let Some(dir) = args.next() {
        if dir == "-h" || dir == "--help" {
            println!("{USAGE}");
            return Ok(());
        }
        config = config.with_data_dir(dir);
    }
    let output = args.next().map(PathBuf::from);

    if let Err(e) = validate_directory(&config.data_dir) {
        warn!("{e}");
        anyhow::bail!("data directory {} is not usable\n{USAGE}", config.data_dir.display());
    }

    info!("Loading school data from: {}", config.data_dir.display());
    let start = Instant::now();
    let loader = SchoolLoader::from_config(&config);
    // Progress bars only make sense on an interactive terminal
    let observer: Box<dyn ProgressObserver> = if std::io::stderr().is_terminal() {
        Box::new(ProgressBarObserver::new())
    } else {
        Box::new(LogObserver)
    };
    let load = loader.load(observer.as_ref()).await;
    info!(
        "Loaded {} schools in {:?}",
        load.summary.final_count,
        start.elapsed()
    );

    let Some(path) = output else {
        println!("{}", serde_json::to_string_pretty(&load.summary)?);
        return Ok(());
    };

    let file = File::create(&path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let writer = BufWriter::new(file);
    let geojson = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("geojson"));

    if geojson {
        serde_json::to_writer(writer, &to_geojson(&load.schools))
    } else {
        serde_json::to_writer_pretty(writer, &load.schools)
    }
    .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote {} schools to {}", load.schools.len(), path.display());
    Ok(())
}
