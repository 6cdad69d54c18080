// Ground track demo: resolves a TLE, propagates it and saves
// the animation payload as JSON, ready for a rendering layer.

#[macro_use]
extern crate log;

use env_logger::{Builder, Target};
use std::{
    fs::{create_dir_all, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

mod cli;
use cli::{Cli, Task};

use orbit_track::prelude::{
    build_track_within, launches_on, load_stations, Config, Epoch, Error, LogRecorder,
    TleSource, Visualization,
};

/// Payload file name, derived from the object name.
fn payload_name(object_name: &str) -> String {
    let name = object_name
        .trim()
        .replace(|c: char| c.is_whitespace() || c == '/' || c == '\\', "_");
    format!("{}_orbit_viz.json", name)
}

fn save_json<T: serde::Serialize>(path: &Path, content: &T) {
    let fd = File::create(path)
        .unwrap_or_else(|e| panic!("failed to create {}: {}", path.display(), e));
    serde_json::to_writer_pretty(BufWriter::new(fd), content)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
}

fn search(cfg: &Config, date: &str, output: Option<PathBuf>) -> Result<(), Error> {
    info!("searching for launches on {}..", date);

    let source = TleSource::http(cfg)?;
    let entries = launches_on(&source, date)?;

    if entries.is_empty() {
        info!("no launches found for this date");
        return Ok(());
    }

    for entry in entries.iter() {
        info!("- {} ({})", entry.object_name, entry.object_id);
    }

    if let Some(path) = output {
        save_json(&path, &entries);
        info!("results saved to {}", path.display());
    }

    Ok(())
}

fn track(
    cfg: &Config,
    designator: &str,
    tle_file: Option<PathBuf>,
    stations: Option<PathBuf>,
    start: Option<Epoch>,
    output: PathBuf,
) -> Result<(), Error> {
    cfg.validate()?;

    let source = TleSource::http(cfg)?;
    let tle = source.resolve(designator, tle_file.as_deref())?;

    let stations = match stations {
        Some(path) => load_stations(&path, LogRecorder)?,
        None => Vec::new(),
    };

    let start = start.unwrap_or_else(|| {
        Epoch::now().unwrap_or_else(|e| panic!("failed to determine system time: {}", e))
    });

    info!("propagating orbit..");
    let track = build_track_within(&tle, start, cfg.step_seconds, cfg.count, cfg.max_span())?;
    info!("calculated {} points", track.len());

    let viz = Visualization::build(&tle, &track, &stations, cfg);

    create_dir_all(&output)
        .unwrap_or_else(|e| panic!("failed to create {}: {}", output.display(), e));

    let path = output.join(payload_name(tle.name()));
    info!("saving visualization to {}..", path.display());
    save_json(&path, &viz);

    Ok(())
}

pub fn main() {
    // Take advantage of generated logs
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let cfg = cli.config();

    debug!("{:#?}", cfg);

    let result = match cli.task() {
        Task::Search { date, output } => search(&cfg, &date, output),
        Task::Track {
            designator,
            tle_file,
            stations,
            start,
            output,
        } => track(&cfg, &designator, tle_file, stations, start, output),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
