// The Cli selects the tracked object and customizes the initial conditions.
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use std::{fs::read_to_string, path::PathBuf, str::FromStr};

use orbit_track::prelude::{Config, Epoch};

/// Task to be executed
pub enum Task {
    /// Ground track of a single object
    Track {
        designator: String,
        tle_file: Option<PathBuf>,
        stations: Option<PathBuf>,
        start: Option<Epoch>,
        output: PathBuf,
    },
    /// Objects launched on a given date
    Search {
        date: String,
        output: Option<PathBuf>,
    },
}

pub struct Cli {
    matches: ArgMatches,
}

impl Cli {
    pub fn new() -> Self {
        let cmd = Command::new("track")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Satellite ground track animation payloads")
            .arg_required_else_help(true)
            .subcommand_required(true)
            .color(ColorChoice::Always)
            .arg(
                Arg::new("cfg")
                    .long("cfg")
                    .action(ArgAction::Set)
                    .global(true)
                    .required(false)
                    .value_parser(value_parser!(PathBuf))
                    .help("Load Configuration script (Optional)"),
            )
            .subcommand(
                Command::new("search")
                    .about("Search for objects launched on a specific date")
                    .arg(
                        Arg::new("date")
                            .long("date")
                            .action(ArgAction::Set)
                            .required(true)
                            .help("Launch date, YYYY-MM-DD"),
                    )
                    .arg(
                        Arg::new("output")
                            .short('o')
                            .long("output")
                            .action(ArgAction::Set)
                            .value_parser(value_parser!(PathBuf))
                            .help("Save results to this JSON file (Optional)"),
                    ),
            )
            .subcommand(
                Command::new("track")
                    .about("Track an object and generate its animation payload")
                    .arg(
                        Arg::new("intdes")
                            .action(ArgAction::Set)
                            .required(true)
                            .help("International designator (1998-067A) or catalog number (25544)"),
                    )
                    .arg(
                        Arg::new("step")
                            .short('s')
                            .long("step")
                            .action(ArgAction::Set)
                            .value_parser(value_parser!(f64))
                            .help("Time step in seconds (default: 60)"),
                    )
                    .arg(
                        Arg::new("count")
                            .short('c')
                            .long("count")
                            .action(ArgAction::Set)
                            .value_parser(value_parser!(usize))
                            .help("Number of steps (default: 4320)"),
                    )
                    .arg(
                        Arg::new("leo")
                            .long("leo")
                            .action(ArgAction::SetTrue)
                            .help("Use the LEO preset (10s step, one day)"),
                    )
                    .arg(
                        Arg::new("start")
                            .long("start")
                            .action(ArgAction::Set)
                            .help("First instant, like \"2025-12-06T13:00:00 UTC\" (default: now)"),
                    )
                    .arg(
                        Arg::new("stations")
                            .long("stations")
                            .action(ArgAction::Set)
                            .value_parser(value_parser!(PathBuf))
                            .help("Ground stations CSV file (name,lat,lon)"),
                    )
                    .arg(
                        Arg::new("tle-file")
                            .long("tle-file")
                            .action(ArgAction::Set)
                            .value_parser(value_parser!(PathBuf))
                            .help("Read TLE from this file instead of fetching it"),
                    )
                    .arg(
                        Arg::new("output")
                            .short('o')
                            .long("output")
                            .action(ArgAction::Set)
                            .value_parser(value_parser!(PathBuf))
                            .help("Output directory (default: output)"),
                    ),
            );

        Self {
            matches: cmd.get_matches(),
        }
    }

    /// Configuration script (or default) with command line overrides.
    pub fn config(&self) -> Config {
        let mut cfg = match self.matches.get_one::<PathBuf>("cfg") {
            Some(path) => {
                let content = read_to_string(path)
                    .unwrap_or_else(|e| panic!("failed to read configuration: {}", e));
                serde_json::from_str::<Config>(&content)
                    .unwrap_or_else(|e| panic!("failed to parse configuration: {}", e))
            },
            None => Config::default(),
        };

        if let Some(("track", matches)) = self.matches.subcommand() {
            if matches.get_flag("leo") {
                let leo = Config::leo_preset();
                cfg = cfg.with_step_seconds(leo.step_seconds).with_count(leo.count);
            }
            if let Some(step) = matches.get_one::<f64>("step") {
                cfg = cfg.with_step_seconds(*step);
            }
            if let Some(count) = matches.get_one::<usize>("count") {
                cfg = cfg.with_count(*count);
            }
        }

        cfg
    }

    pub fn task(&self) -> Task {
        match self.matches.subcommand() {
            Some(("search", matches)) => Task::Search {
                date: matches
                    .get_one::<String>("date")
                    .cloned()
                    .unwrap_or_default(),
                output: matches.get_one::<PathBuf>("output").cloned(),
            },
            Some(("track", matches)) => Task::Track {
                designator: matches
                    .get_one::<String>("intdes")
                    .cloned()
                    .unwrap_or_default(),
                tle_file: matches.get_one::<PathBuf>("tle-file").cloned(),
                stations: matches.get_one::<PathBuf>("stations").cloned(),
                start: matches.get_one::<String>("start").map(|s| {
                    Epoch::from_str(s).unwrap_or_else(|e| panic!("invalid start time: {}", e))
                }),
                output: matches
                    .get_one::<PathBuf>("output")
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from("output")),
            },
            _ => unreachable!("subcommand is required"),
        }
    }
}
