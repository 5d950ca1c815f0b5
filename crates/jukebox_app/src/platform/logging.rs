//! Logger setup from command line flags.

use std::path::PathBuf;

use clap::ArgMatches;
use jukebox_logging::LogDestination;
use log::LevelFilter;

use crate::cli::{LOG_BOTH, LOG_FILE};

pub fn initialize(matches: &ArgMatches) {
    let file = matches
        .get_one::<String>("log-file")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("jukebox.log"));
    let destination = match matches.get_one::<String>("log").map(String::as_str) {
        Some(LOG_FILE) => LogDestination::File(file),
        Some(LOG_BOTH) => LogDestination::Both(file),
        _ => LogDestination::Terminal,
    };
    let level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    jukebox_logging::initialize(destination, level);
}
