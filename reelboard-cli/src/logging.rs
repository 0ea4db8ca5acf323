//! Logger setup.

use std::fs;
use std::fs::File;

use log::LevelFilter;
use simplelog::ColorChoice;
use simplelog::CombinedLogger;
use simplelog::ConfigBuilder;
use simplelog::SharedLogger;
use simplelog::TermLogger;
use simplelog::TerminalMode;
use simplelog::WriteLogger;

use crate::paths;

/// Logs warnings (everything with `verbose`) to stderr and everything at
/// debug level to `latest.log` in the cache directory.
///
/// A log file that cannot be created is skipped, not fatal.
pub fn init(verbose: bool) {
    let term_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let config = ConfigBuilder::new()
        .add_filter_allow_str("reelboard")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    paths::rotate_logs();
    if let Some(path) = paths::log_file() {
        let created = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|_| File::create(&path));
        match created {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, config, file)),
            Err(e) => eprintln!("Warning: cannot write log file {}: {}", path.display(), e),
        }
    }

    // Fails only if a logger is already installed
    let _ = CombinedLogger::init(loggers);
}
