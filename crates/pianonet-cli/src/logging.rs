//! Console logging setup.
//!
//! Library crates log through the `log` facade; the binary routes those
//! records to stderr with log4rs so stdout stays clean for command output.

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const STDERR_APPENDER: &str = "stderr";
const PATTERN: &str = "{h({l:<5})} {t} - {m}{n}";

/// Log level for the given verbosity flag.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Build the log4rs configuration: a single stderr console appender.
pub fn config(level: LevelFilter) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    Config::builder()
        .appender(Appender::builder().build(STDERR_APPENDER, Box::new(stderr)))
        .build(Root::builder().appender(STDERR_APPENDER).build(level))
        .context("Failed to build logging configuration")
}

/// Install the global logger.
pub fn init(verbose: bool) -> Result<()> {
    let config = config(level_for(verbose))?;
    log4rs::init_config(config).context("Failed to init logging")?;
    Ok(())
}
