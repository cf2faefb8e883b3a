//! Logging setup on `log` + `log4rs`.
//!
//! Filter syntax: a bare level sets the app level (default `info`), `<target>=<level>`
//! overrides a single target, and `root=<level>` opts in third-party crates, which are
//! silent otherwise.

mod consts;

pub use consts::*;

use crate::foundation::VoteSproutError;
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            policy::compound::{roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy},
            RollingFileAppender,
        },
    },
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::io::IsTerminal;
use std::path::Path;

const CONSOLE_APPENDER: &str = "stderr";
const LOG_FILE_APPENDER: &str = "log_file";
const ERR_LOG_FILE_APPENDER: &str = "err_log_file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilters {
    pub app_level: LevelFilter,
    pub root_level: LevelFilter,
    pub targets: Vec<(String, LevelFilter)>,
}

impl LogFilters {
    pub fn parse(filters: &str) -> Self {
        let mut parsed = Self { app_level: LevelFilter::Info, root_level: LevelFilter::Off, targets: Vec::new() };
        let mut app_level_seen = false;
        for part in filters.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            match part.split_once('=') {
                None if !app_level_seen => {
                    if let Ok(level) = part.parse() {
                        parsed.app_level = level;
                        app_level_seen = true;
                    }
                }
                None => {}
                Some((target, level)) => {
                    let (target, level) = (target.trim(), level.trim());
                    let Ok(level) = level.parse::<LevelFilter>() else {
                        continue;
                    };
                    if target.is_empty() {
                        continue;
                    }
                    if target == "root" {
                        parsed.root_level = level;
                    } else {
                        parsed.targets.push((target.to_string(), level));
                    }
                }
            }
        }
        parsed
    }

    fn overrides(&self, target: &str) -> bool {
        self.targets.iter().any(|(name, _)| name == target)
    }
}

/// Install the global logger. Console output goes to stderr; with `log_dir` set, records are
/// also written to a rolling `votesprout.log` and a warn+ `votesprout_err.log`.
///
/// A second call leaves the first logger in place.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> Result<(), VoteSproutError> {
    let filters = LogFilters::parse(filters);

    let console_pattern = if std::io::stderr().is_terminal() { LOG_LINE_PATTERN_COLORED } else { LOG_LINE_PATTERN };
    let console = ConsoleAppender::builder().target(Target::Stderr).encoder(Box::new(PatternEncoder::new(console_pattern))).build();

    let mut builder = Config::builder().appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
    let mut appenders = vec![CONSOLE_APPENDER.to_string()];

    if let Some(dir) = log_dir.map(str::trim).filter(|dir| !dir.is_empty()) {
        let dir = Path::new(dir);
        builder = builder.appender(Appender::builder().build(LOG_FILE_APPENDER, Box::new(rolling_file(dir, LOG_FILE_NAME)?)));
        builder = builder.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Warn)))
                .build(ERR_LOG_FILE_APPENDER, Box::new(rolling_file(dir, ERR_LOG_FILE_NAME)?)),
        );
        appenders.push(LOG_FILE_APPENDER.to_string());
        appenders.push(ERR_LOG_FILE_APPENDER.to_string());
    }

    for target in WHITELISTED_TARGETS.iter().filter(|target| !filters.overrides(target)) {
        builder = builder.logger(Logger::builder().appenders(appenders.clone()).additive(false).build(*target, filters.app_level));
    }
    for (target, level) in &filters.targets {
        builder = builder.logger(Logger::builder().appenders(appenders.clone()).additive(false).build(target, *level));
    }

    let config = builder
        .build(Root::builder().appenders(appenders).build(filters.root_level))
        .map_err(|err| VoteSproutError::ConfigError(format!("invalid logging config: {err}")))?;
    let _ = log4rs::init_config(config);
    Ok(())
}

fn rolling_file(dir: &Path, file_name: &str) -> Result<RollingFileAppender, VoteSproutError> {
    let archive_pattern = dir.join(format!("{file_name}.{{}}.gz"));
    let archive_pattern = archive_pattern
        .to_str()
        .ok_or_else(|| VoteSproutError::ConfigError(format!("log dir is not valid UTF-8: {}", dir.display())))?;
    let roller = FixedWindowRoller::builder()
        .base(1)
        .build(archive_pattern, LOG_FILE_MAX_ROLLS)
        .map_err(|err| VoteSproutError::ConfigError(format!("log roller for {file_name}: {err}")))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_FILE_MAX_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN)))
        .build(dir.join(file_name), Box::new(policy))
        .map_err(|err| VoteSproutError::StorageError { operation: format!("open {file_name}"), details: err.to_string() })
}
