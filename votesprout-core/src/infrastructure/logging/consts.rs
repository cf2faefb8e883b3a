pub const LOG_FILE_NAME: &str = "votesprout.log";
/// Warn and error records only.
pub const ERR_LOG_FILE_NAME: &str = "votesprout_err.log";

/// `timestamp [LEVEL] message [module] [thread-id]`
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}] [{I}]{n}";
pub const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}] [{I}]{n}";

pub const LOG_FILE_MAX_SIZE: u64 = 50_000_000;
pub const LOG_FILE_MAX_ROLLS: u32 = 5;

/// Targets logged at the app level by default; everything else is off unless `root=<level>` is given.
/// `http` is the request log target used by the service middleware.
pub const WHITELISTED_TARGETS: &[&str] = &["votesprout_core", "votesprout_service", "http"];
