use clap::Parser;
use std::path::PathBuf;

pub const BIND_ADDR_ENV: &str = "VOTESPROUT_SERVER__BIND_ADDR";
pub const LOG_FILTERS_ENV: &str = "VOTESPROUT_LOGGING__FILTERS";
pub const LOG_DIR_ENV: &str = "VOTESPROUT_LOGGING__LOG_DIR";

#[derive(Parser, Debug)]
#[command(name = "votesprout-service")]
#[command(about = "VoteSprout DAO voting API and paymaster proxy", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Log filters, e.g. `debug` or `info,root=warn,sqlx=warn`
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Write rolling log files to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// HTTP listen address
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn apply_to_env(&self) {
        if let Some(config_path) = &self.config {
            std::env::set_var(votesprout_core::infrastructure::config::CONFIG_PATH_ENV, config_path);
        }

        if let Some(data_dir) = &self.data_dir {
            std::env::set_var(votesprout_core::infrastructure::config::DATA_DIR_ENV, data_dir);
        }

        if let Some(log_level) = &self.log_level {
            std::env::set_var(LOG_FILTERS_ENV, log_level);
        }

        if let Some(log_dir) = &self.log_dir {
            std::env::set_var(LOG_DIR_ENV, log_dir);
        }

        if let Some(bind) = &self.bind {
            std::env::set_var(BIND_ADDR_ENV, bind);
        }
    }
}
