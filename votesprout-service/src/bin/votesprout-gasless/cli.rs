use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const LOG_FILTERS_ENV: &str = "VOTESPROUT_LOGGING__FILTERS";
pub const SERVICE_URL_ENV: &str = "VOTESPROUT_GASLESS__SERVICE_URL";
pub const NODE_RPC_URL_ENV: &str = "VOTESPROUT_GASLESS__NODE_RPC_URL";

#[derive(Parser, Debug)]
#[command(name = "votesprout-gasless")]
#[command(about = "Submit VoteSprout governance calls on-chain, sponsored or direct, and mirror them to the service", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log filters, e.g. `debug` or `info,root=warn`
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// VoteSprout service base URL (paymaster proxy routes)
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Ethereum node JSON-RPC URL
    #[arg(long, global = true)]
    pub node_url: Option<String>,

    /// Send plain transactions from the owner key instead of sponsored user operations
    #[arg(long, global = true)]
    pub direct: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the address that calls the governance contract (smart account, or owner with --direct)
    Address,
    /// Create a governance proposal and record it under a DAO in the service
    CreateProposal {
        /// DAO the proposal is mirrored into
        #[arg(long)]
        dao_id: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Repeat for each option
        #[arg(long = "option", required = true, num_args = 1)]
        options: Vec<String>,
    },
    /// Vote on a governance proposal and record the vote in the service
    Vote {
        #[arg(long)]
        proposal_id: u64,
        #[arg(long = "choice")]
        choice_index: i64,
        /// Submit even if the proposal's voting window has closed or cannot be checked
        #[arg(long)]
        skip_window_check: bool,
    },
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

        if let Some(service_url) = &self.service_url {
            std::env::set_var(SERVICE_URL_ENV, service_url);
        }

        if let Some(node_url) = &self.node_url {
            std::env::set_var(NODE_RPC_URL_ENV, node_url);
        }
    }
}
