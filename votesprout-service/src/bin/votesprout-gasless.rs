#[path = "votesprout-gasless/cli.rs"]
mod cli;
#[path = "votesprout-gasless/setup.rs"]
mod setup;

use crate::cli::{Cli, Command};
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse_args();
    args.apply_to_env();

    let app_config = setup::load_app_config()?;
    setup::init_logging(&app_config)?;
    let governance = setup::init_governance(&app_config, args.direct)?;
    let mode = if governance.is_direct() { "direct" } else { "gasless" };

    match args.command {
        Command::Address => {
            println!("{}", governance.acting_address().await?);
        }
        Command::CreateProposal { dao_id, title, description, options } => {
            info!("submitting createProposal mode={} dao_id={} title={} option_count={}", mode, dao_id, title, options.len());
            let report = governance.create_proposal(dao_id, &title, &description, &options).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Vote { proposal_id, choice_index, skip_window_check } => {
            info!("submitting vote mode={} proposal_id={} choice_index={}", mode, proposal_id, choice_index);
            let report = governance.vote(proposal_id, choice_index, !skip_window_check).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
