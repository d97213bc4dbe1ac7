use std::io;

use clap::Parser;
use deploy_scripts::{
    chain::EvmChain, cli::Cli, errors::DeployError, orchestrator::Orchestrator,
    utils::setup_client,
};

#[tokio::main]
async fn main() -> Result<(), DeployError> {
    let Cli {
        priv_key,
        rpc_url,
        artifacts_dir,
        confirmations,
        initial_supply,
    } = Cli::parse();

    // Logs go to stderr, stdout only carries the deployed addresses
    tracing_subscriber::fmt().with_writer(io::stderr).pretty().init();

    let provider = setup_client(&priv_key, &rpc_url).await?;
    let chain = EvmChain::new(provider, artifacts_dir, confirmations);

    let mut orchestrator = Orchestrator::new(chain).with_token_initial_supply(initial_supply);
    orchestrator.deploy_all(&mut io::stdout()).await?;

    Ok(())
}
