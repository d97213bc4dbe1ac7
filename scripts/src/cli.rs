//! Definitions of CLI arguments for the deploy script

use std::path::PathBuf;

use alloy_primitives::U256;
use clap::Parser;

use crate::constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOY_CONFIRMATIONS, DEFAULT_RPC_URL};

/// Deploy the DSRE token, study resource registry, and marketplace contracts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(long = "pkey", env = "PKEY", hide_env_values = true)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the Hardhat compilation artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Number of confirmations to await for each deployment, at least one
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_DEPLOY_CONFIRMATIONS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub confirmations: u64,

    /// Initial token supply, passed to the token constructor.
    /// Required when the token constructor takes a supply, as `DSREToken` does;
    /// the token is deployed without constructor arguments if omitted
    #[arg(long)]
    pub initial_supply: Option<U256>,
}
