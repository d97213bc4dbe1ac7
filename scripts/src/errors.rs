//! Definitions of errors that can occur during deployment of the contracts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur while deploying the marketplace contracts.
///
/// Every variant aborts the deployment sequence; none are retried.
#[derive(Debug)]
pub enum DeployError {
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error reading or parsing a contract compilation artifact
    ArtifactParsing(String),
    /// Error constructing the creation calldata for a contract
    CalldataConstruction(String),
    /// Error submitting a contract deployment
    ContractDeployment(String),
    /// Error awaiting confirmation of a contract deployment
    ContractConfirmation(String),
    /// The deployment sequence was invoked from a state that does not allow it
    InvalidState(String),
    /// Error writing the deployment report
    Output(String),
}

impl Display for DeployError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeployError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            DeployError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            DeployError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            DeployError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            DeployError::ContractConfirmation(s) => {
                write!(f, "error confirming deployment: {}", s)
            }
            DeployError::InvalidState(s) => write!(f, "invalid deployment state: {}", s),
            DeployError::Output(s) => write!(f, "error writing output: {}", s),
        }
    }
}

impl Error for DeployError {}
