//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::Address;

use crate::constants::{MARKETPLACE_CONTRACT_NAME, REGISTRY_CONTRACT_NAME, TOKEN_CONTRACT_NAME};

/// The contracts deployed by the scripts, in deployment order
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DeployableContract {
    /// The DSRE ERC20 token
    Token,
    /// The study resource NFT registry
    Registry,
    /// The marketplace, parameterized by the token and registry addresses
    Marketplace,
}

impl DeployableContract {
    /// The name of the contract's compilation artifact
    pub fn artifact_name(&self) -> &'static str {
        match self {
            DeployableContract::Token => TOKEN_CONTRACT_NAME,
            DeployableContract::Registry => REGISTRY_CONTRACT_NAME,
            DeployableContract::Marketplace => MARKETPLACE_CONTRACT_NAME,
        }
    }
}

impl Display for DeployableContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeployableContract::Token => write!(f, "DSRE Token"),
            DeployableContract::Registry => write!(f, "StudyResourceNFT"),
            DeployableContract::Marketplace => write!(f, "DSRE Marketplace"),
        }
    }
}

/// A single contract deployment to submit to the chain
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    /// The contract to deploy
    pub contract: DeployableContract,
    /// The constructor arguments, in declaration order
    pub constructor_args: Vec<DynSolValue>,
}

impl DeploymentRequest {
    /// Create a request for the given contract
    pub fn new(contract: DeployableContract, constructor_args: Vec<DynSolValue>) -> Self {
        Self {
            contract,
            constructor_args,
        }
    }
}

/// A handle on a deployed contract, as reported by the chain environment
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    /// The contract that was deployed
    pub contract: DeployableContract,
    /// The address at which the contract was deployed
    pub address: Address,
    /// Whether the deployment has been finalized
    pub confirmed: bool,
}

impl DeployedContract {
    /// A handle on a deployment that the chain has finalized
    pub fn confirmed(contract: DeployableContract, address: Address) -> Self {
        Self {
            contract,
            address,
            confirmed: true,
        }
    }

    /// The contract's address as a constructor argument for a dependent contract
    pub fn as_constructor_arg(&self) -> DynSolValue {
        DynSolValue::Address(self.address)
    }
}

/// The addresses produced by a successful deployment run
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DeployedAddresses {
    /// The address of the DSRE token
    pub token: Address,
    /// The address of the study resource registry
    pub registry: Address,
    /// The address of the marketplace
    pub marketplace: Address,
}

/// The progress of a single deployment run
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeploymentStage {
    /// No deployment has been submitted yet
    NotStarted,
    /// The given contract is being deployed
    Deploying(DeployableContract),
    /// All contracts were deployed
    Done,
    /// A deployment failed and the run was aborted
    Failed,
}

impl Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStage::NotStarted => write!(f, "not-started"),
            DeploymentStage::Deploying(contract) => {
                write!(f, "deploying({})", contract.artifact_name())
            }
            DeploymentStage::Done => write!(f, "done"),
            DeploymentStage::Failed => write!(f, "failed"),
        }
    }
}
