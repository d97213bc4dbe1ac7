//! The chain environment against which contracts are deployed

use std::path::PathBuf;

use alloy::{
    dyn_abi::DynSolValue,
    network::{Ethereum, TransactionBuilder},
    providers::{DynProvider, PendingTransactionBuilder, Provider},
    rpc::types::TransactionRequest,
};
use tracing::info;

use crate::{
    errors::DeployError,
    types::{DeployableContract, DeployedContract},
    utils::{load_artifact, ContractArtifact},
};

/// The capabilities the deployment orchestrator requires of a chain.
///
/// A deployment is resolved to a factory, submitted with its constructor
/// arguments, and then awaited until the chain confirms it.
#[allow(async_fn_in_trait)]
pub trait ChainEnvironment {
    /// A deployable handle on a contract
    type Factory;
    /// A submitted, not yet confirmed, deployment
    type PendingDeployment;

    /// Resolve the factory for the given contract
    async fn resolve_factory(
        &self,
        contract: DeployableContract,
    ) -> Result<Self::Factory, DeployError>;

    /// Submit a deployment of the factory's contract with the given constructor arguments
    async fn deploy(
        &self,
        factory: &Self::Factory,
        constructor_args: &[DynSolValue],
    ) -> Result<Self::PendingDeployment, DeployError>;

    /// Wait for a submitted deployment to be finalized
    async fn confirm(
        &self,
        pending: Self::PendingDeployment,
    ) -> Result<DeployedContract, DeployError>;
}

/// A contract factory backed by a compilation artifact
#[derive(Debug, Clone)]
pub struct ArtifactFactory {
    /// The contract the artifact compiles
    pub contract: DeployableContract,
    /// The compilation artifact
    pub artifact: ContractArtifact,
}

/// A deployment transaction that has been accepted by the node
pub struct PendingEvmDeployment {
    /// The contract being deployed
    contract: DeployableContract,
    /// The pending creation transaction
    tx: PendingTransactionBuilder<Ethereum>,
}

/// An EVM chain reached over JSON-RPC, deploying contracts from Hardhat artifacts
pub struct EvmChain {
    /// The signing provider used to submit transactions
    provider: DynProvider,
    /// The directory holding the compilation artifacts
    artifacts_dir: PathBuf,
    /// The number of confirmations to await for each deployment
    confirmations: u64,
}

impl EvmChain {
    /// Create a chain environment on top of the given provider
    pub fn new(provider: DynProvider, artifacts_dir: PathBuf, confirmations: u64) -> Self {
        Self {
            provider,
            artifacts_dir,
            confirmations,
        }
    }
}

impl ChainEnvironment for EvmChain {
    type Factory = ArtifactFactory;
    type PendingDeployment = PendingEvmDeployment;

    async fn resolve_factory(
        &self,
        contract: DeployableContract,
    ) -> Result<ArtifactFactory, DeployError> {
        let artifact = load_artifact(&self.artifacts_dir, contract.artifact_name())?;
        Ok(ArtifactFactory { contract, artifact })
    }

    async fn deploy(
        &self,
        factory: &ArtifactFactory,
        constructor_args: &[DynSolValue],
    ) -> Result<PendingEvmDeployment, DeployError> {
        let calldata = factory.artifact.deploy_calldata(constructor_args)?;
        let tx_request = TransactionRequest::default().with_deploy_code(calldata);

        let tx = self.provider.send_transaction(tx_request).await.map_err(|e| {
            DeployError::ContractDeployment(format!(
                "{}: {e}",
                factory.contract.artifact_name()
            ))
        })?;
        info!(tx_hash = %tx.tx_hash(), "submitted {} deployment", factory.contract.artifact_name());

        Ok(PendingEvmDeployment {
            contract: factory.contract,
            tx,
        })
    }

    async fn confirm(
        &self,
        pending: PendingEvmDeployment,
    ) -> Result<DeployedContract, DeployError> {
        let PendingEvmDeployment { contract, tx } = pending;
        let name = contract.artifact_name();

        let receipt = tx
            .with_required_confirmations(self.confirmations)
            .get_receipt()
            .await
            .map_err(|e| DeployError::ContractConfirmation(format!("{name}: {e}")))?;

        if !receipt.status() {
            return Err(DeployError::ContractConfirmation(format!(
                "{name} deployment reverted in tx {:#x}",
                receipt.transaction_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            DeployError::ContractConfirmation(format!(
                "receipt for tx {:#x} has no contract address",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeployedContract::confirmed(contract, address))
    }
}
