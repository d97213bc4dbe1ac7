//! The deployment sequence for the marketplace contracts
//!
//! The token and the registry are deployed first, each awaited until the chain
//! confirms it. The marketplace is deployed last, constructed with the confirmed
//! token and registry addresses. The first failure aborts the run; contracts
//! deployed before it are left on-chain as they are.

use std::io::Write;

use alloy::dyn_abi::DynSolValue;
use alloy_primitives::U256;
use tracing::{error, info};

use crate::{
    chain::ChainEnvironment,
    errors::DeployError,
    types::{
        DeployableContract, DeployedAddresses, DeployedContract, DeploymentRequest,
        DeploymentStage,
    },
};

/// Drives a single deployment run against a chain environment
pub struct Orchestrator<C: ChainEnvironment> {
    /// The chain to deploy to
    chain: C,
    /// The progress of the run
    stage: DeploymentStage,
    /// The initial supply passed to the token constructor, if any
    token_initial_supply: Option<U256>,
}

impl<C: ChainEnvironment> Orchestrator<C> {
    /// Create an orchestrator that has not yet deployed anything
    pub fn new(chain: C) -> Self {
        Self {
            chain,
            stage: DeploymentStage::NotStarted,
            token_initial_supply: None,
        }
    }

    /// Pass the given initial supply to the token constructor
    pub fn with_token_initial_supply(mut self, initial_supply: Option<U256>) -> Self {
        self.token_initial_supply = initial_supply;
        self
    }

    /// The progress of the run
    pub fn stage(&self) -> DeploymentStage {
        self.stage
    }

    /// Deploy the token, the registry, and the marketplace, in that order,
    /// writing a line to `out` as each deployment is confirmed
    pub async fn deploy_all(
        &mut self,
        out: &mut impl Write,
    ) -> Result<DeployedAddresses, DeployError> {
        if self.stage != DeploymentStage::NotStarted {
            return Err(DeployError::InvalidState(format!(
                "cannot start a deployment run from stage {}",
                self.stage
            )));
        }

        match self.deploy_sequence(out).await {
            Ok(addresses) => {
                self.transition(DeploymentStage::Done);
                Ok(addresses)
            }
            Err(e) => {
                error!("aborting deployment during {}: {e}", self.stage);
                self.transition(DeploymentStage::Failed);
                Err(e)
            }
        }
    }

    /// Run the three deployment steps, short-circuiting on the first failure
    async fn deploy_sequence(
        &mut self,
        out: &mut impl Write,
    ) -> Result<DeployedAddresses, DeployError> {
        let token_args = self
            .token_initial_supply
            .map(|supply| DynSolValue::Uint(supply, 256))
            .into_iter()
            .collect();
        let token = self
            .deploy_step(DeploymentRequest::new(DeployableContract::Token, token_args), out)
            .await?;

        let registry = self
            .deploy_step(DeploymentRequest::new(DeployableContract::Registry, vec![]), out)
            .await?;

        let marketplace_args = vec![token.as_constructor_arg(), registry.as_constructor_arg()];
        let marketplace = self
            .deploy_step(
                DeploymentRequest::new(DeployableContract::Marketplace, marketplace_args),
                out,
            )
            .await?;

        Ok(DeployedAddresses {
            token: token.address,
            registry: registry.address,
            marketplace: marketplace.address,
        })
    }

    /// Deploy a single contract and report its address
    async fn deploy_step(
        &mut self,
        request: DeploymentRequest,
        out: &mut impl Write,
    ) -> Result<DeployedContract, DeployError> {
        self.transition(DeploymentStage::Deploying(request.contract));

        let deployed = self.deploy_contract(request).await?;
        writeln!(out, "{} deployed to: {}", deployed.contract, deployed.address)
            .map_err(|e| DeployError::Output(e.to_string()))?;

        Ok(deployed)
    }

    /// Resolve, submit, and await confirmation of a single deployment
    pub async fn deploy_contract(
        &self,
        request: DeploymentRequest,
    ) -> Result<DeployedContract, DeployError> {
        let DeploymentRequest {
            contract,
            constructor_args,
        } = request;

        let factory = self.chain.resolve_factory(contract).await?;
        let pending = self.chain.deploy(&factory, &constructor_args).await?;
        let deployed = self.chain.confirm(pending).await?;

        // Dependent deployments must only ever see finalized addresses
        if !deployed.confirmed {
            return Err(DeployError::ContractConfirmation(format!(
                "{} at {} was not confirmed",
                contract.artifact_name(),
                deployed.address
            )));
        }

        info!(address = %deployed.address, "{} deployment confirmed", contract.artifact_name());
        Ok(deployed)
    }

    /// Move the run to the given stage
    fn transition(&mut self, next: DeploymentStage) {
        info!("deployment stage: {} -> {next}", self.stage);
        self.stage = next;
    }
}
