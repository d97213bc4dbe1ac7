//! Utilities for the deploy scripts.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::JsonAbi,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_primitives::Bytes;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    constants::{ARTIFACT_EXTENSION, CONTRACTS_PATH_SEGMENT, SOLIDITY_EXTENSION},
    errors::DeployError,
};

/// Sets up the provider with which to deploy the contracts, signing
/// transactions with the given private key.
pub async fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DynProvider, DeployError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let deployer = signer.address();

    let url =
        Url::parse(rpc_url).map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    let provider = DynProvider::new(ProviderBuilder::new().wallet(signer).connect_http(url));

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| DeployError::ClientInitialization(e.to_string()))?;
    info!(chain_id, %deployer, "connected to {rpc_url}");

    Ok(provider)
}

/// A Hardhat compilation artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    /// The name of the compiled contract
    pub contract_name: String,
    /// The contract's ABI
    pub abi: JsonAbi,
    /// The contract's creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, DeployError> {
        let artifact: ContractArtifact =
            serde_json::from_str(json).map_err(|e| DeployError::ArtifactParsing(e.to_string()))?;

        // Interfaces and abstract contracts compile to empty bytecode
        if artifact.bytecode.is_empty() {
            return Err(DeployError::ArtifactParsing(format!(
                "{} has no creation bytecode",
                artifact.contract_name
            )));
        }

        Ok(artifact)
    }

    /// Build the calldata of a creation transaction: the creation bytecode
    /// followed by the ABI-encoded constructor arguments
    pub fn deploy_calldata(&self, constructor_args: &[DynSolValue]) -> Result<Bytes, DeployError> {
        let mut calldata = self.bytecode.to_vec();
        match self.abi.constructor() {
            Some(constructor) => {
                let encoded_args = constructor.abi_encode_input(constructor_args).map_err(|e| {
                    DeployError::CalldataConstruction(format!("{}: {e}", self.contract_name))
                })?;
                calldata.extend_from_slice(&encoded_args);
            }
            None if constructor_args.is_empty() => {}
            None => {
                return Err(DeployError::CalldataConstruction(format!(
                    "{} has no constructor, but {} arguments were given",
                    self.contract_name,
                    constructor_args.len()
                )))
            }
        }

        Ok(calldata.into())
    }
}

/// The locations at which the artifact for the given contract may be found,
/// in order of preference
fn artifact_paths(artifacts_dir: &Path, contract_name: &str) -> [PathBuf; 2] {
    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");
    [
        artifacts_dir
            .join(CONTRACTS_PATH_SEGMENT)
            .join(format!("{contract_name}.{SOLIDITY_EXTENSION}"))
            .join(&file_name),
        artifacts_dir.join(file_name),
    ]
}

/// Load the compilation artifact for the given contract from the artifacts directory
pub fn load_artifact(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractArtifact, DeployError> {
    let artifact_path = artifact_paths(artifacts_dir, contract_name)
        .into_iter()
        .find(|path| path.is_file())
        .ok_or_else(|| {
            DeployError::ArtifactParsing(format!(
                "no artifact for {contract_name} under {}",
                artifacts_dir.display()
            ))
        })?;
    debug!("reading artifact {}", artifact_path.display());

    let contents = fs::read_to_string(&artifact_path)
        .map_err(|e| DeployError::ArtifactParsing(e.to_string()))?;
    let artifact = ContractArtifact::from_json(&contents)?;

    if artifact.contract_name != contract_name {
        return Err(DeployError::ArtifactParsing(format!(
            "{} contains the artifact for {}, expected {contract_name}",
            artifact_path.display(),
            artifact.contract_name
        )));
    }

    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use alloy::dyn_abi::DynSolValue;
    use alloy_primitives::{Address, U256};

    use super::{load_artifact, ContractArtifact};
    use crate::errors::DeployError;

    /// A marketplace artifact with a two-address constructor
    const MARKETPLACE_ARTIFACT: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "DSREMarketplace",
        "sourceName": "contracts/DSREMarketplace.sol",
        "abi": [
            {
                "type": "constructor",
                "stateMutability": "nonpayable",
                "inputs": [
                    { "name": "_dsreToken", "type": "address", "internalType": "address" },
                    { "name": "_studyResourceNFT", "type": "address", "internalType": "address" }
                ]
            }
        ],
        "bytecode": "0x6080604052",
        "deployedBytecode": "0x6080",
        "linkReferences": {},
        "deployedLinkReferences": {}
    }"#;

    /// A registry artifact without a constructor
    const REGISTRY_ARTIFACT: &str = r#"{
        "contractName": "StudyResourceNFT",
        "abi": [],
        "bytecode": "0x60806040"
    }"#;

    #[test]
    fn test_parse_artifact() {
        let artifact = ContractArtifact::from_json(MARKETPLACE_ARTIFACT).unwrap();

        assert_eq!(artifact.contract_name, "DSREMarketplace");
        assert_eq!(&artifact.bytecode[..], &[0x60, 0x80, 0x60, 0x40, 0x52]);
        assert_eq!(artifact.abi.constructor().unwrap().inputs.len(), 2);
    }

    #[test]
    fn test_interface_artifact_rejected() {
        let json = r#"{ "contractName": "IERC20", "abi": [], "bytecode": "0x" }"#;
        let res = ContractArtifact::from_json(json);

        assert!(matches!(res, Err(DeployError::ArtifactParsing(_))));
    }

    #[test]
    fn test_unlinked_bytecode_rejected() {
        let json = r#"{
            "contractName": "Linked",
            "abi": [],
            "bytecode": "0x73__$f1e2d3c4b5a69788796a5b4c3d2e1f0a1b$__63"
        }"#;
        let res = ContractArtifact::from_json(json);

        assert!(matches!(res, Err(DeployError::ArtifactParsing(_))));
    }

    #[test]
    fn test_constructor_args_appended() {
        let artifact = ContractArtifact::from_json(MARKETPLACE_ARTIFACT).unwrap();
        let token = Address::repeat_byte(0xaa);
        let registry = Address::repeat_byte(0xbb);

        let calldata = artifact
            .deploy_calldata(&[DynSolValue::Address(token), DynSolValue::Address(registry)])
            .unwrap();

        let bytecode_len = artifact.bytecode.len();
        assert_eq!(calldata.len(), bytecode_len + 64);
        assert_eq!(&calldata[..bytecode_len], &artifact.bytecode[..]);
        // Addresses are left-padded to a full word
        assert_eq!(&calldata[bytecode_len + 12..bytecode_len + 32], token.as_slice());
        assert_eq!(&calldata[bytecode_len + 44..], registry.as_slice());
    }

    #[test]
    fn test_constructor_arg_mismatch() {
        let artifact = ContractArtifact::from_json(MARKETPLACE_ARTIFACT).unwrap();

        let missing = artifact.deploy_calldata(&[DynSolValue::Address(Address::ZERO)]);
        assert!(matches!(missing, Err(DeployError::CalldataConstruction(_))));

        let wrong_type = artifact.deploy_calldata(&[
            DynSolValue::Address(Address::ZERO),
            DynSolValue::Uint(U256::from(1), 256),
        ]);
        assert!(matches!(wrong_type, Err(DeployError::CalldataConstruction(_))));
    }

    #[test]
    fn test_no_constructor() {
        let artifact = ContractArtifact::from_json(REGISTRY_ARTIFACT).unwrap();

        let calldata = artifact.deploy_calldata(&[]).unwrap();
        assert_eq!(calldata, artifact.bytecode);

        let res = artifact.deploy_calldata(&[DynSolValue::Uint(U256::from(1_000_000), 256)]);
        assert!(matches!(res, Err(DeployError::CalldataConstruction(_))));
    }

    #[test]
    fn test_load_artifact_from_hardhat_layout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let artifacts_dir = temp_dir.path();
        let source_dir = artifacts_dir.join("contracts").join("DSREMarketplace.sol");
        fs::create_dir_all(&source_dir).unwrap();
        fs::write(source_dir.join("DSREMarketplace.json"), MARKETPLACE_ARTIFACT).unwrap();
        fs::write(artifacts_dir.join("StudyResourceNFT.json"), REGISTRY_ARTIFACT).unwrap();

        let marketplace = load_artifact(artifacts_dir, "DSREMarketplace").unwrap();
        assert_eq!(marketplace.contract_name, "DSREMarketplace");

        let registry = load_artifact(artifacts_dir, "StudyResourceNFT").unwrap();
        assert_eq!(registry.contract_name, "StudyResourceNFT");

        let missing = load_artifact(artifacts_dir, "DSREToken");
        assert!(matches!(missing, Err(DeployError::ArtifactParsing(_))));

        // An artifact filed under the wrong name is rejected
        fs::write(artifacts_dir.join("DSREToken.json"), REGISTRY_ARTIFACT).unwrap();
        let misnamed = load_artifact(artifacts_dir, "DSREToken");
        assert!(matches!(misnamed, Err(DeployError::ArtifactParsing(_))));
    }
}
