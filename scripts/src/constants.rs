//! Constants used in the deploy scripts

/// The RPC URL used when none is configured, the default Hardhat / Anvil node
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// The directory holding the Hardhat compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The number of confirmations to wait for each contract deployment transaction
pub const DEFAULT_DEPLOY_CONFIRMATIONS: u64 = 1;

/// The name of the subdirectory of the artifacts directory in which Hardhat
/// places the artifacts of the project's own contracts
pub const CONTRACTS_PATH_SEGMENT: &str = "contracts";

/// The extension of a Solidity source file
pub const SOLIDITY_EXTENSION: &str = "sol";

/// The extension of a compilation artifact
pub const ARTIFACT_EXTENSION: &str = "json";

/// The artifact name of the DSRE ERC20 token contract
pub const TOKEN_CONTRACT_NAME: &str = "DSREToken";

/// The artifact name of the study resource NFT registry contract
pub const REGISTRY_CONTRACT_NAME: &str = "StudyResourceNFT";

/// The artifact name of the DSRE marketplace contract
pub const MARKETPLACE_CONTRACT_NAME: &str = "DSREMarketplace";
