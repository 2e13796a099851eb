use ethers::types::{Address, H256};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ContractDeployment {
    pub contract: String,
    pub address: Address,
    pub deployer: Address,
    pub transaction_hash: H256,
    #[serde(default)]
    pub block_number: Option<u64>,
}
