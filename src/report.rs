use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::ChainId;

pub mod contract_deployment;

pub use self::contract_deployment::ContractDeployment;

/// Every deployment made to one network, oldest first
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub network: String,
    pub chain_id: ChainId,

    #[serde(default)]
    pub deployments: Vec<ContractDeployment>,
}

impl Report {
    pub fn new(network: impl ToString, chain_id: ChainId) -> Self {
        Self {
            network: network.to_string(),
            chain_id,
            deployments: vec![],
        }
    }

    pub fn path(deployments_dir: impl AsRef<Path>, network: &str) -> PathBuf {
        deployments_dir.as_ref().join(format!("{network}.yml"))
    }

    pub fn latest(&self, contract: &str) -> Option<&ContractDeployment> {
        self.deployments
            .iter()
            .rev()
            .find(|deployment| deployment.contract == contract)
    }
}
