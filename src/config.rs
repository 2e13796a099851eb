use std::collections::HashMap;
use std::path::Path;

use eyre::{ContextCompat, WrapErr};
use serde::Deserialize;
use tracing::warn;

use crate::cli::PrivateKey;
use crate::serde_utils;
use crate::types::ChainId;

pub const DEFAULT_NETWORK: &str = "monad_testnet";
pub const MONAD_TESTNET_URL: &str = "https://monad-testnet.drpc.org";
pub const MONAD_TESTNET_CHAIN_ID: ChainId = ChainId(10143);
pub const SOLIDITY_VERSION: &str = "0.8.18";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_solidity")]
    pub solidity: String,
    pub networks: HashMap<String, NetworkConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub url: String,
    #[serde(default)]
    pub accounts: Vec<PrivateKey>,
    pub chain_id: ChainId,
}

fn default_solidity() -> String {
    SOLIDITY_VERSION.to_string()
}

impl NetworkConfig {
    /// The account deployments are signed with
    pub fn deployer(&self) -> Option<&PrivateKey> {
        self.accounts.first()
    }
}

impl Config {
    /// The built-in network table, signing with `private_key` if there is one
    pub fn builtin(private_key: Option<PrivateKey>) -> Self {
        let monad_testnet = NetworkConfig {
            url: MONAD_TESTNET_URL.to_string(),
            accounts: private_key.into_iter().collect(),
            chain_id: MONAD_TESTNET_CHAIN_ID,
        };

        Self {
            solidity: default_solidity(),
            networks: HashMap::from([(
                DEFAULT_NETWORK.to_string(),
                monad_testnet,
            )]),
        }
    }

    pub async fn load(
        path: Option<&Path>,
        private_key: Option<PrivateKey>,
    ) -> eyre::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::builtin(private_key));
        };

        let mut config: Self = serde_utils::read_deserialize(path).await?;

        if let Some(private_key) = private_key {
            for network in config.networks.values_mut() {
                if network.accounts.is_empty() {
                    network.accounts.push(private_key.clone());
                }
            }
        }

        Ok(config)
    }

    pub fn network(&self, name: &str) -> eyre::Result<&NetworkConfig> {
        let network = self.networks.get(name).with_context(|| {
            let mut known: Vec<_> = self.networks.keys().collect();
            known.sort();

            format!("Unknown network {name}, configured networks: {known:?}")
        })?;

        if network.accounts.is_empty() {
            warn!(
                network = name,
                "No accounts configured, deployments will fail to sign"
            );
        }

        Ok(network)
    }
}

/// Reads the signing key the way the Hardhat config does: unset or empty means none
pub fn private_key_from_env(
    raw: Option<&str>,
) -> eyre::Result<Option<PrivateKey>> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let private_key =
        raw.parse::<PrivateKey>().wrap_err("Parsing PRIVATE_KEY")?;

    Ok(Some(private_key))
}
