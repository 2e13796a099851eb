use std::time::Duration;

use ethers::providers::{Http, JsonRpcClient, Provider};
use eyre::{ensure, ContextCompat, WrapErr};

use crate::artifacts::Artifacts;
use crate::cli::Args;
use crate::common_keys::RpcSigner;
use crate::config::{Config, NetworkConfig};
use crate::types::Confirmations;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct DeploymentContext {
    pub contract: String,
    pub network_name: String,
    pub network: NetworkConfig,
    pub solidity: String,
    pub artifacts: Artifacts,
    pub confirmations: Confirmations,
    pub confirmation_timeout: Option<Duration>,
}

impl DeploymentContext {
    pub fn new(args: &Args, config: &Config) -> eyre::Result<Self> {
        ensure!(
            args.confirmations.0 > 0,
            "At least one confirmation is required"
        );

        let network = config.network(&args.network)?.clone();

        Ok(Self {
            contract: args.contract.clone(),
            network_name: args.network.clone(),
            network,
            solidity: config.solidity.clone(),
            artifacts: Artifacts::new(args.artifacts_dir()),
            confirmations: args.confirmations,
            confirmation_timeout: args.confirmation_timeout(),
        })
    }

    pub fn provider(&self) -> eyre::Result<Provider<Http>> {
        let url = self.network.url.as_str();

        let provider = Provider::<Http>::try_from(url)
            .wrap_err_with(|| format!("Invalid RPC url {url}"))?;

        Ok(provider.interval(POLL_INTERVAL))
    }

    /// Signs with the network's first account
    pub fn rpc_signer<P: JsonRpcClient>(
        &self,
        provider: Provider<P>,
    ) -> eyre::Result<RpcSigner<P>> {
        let private_key = self.network.deployer().with_context(|| {
            format!(
                "No signing account configured for network {}, set PRIVATE_KEY",
                self.network_name
            )
        })?;

        let wallet = private_key.wallet(self.network.chain_id);

        Ok(RpcSigner::new(provider, wallet))
    }
}
