use std::sync::Arc;

use ethers::providers::{JsonRpcClient, Provider};
use ethers::types::TxHash;
use tracing::{info, instrument};

use crate::artifacts::ContractArtifact;
use crate::common_keys::RpcSigner;
use crate::deployment::DeploymentContext;
use crate::ethers_utils::{ensure_chain_id, DeployTransactionBuilder};

pub struct SubmittedDeployment<P: JsonRpcClient> {
    pub contract: String,
    pub signer: Arc<RpcSigner<P>>,
    pub transaction_hash: TxHash,
}

#[instrument(name = "submit", skip_all)]
pub async fn submit<P>(
    context: &DeploymentContext,
    provider: Provider<P>,
    artifact: &ContractArtifact,
) -> eyre::Result<SubmittedDeployment<P>>
where
    P: JsonRpcClient + 'static,
{
    let signer = Arc::new(context.rpc_signer(provider)?);

    ensure_chain_id(signer.provider(), context.network.chain_id).await?;

    info!(
        deployer = ?signer.address(),
        network = %context.network_name,
        "Submitting deployment"
    );

    let transaction_hash = DeployTransactionBuilder::default()
        .abi(artifact.abi.clone())
        .bytecode(artifact.bytecode.clone())
        .signer(signer.clone())
        .build()?
        .send()
        .await?;

    info!(?transaction_hash, "Deployment submitted");

    Ok(SubmittedDeployment {
        contract: artifact.contract_name.clone(),
        signer,
        transaction_hash,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ethers::types::{Bytes, U256};

    use super::*;
    use crate::deployment::test_utils::{context, ANVIL_KEY};

    fn artifact() -> ContractArtifact {
        ContractArtifact {
            contract_name: "StakingPoolFactory".to_string(),
            source_name: "contracts/StakingPoolFactory.sol".to_string(),
            abi: serde_json::from_str("[]").unwrap(),
            bytecode: Bytes::from(vec![0x60, 0x80]),
            path: PathBuf::new(),
        }
    }

    #[tokio::test]
    async fn fails_without_a_signer() {
        let context = context(None);
        let (provider, _mock) = Provider::mocked();

        let err = submit(&context, provider, &artifact())
            .await
            .err()
            .unwrap();

        assert!(format!("{err}").contains("No signing account"));
    }

    #[tokio::test]
    async fn fails_on_chain_id_mismatch() -> eyre::Result<()> {
        let context = context(Some(ANVIL_KEY));
        let (provider, mock) = Provider::mocked();
        mock.push::<U256, _>(U256::from(1u64))?;

        let err = submit(&context, provider, &artifact())
            .await
            .err()
            .unwrap();

        assert!(format!("{err}").contains("10143 is configured"));

        Ok(())
    }
}
