use ethers::providers::{JsonRpcClient, PendingTransaction};
use ethers::types::U64;
use eyre::{bail, eyre, ContextCompat, WrapErr};
use tracing::{info, instrument};

use super::submit::SubmittedDeployment;
use crate::deployment::DeploymentContext;
use crate::report::ContractDeployment;

#[instrument(
    name = "confirm",
    skip_all,
    fields(tx = ?submitted.transaction_hash)
)]
pub async fn confirm<P>(
    context: &DeploymentContext,
    submitted: SubmittedDeployment<P>,
) -> eyre::Result<ContractDeployment>
where
    P: JsonRpcClient + 'static,
{
    let transaction_hash = submitted.transaction_hash;

    let pending =
        PendingTransaction::new(transaction_hash, submitted.signer.provider())
            .confirmations(context.confirmations.0);

    let receipt = match context.confirmation_timeout {
        Some(timeout) => {
            tokio::time::timeout(timeout, pending).await.map_err(|_| {
                eyre!(
                    "Timed out after {timeout:?} waiting for deployment transaction {transaction_hash:?}"
                )
            })?
        }
        None => pending.await,
    }
    .wrap_err("Awaiting receipt")?
    .with_context(|| {
        format!("Deployment transaction {transaction_hash:?} was dropped")
    })?;

    if receipt.status != Some(U64::from(1)) {
        bail!("Deployment transaction {transaction_hash:?} reverted");
    }

    let address = receipt
        .contract_address
        .context("Receipt is missing the contract address")?;

    info!(?address, block = ?receipt.block_number, "Deployment confirmed");

    Ok(ContractDeployment {
        contract: submitted.contract,
        address,
        deployer: receipt.from,
        transaction_hash,
        block_number: receipt.block_number.map(|block| block.as_u64()),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use ethers::providers::{MockProvider, Provider};
    use ethers::types::{Address, Transaction, TransactionReceipt, H256};

    use super::*;
    use crate::cli::PrivateKey;
    use crate::common_keys::RpcSigner;
    use crate::deployment::test_utils::{context, ANVIL_KEY};
    use crate::types::ChainId;

    fn tx_hash() -> H256 {
        H256::repeat_byte(0xab)
    }

    fn contract_address() -> Address {
        Address::repeat_byte(0x42)
    }

    fn submitted(
        poll_interval: Duration,
    ) -> (SubmittedDeployment<MockProvider>, MockProvider) {
        let key: PrivateKey = ANVIL_KEY.parse().unwrap();
        let (provider, mock) = Provider::mocked();

        let submitted = SubmittedDeployment {
            contract: "StakingPoolFactory".to_string(),
            signer: Arc::new(RpcSigner::new(
                provider.interval(poll_interval),
                key.wallet(ChainId(10143)),
            )),
            transaction_hash: tx_hash(),
        };

        (submitted, mock)
    }

    fn mined_transaction() -> Transaction {
        Transaction {
            hash: tx_hash(),
            block_number: Some(U64::from(7)),
            ..Default::default()
        }
    }

    fn receipt(status: u64) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: tx_hash(),
            block_number: Some(U64::from(7)),
            status: Some(U64::from(status)),
            contract_address: Some(contract_address()),
            ..Default::default()
        }
    }

    // Responses are served last-in first-out
    fn mock_mined(mock: &MockProvider, receipt: TransactionReceipt) {
        mock.push::<TransactionReceipt, _>(receipt).unwrap();
        mock.push::<Transaction, _>(mined_transaction()).unwrap();
    }

    #[tokio::test]
    async fn confirmed_deployment() -> eyre::Result<()> {
        let context = context(Some(ANVIL_KEY));
        let (submitted, mock) = submitted(Duration::from_millis(10));
        mock_mined(&mock, receipt(1));

        let deployment = confirm(&context, submitted).await?;

        assert_eq!(deployment.contract, "StakingPoolFactory");
        assert_eq!(deployment.address, contract_address());
        assert_eq!(deployment.transaction_hash, tx_hash());
        assert_eq!(deployment.block_number, Some(7));

        Ok(())
    }

    #[tokio::test]
    async fn reverted_deployment() {
        let context = context(Some(ANVIL_KEY));
        let (submitted, mock) = submitted(Duration::from_millis(10));
        mock_mined(&mock, receipt(0));

        let err = confirm(&context, submitted).await.unwrap_err();

        assert!(format!("{err}").contains("reverted"));
    }

    #[tokio::test]
    async fn dropped_deployment() {
        let context = context(Some(ANVIL_KEY));
        let (submitted, mock) = submitted(Duration::from_millis(10));
        mock.push::<Option<Transaction>, _>(None).unwrap();

        let err = confirm(&context, submitted).await.unwrap_err();

        assert!(format!("{err}").contains("dropped"));
    }

    #[tokio::test]
    async fn times_out() {
        let mut context = context(Some(ANVIL_KEY));
        context.confirmation_timeout = Some(Duration::from_millis(1));
        let (submitted, _mock) = submitted(Duration::from_secs(60));

        let err = confirm(&context, submitted).await.unwrap_err();

        assert!(format!("{err}").contains("Timed out"));
    }
}
