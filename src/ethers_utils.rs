use std::sync::Arc;

use ethers::abi::Abi;
use ethers::providers::{JsonRpcClient, Middleware, Provider};
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{
    BlockNumber, Bytes, Eip1559TransactionRequest, TxHash, U256,
};
use eyre::{bail, ContextCompat, WrapErr};

use crate::common_keys::RpcSigner;
use crate::types::ChainId;

/// Fails unless the node reports the chain id the network is configured with
pub async fn ensure_chain_id<P>(
    provider: &Provider<P>,
    expected: ChainId,
) -> eyre::Result<()>
where
    P: JsonRpcClient,
{
    let chain_id = provider
        .get_chainid()
        .await
        .wrap_err("Fetching chain id")?;

    if chain_id != U256::from(expected.0) {
        bail!(
            "Network reports chain id {chain_id} but {expected} is configured"
        );
    }

    Ok(())
}

pub struct DeployTransaction<P: JsonRpcClient> {
    abi: Abi,
    bytecode: Bytes,
    signer: Arc<RpcSigner<P>>,
}

pub struct DeployTransactionBuilder<P: JsonRpcClient> {
    abi: Option<Abi>,
    bytecode: Option<Bytes>,
    signer: Option<Arc<RpcSigner<P>>>,
}

impl<P: JsonRpcClient> Default for DeployTransactionBuilder<P> {
    fn default() -> Self {
        Self {
            abi: None,
            bytecode: None,
            signer: None,
        }
    }
}

impl<P: JsonRpcClient> DeployTransactionBuilder<P> {
    pub fn abi(mut self, abi: Abi) -> Self {
        self.abi = Some(abi);
        self
    }

    pub fn bytecode(mut self, bytecode: Bytes) -> Self {
        self.bytecode = Some(bytecode);
        self
    }

    pub fn signer(mut self, signer: Arc<RpcSigner<P>>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> eyre::Result<DeployTransaction<P>> {
        Ok(DeployTransaction {
            abi: self.abi.context("DeployTransactionBuilder missing abi")?,
            bytecode: self
                .bytecode
                .context("DeployTransactionBuilder missing bytecode")?,
            signer: self
                .signer
                .context("DeployTransactionBuilder missing signer")?,
        })
    }
}

impl<P> DeployTransaction<P>
where
    P: JsonRpcClient + 'static,
{
    /// Creation code, with the (empty) constructor arguments appended
    pub fn call_data(&self) -> eyre::Result<Bytes> {
        let Some(constructor) = self.abi.constructor() else {
            return Ok(self.bytecode.clone());
        };

        let call_data = constructor
            .encode_input(self.bytecode.to_vec(), &[])
            .wrap_err_with(|| {
                format!(
                    "Constructor expects {} arguments, none are supported",
                    constructor.inputs.len()
                )
            })?;

        Ok(call_data.into())
    }

    /// Signs and submits the creation transaction, returning its hash
    pub async fn send(self) -> eyre::Result<TxHash> {
        let call_data = self.call_data()?;

        // Counts transactions still waiting in the mempool, e.g. from a run
        // that timed out before confirmation
        let nonce = self
            .signer
            .0
            .get_transaction_count(
                self.signer.address(),
                Some(BlockNumber::Pending.into()),
            )
            .await
            .wrap_err("Fetching pending nonce")?;

        let mut tx = TypedTransaction::Eip1559(
            Eip1559TransactionRequest::new()
                .from(self.signer.address())
                .nonce(nonce)
                .data(call_data),
        );

        self.signer
            .0
            .fill_transaction(&mut tx, None)
            .await
            .wrap_err("Filling deployment transaction")?;

        let pending = self
            .signer
            .0
            .send_transaction(tx, None)
            .await
            .wrap_err("Send transaction")?;

        Ok(pending.tx_hash())
    }
}
