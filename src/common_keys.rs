use ethers::prelude::*;

pub struct RpcSigner<P: JsonRpcClient = Http>(
    pub SignerMiddleware<Provider<P>, LocalWallet>,
);

impl<P: JsonRpcClient> RpcSigner<P> {
    pub fn new(provider: Provider<P>, wallet: LocalWallet) -> Self {
        Self(SignerMiddleware::new(provider, wallet))
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    pub fn provider(&self) -> &Provider<P> {
        self.0.inner()
    }
}
