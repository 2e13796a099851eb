use std::fmt;
use std::str::FromStr;

use ethers::prelude::k256::SecretKey;
use ethers::signers::{LocalWallet, Signer, Wallet};
use serde::{Deserialize, Deserializer};

use crate::serde_utils;
use crate::types::ChainId;

#[derive(Clone)]
pub struct PrivateKey {
    pub key: SecretKey,
}

impl PrivateKey {
    pub fn wallet(&self, chain_id: ChainId) -> LocalWallet {
        Wallet::from(self.key.clone()).with_chain_id(chain_id.0)
    }
}

impl FromStr for PrivateKey {
    type Err = eyre::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches("0x");

        let bytes = hex::decode(s)?;

        let key = SecretKey::from_slice(&bytes)?;

        Ok(Self { key })
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = serde_utils::secret_key::deserialize(deserializer)?;

        Ok(Self { key })
    }
}

// Only the derived address is ever printed
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let address = Wallet::from(self.key.clone()).address();

        f.debug_struct("PrivateKey")
            .field("address", &address)
            .finish_non_exhaustive()
    }
}
