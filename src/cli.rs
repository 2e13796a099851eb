use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub mod private_key;

pub use private_key::PrivateKey;

use crate::config::DEFAULT_NETWORK;
use crate::types::Confirmations;

pub const DEFAULT_CONTRACT: &str = "StakingPoolFactory";

/// Deploys a compiled Hardhat contract and prints its address
#[derive(Debug, Clone, Parser)]
#[clap(rename_all = "kebab-case")]
pub struct Args {
    /// Name of the contract to deploy, either `Name` or `path/To.sol:Name`
    #[clap(long, default_value = DEFAULT_CONTRACT)]
    pub contract: String,

    /// Network to deploy to
    #[clap(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,

    /// Path to a network configuration file
    ///
    /// Replaces the built-in network table when given
    #[clap(short, long, env)]
    pub config: Option<PathBuf>,

    /// Private key of the deployer
    ///
    /// Deployment fails at submission when missing
    #[clap(long, env, hide_env_values = true)]
    pub private_key: Option<String>,

    /// Root of the Hardhat project
    #[clap(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Artifacts directory, relative to the project root
    #[clap(long, default_value = "artifacts")]
    pub artifacts: PathBuf,

    /// Run `hardhat compile` before deploying
    #[clap(long)]
    pub compile: bool,

    /// Pass `--force` to `hardhat compile`, ignoring its cache
    #[clap(long, requires = "compile")]
    pub force_compile: bool,

    /// Number of confirmations to wait for
    #[clap(long, default_value = "1")]
    pub confirmations: Confirmations,

    /// Give up waiting for confirmations after this many seconds
    #[clap(long)]
    pub confirmation_timeout: Option<u64>,

    /// Directory the deployment report is written to
    #[clap(long, default_value = "deployments")]
    pub deployments_dir: PathBuf,

    /// Don't write a deployment report
    #[clap(long)]
    pub no_report: bool,
}

impl Args {
    pub fn artifacts_dir(&self) -> PathBuf {
        self.project_root.join(&self.artifacts)
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout.map(Duration::from_secs)
    }
}
