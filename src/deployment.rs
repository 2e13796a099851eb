use ethers::providers::{JsonRpcClient, Provider};
use tracing::{info, instrument};

use self::steps::{confirm, resolve_factory, submit};
use crate::cli::Args;
use crate::config::Config;
use crate::hardhat_utils::HardhatCompile;
use crate::report::ContractDeployment;

pub mod deployment_context;
pub mod steps;

pub use self::deployment_context::DeploymentContext;

pub async fn run_deployment(
    args: &Args,
    config: &Config,
) -> eyre::Result<(DeploymentContext, ContractDeployment)> {
    let context = DeploymentContext::new(args, config)?;

    if args.compile {
        HardhatCompile::new()
            .with_cwd(&args.project_root)
            .with_force(args.force_compile)
            .run()
            .await?;
    }

    let provider = context.provider()?;

    let deployment = deploy(&context, provider).await?;

    Ok((context, deployment))
}

/// Resolves, submits and confirms, strictly in that order
#[instrument(skip_all, fields(network = %context.network_name))]
pub async fn deploy<P>(
    context: &DeploymentContext,
    provider: Provider<P>,
) -> eyre::Result<ContractDeployment>
where
    P: JsonRpcClient + 'static,
{
    info!(url = %context.network.url, "Deploying {}", context.contract);

    let artifact = resolve_factory::resolve(context).await?;

    let submitted = submit::submit(context, provider, &artifact).await?;

    confirm::confirm(context, submitted).await
}
