use std::path::{Path, PathBuf};

use eyre::bail;
use tracing::{info, instrument};

use crate::deployment::DeploymentContext;
use crate::report::{ContractDeployment, Report};
use crate::serde_utils;

/// Appends the deployment to the network's report, returning the report path
#[instrument(skip_all)]
pub async fn assemble_report(
    context: &DeploymentContext,
    deployments_dir: impl AsRef<Path>,
    deployment: &ContractDeployment,
) -> eyre::Result<PathBuf> {
    let path = Report::path(deployments_dir, &context.network_name);

    let mut report = if path.exists() {
        serde_utils::read_deserialize::<Report>(&path).await?
    } else {
        Report::new(&context.network_name, context.network.chain_id)
    };

    if report.chain_id != context.network.chain_id {
        bail!(
            "{} records deployments on chain {}, not {}",
            path.display(),
            report.chain_id,
            context.network.chain_id
        );
    }

    if let Some(previous) = report.latest(&deployment.contract) {
        info!(
            previous = ?previous.address,
            "Superseding previous {} deployment",
            deployment.contract
        );
    }

    report.deployments.push(deployment.clone());

    serde_utils::write_serialize(&path, &report).await?;

    Ok(path)
}
