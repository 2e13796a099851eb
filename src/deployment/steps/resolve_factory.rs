use tracing::{info, instrument, warn};

use crate::artifacts::ContractArtifact;
use crate::deployment::DeploymentContext;

#[instrument(name = "resolve_factory", skip_all, fields(contract = %context.contract))]
pub async fn resolve(
    context: &DeploymentContext,
) -> eyre::Result<ContractArtifact> {
    let artifact = context
        .artifacts
        .contract_factory(&context.contract)
        .await?;

    if let Some(solc_version) =
        solc_mismatch(&artifact, &context.solidity).await
    {
        warn!(
            %solc_version,
            configured = %context.solidity,
            "Artifact was compiled with a different solidity version"
        );
    }

    info!(
        artifact = %artifact.fully_qualified_name(),
        bytecode_len = artifact.bytecode.len(),
        "Resolved contract factory"
    );

    Ok(artifact)
}

/// The compiler version the artifact was built with, if it isn't `configured`
async fn solc_mismatch(
    artifact: &ContractArtifact,
    configured: &str,
) -> Option<String> {
    match artifact.solc_version().await {
        Ok(Some(solc_version)) if solc_version != configured => {
            Some(solc_version)
        }
        Ok(_) => None,
        Err(err) => {
            warn!("Could not read build info: {err:?}");
            None
        }
    }
}
