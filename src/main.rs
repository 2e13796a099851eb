use clap::Parser;
use cli::Args;
use config::Config;
use deployment::steps::assemble_report::assemble_report;
use ethers::utils::to_checksum;
use report::ContractDeployment;
use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_indicatif::style::ProgressStyle;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub mod artifacts;
pub mod common_keys;
pub mod ethers_utils;
pub mod hardhat_utils;
pub mod serde_utils;

mod cli;
mod config;
mod report;
mod types;

mod deployment;

async fn start() -> eyre::Result<()> {
    let args = Args::parse();

    let private_key =
        config::private_key_from_env(args.private_key.as_deref())?;
    let config = Config::load(args.config.as_deref(), private_key).await?;

    let (context, deployment) =
        deployment::run_deployment(&args, &config).await?;

    println!("{}", deployed_to(&deployment));

    if args.no_report {
        return Ok(());
    }

    // The contract is live at this point, a missing report is not fatal
    match assemble_report(&context, &args.deployments_dir, &deployment).await
    {
        Ok(path) => tracing::info!("Report written to {}", path.display()),
        Err(err) => tracing::warn!("Failed to write report: {err:?}"),
    }

    Ok(())
}

/// The single line a successful run prints to stdout
fn deployed_to(deployment: &ContractDeployment) -> String {
    format!(
        "{} deployed to: {}",
        deployment.contract,
        to_checksum(&deployment.address, None)
    )
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    dotenv::dotenv().ok();

    let indicatif_layer = IndicatifLayer::new().with_progress_style(
        ProgressStyle::with_template("{spinner} {span_name} {span_fields}")?,
    );

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(indicatif_layer.get_stderr_writer())
                .with_filter(filter),
        )
        .with(indicatif_layer)
        .with(ErrorLayer::default())
        .init();

    match start().await {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::error!("{:?}", err);
            std::process::exit(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use ethers::types::{Address, H256};

    use super::*;

    #[test]
    fn deployed_to_prints_checksummed_address() {
        let address: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
            .parse()
            .unwrap();
        let deployment = ContractDeployment {
            contract: "StakingPoolFactory".to_string(),
            address,
            deployer: address,
            transaction_hash: H256::repeat_byte(0xab),
            block_number: Some(7),
        };

        let line = deployed_to(&deployment);

        assert_eq!(
            line,
            "StakingPoolFactory deployed to: 0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
        assert_eq!(line.lines().count(), 1);
    }
}
