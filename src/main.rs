// CLI entry point
//
// Invoke-with-no-arguments: configuration comes entirely from LAKESYNC_*
// environment variables and/or a TOML config file. Exit code 0 on full
// success, non-zero on any configuration or registration failure.

use anyhow::Context;
use lakesync_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RuntimeConfig::load().context("failed to load configuration")?;

    lakesync::init::init_tracing(&config);

    if let Err(err) = lakesync::run(&config).await {
        tracing::error!(error = %err, "Partition sync failed");
        return Err(err.into());
    }
    Ok(())
}
