//! check command - Test the connection and the service capabilities

use anyhow::{bail, Context as _, Result};

use super::{load_config, require_complete, runtime, service_config, Context};
use crate::engine::{probe, test_connection, ConnectionCheck};
use crate::service::nexus::NexusService;
use crate::ui::output;

/// Verify credentials, then the metadata plugin and edition.
pub fn check(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    let config = load_config(ctx)?;
    let service_config = service_config(ctx, &config)?;
    require_complete(&service_config)?;

    let service = NexusService::new(&service_config).context("Invalid service configuration")?;

    runtime()?.block_on(async {
        match test_connection(&service).await {
            ConnectionCheck::Verified => output::success(
                format!(
                    "Success. Connection with Nexus Repository at {} verified.",
                    service.base_url()
                ),
                verbosity,
            ),
            ConnectionCheck::Failed(reason) => bail!("Failed. {}", reason),
        }

        let report = probe(&service).await;
        if let Some(version) = &report.version {
            output::print(format!("Nexus version: {}", version), verbosity);
        }
        if !report.result.is_ready() {
            bail!("{}", report.result);
        }
        output::success("Custom metadata plugin and Professional edition found.", verbosity);
        Ok(())
    })
}
