//! show command - Print the metadata stored for an artifact

use anyhow::{bail, Context as _, Result};

use super::{load_config, require_complete, runtime, service_config, Context};
use crate::cli::args::CoordinateArgs;
use crate::core::coordinate::{canonical_id, transport_id};
use crate::engine::probe;
use crate::service::nexus::NexusService;
use crate::service::MetadataService;
use crate::ui::output;

/// Read and print an artifact's metadata.
///
/// Like `sync`, nothing is read unless the capability probe passes.
pub fn show(ctx: &Context, coordinate: &CoordinateArgs) -> Result<()> {
    let config = load_config(ctx)?;
    let service_config = service_config(ctx, &config)?;
    require_complete(&service_config)?;

    let service = NexusService::new(&service_config).context("Invalid service configuration")?;
    let artifact_id = canonical_id(&coordinate.to_coordinate());

    runtime()?.block_on(async {
        let report = probe(&service).await;
        if !report.result.is_ready() {
            bail!("{}", report.result);
        }

        let set = service
            .read_metadata(&transport_id(&artifact_id))
            .await
            .with_context(|| format!("Failed to read metadata for {}", artifact_id))?;

        output::print(&artifact_id, ctx.verbosity());
        println!("{}", output::format_metadata(&set));
        Ok(())
    })
}
