//! sync command - Upsert one metadata entry on an artifact

use anyhow::{bail, Result};

use super::{load_config, runtime, service_config, setup_hint, Context};
use crate::cli::args::CoordinateArgs;
use crate::core::types::check_field;
use crate::engine::{synchronize, SyncFailure, SyncRequest, SyncResult};
use crate::ui::output::{self, ConsoleSink, Verbosity};

/// Run a synchronization and report its outcome.
///
/// Returns an error (non-zero exit) when the synchronization was aborted.
pub fn sync(ctx: &Context, coordinate: &CoordinateArgs, key: &str, value: &str) -> Result<()> {
    let verbosity = ctx.verbosity();

    let key_ok = output::report_field_check(&check_field("key", key), verbosity);
    let value_ok = output::report_field_check(&check_field("value", value), verbosity);
    if !key_ok || !value_ok {
        bail!("Invalid metadata entry.");
    }

    let config = load_config(ctx)?;
    let service = service_config(ctx, &config)?;
    let request = SyncRequest::new(coordinate.to_coordinate(), key, value);

    let mut sink = ConsoleSink::new(verbosity);
    let result = runtime()?.block_on(synchronize(&request, &service, &mut sink));

    report(&request, &result, verbosity)
}

fn report(request: &SyncRequest, result: &SyncResult, verbosity: Verbosity) -> Result<()> {
    for warning in &result.warnings {
        output::warn(warning, verbosity);
    }

    let failure = match &result.failure {
        None => {
            output::success(
                format!(
                    "Set {}={} on {}.",
                    request.key, request.value, result.artifact_id
                ),
                verbosity,
            );
            output::debug(
                format!("stored metadata: {}", result.after.summary()),
                verbosity,
            );
            return Ok(());
        }
        Some(failure) => failure,
    };

    if let SyncFailure::ConfigIncomplete(missing) = failure {
        output::print(setup_hint(missing), verbosity);
    }

    let operation = result.attempted_operation().unwrap_or("synchronization");
    Err(anyhow::Error::new(failure.clone()).context(format!(
        "{} failed for {}",
        operation, result.artifact_id
    )))
}
