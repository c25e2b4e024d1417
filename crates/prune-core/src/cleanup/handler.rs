use tracing::{error, info};

use crate::api::LambdaApi;
use crate::cleanup::errors::CleanupError;
use crate::cleanup::types::{FunctionFailure, FunctionReport, PruneSummary};
use crate::errors::PruneError;
use crate::versions::{DeletionOutcome, Pruner, deletion_set};

/// Compute candidates, retained versions and orphans for one function
/// without deleting anything.
pub async fn plan_function<C: LambdaApi>(
    pruner: &Pruner<C>,
    function: &str,
) -> Result<FunctionReport, CleanupError> {
    let page_delay = pruner.config().page_delay();

    let candidates = pruner
        .list_versions(function, page_delay)
        .await
        .map_err(|source| CleanupError::ListVersionsFailed {
            function: function.to_string(),
            source,
        })?;

    let retained = pruner
        .list_aliased_versions(function, page_delay)
        .await
        .map_err(|source| CleanupError::ListAliasesFailed {
            function: function.to_string(),
            source,
        })?;

    let orphaned = deletion_set(&candidates, &retained);

    info!(
        event = "core.cleanup.function_planned",
        function = function,
        candidates = candidates.len(),
        retained = retained.len(),
        orphaned = orphaned.len()
    );

    Ok(FunctionReport::new(
        function.to_string(),
        candidates,
        retained,
        orphaned,
    ))
}

/// Plan one function, then delete (or, on a dry run, log) each orphaned version.
pub async fn prune_function<C: LambdaApi>(
    pruner: &Pruner<C>,
    function: &str,
) -> Result<FunctionReport, CleanupError> {
    let dry_run = pruner.config().dry_run;
    let mut report = plan_function(pruner, function).await?;

    for version in &report.orphaned {
        let outcome = pruner
            .delete_version(function, version, dry_run)
            .await
            .map_err(|source| CleanupError::DeleteFailed {
                function: function.to_string(),
                version: version.clone(),
                source,
            })?;

        match outcome {
            DeletionOutcome::Deleted => report.deleted.push(version.clone()),
            DeletionOutcome::WouldDelete => report.would_delete.push(version.clone()),
        }
    }

    Ok(report)
}

/// One full pass over every enumerated function, in the enumerator's order.
///
/// The first failure aborts the pass unless `keep_going` is configured, in
/// which case it is recorded in the summary and the next function is processed.
pub async fn prune_all<C: LambdaApi>(pruner: &Pruner<C>) -> Result<PruneSummary, CleanupError> {
    let config = pruner.config();
    info!(
        event = "core.cleanup.run_started",
        dry_run = config.dry_run,
        keep_going = config.keep_going
    );

    let functions = pruner
        .list_functions()
        .await
        .map_err(|source| CleanupError::ListFunctionsFailed { source })?;

    let mut summary = PruneSummary::new(config.dry_run);

    for function in &functions {
        match prune_function(pruner, function).await {
            Ok(report) => summary.add_report(report),
            Err(e) => {
                error!(
                    event = "core.cleanup.function_failed",
                    function = function.as_str(),
                    error_code = e.error_code(),
                    error = %e
                );

                if !config.keep_going {
                    return Err(e);
                }

                summary.add_failure(FunctionFailure {
                    function: function.clone(),
                    error_code: e.error_code(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        event = "core.cleanup.run_completed",
        dry_run = summary.dry_run,
        functions = summary.functions.len(),
        failures = summary.failures.len(),
        orphaned = summary.total_orphaned,
        deleted = summary.total_deleted
    );

    Ok(summary)
}
