use std::time::Duration;

use prune_config::PruneConfig;
use tracing::{debug, info, warn};

use crate::api::{ApiError, ApiErrorKind, LATEST_VERSION, LambdaApi, PageRequest};
use crate::retry::{RetryPolicy, collect_pages, retry_async};
use crate::versions::operations;
use crate::versions::types::DeletionOutcome;

/// The four retry-wrapped, paginated operations over one `LambdaApi` backend.
///
/// Calls are strictly sequential: one page, one attempt at a time.
pub struct Pruner<C> {
    client: C,
    config: PruneConfig,
    policy: RetryPolicy,
}

impl<C: LambdaApi> Pruner<C> {
    pub fn new(client: C, config: PruneConfig) -> Self {
        let policy = RetryPolicy::from(&config.retry);
        Self {
            client,
            config,
            policy,
        }
    }

    pub fn config(&self) -> &PruneConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// ARNs of every function matching the configured prefix, in random order.
    pub async fn list_functions(&self) -> Result<Vec<String>, ApiError> {
        info!(
            event = "core.functions.list_started",
            backend = self.client.name(),
            prefix = ?self.config.name_prefix()
        );

        let client = &self.client;
        let policy = &self.policy;
        let page_size = self.config.page_size;

        let functions = collect_pages(Duration::ZERO, |marker| {
            let request = PageRequest::new(marker, page_size);
            async move {
                retry_async(
                    policy,
                    || client.list_functions(&request),
                    |err, retry| {
                        warn!(
                            event = "core.functions.list_retrying",
                            retry = retry,
                            marker = ?request.marker,
                            error = %err
                        );
                    },
                )
                .await
            }
        })
        .await?;

        let mut arns = operations::filter_by_prefix(functions, self.config.name_prefix());
        operations::shuffle(&mut arns, &mut rand::thread_rng());

        info!(event = "core.functions.list_completed", count = arns.len());

        Ok(arns)
    }

    /// Every published version of `function`, `$LATEST` excluded.
    ///
    /// Sleeps `page_delay` before each page request.
    pub async fn list_versions(
        &self,
        function: &str,
        page_delay: Duration,
    ) -> Result<Vec<String>, ApiError> {
        debug!(event = "core.versions.list_started", function = function);

        let client = &self.client;
        let policy = &self.policy;
        let page_size = self.config.page_size;

        let versions = collect_pages(page_delay, |marker| {
            let request = PageRequest::new(marker, page_size);
            async move {
                retry_async(
                    policy,
                    || client.list_versions(function, &request),
                    |err, retry| {
                        warn!(
                            event = "core.versions.list_retrying",
                            function = function,
                            retry = retry,
                            error = %err
                        );
                    },
                )
                .await
            }
        })
        .await?;

        let versions = operations::published_versions(versions);

        debug!(
            event = "core.versions.list_completed",
            function = function,
            count = versions.len(),
            versions = %versions.join(",")
        );

        Ok(versions)
    }

    /// Deduplicated versions referenced by any alias of `function`, weighted
    /// routing targets included.
    ///
    /// Sleeps `page_delay` before each page request.
    pub async fn list_aliased_versions(
        &self,
        function: &str,
        page_delay: Duration,
    ) -> Result<Vec<String>, ApiError> {
        debug!(event = "core.aliases.list_started", function = function);

        let client = &self.client;
        let policy = &self.policy;
        let page_size = self.config.page_size;

        let aliases = collect_pages(page_delay, |marker| {
            let request = PageRequest::new(marker, page_size);
            async move {
                retry_async(
                    policy,
                    || client.list_aliases(function, &request),
                    |err, retry| {
                        warn!(
                            event = "core.aliases.list_retrying",
                            function = function,
                            retry = retry,
                            error = %err
                        );
                    },
                )
                .await
            }
        })
        .await?;

        let versions = operations::referenced_versions(&aliases);

        debug!(
            event = "core.aliases.list_completed",
            function = function,
            aliases = aliases.len(),
            count = versions.len(),
            versions = %versions.join(",")
        );

        Ok(versions)
    }

    /// Delete one version, or only log it when `dry_run` is set.
    ///
    /// `$LATEST` is refused before any call is made.
    pub async fn delete_version(
        &self,
        function: &str,
        version: &str,
        dry_run: bool,
    ) -> Result<DeletionOutcome, ApiError> {
        if version == LATEST_VERSION {
            return Err(ApiError::new(
                "DeleteFunction",
                ApiErrorKind::InvalidRequest,
                format!("refusing to delete {} of {}", LATEST_VERSION, function),
            ));
        }

        if dry_run {
            info!(
                event = "core.versions.would_delete",
                function = function,
                version = version,
                "Would Delete {}:{}",
                function,
                version
            );
            return Ok(DeletionOutcome::WouldDelete);
        }

        info!(
            event = "core.versions.delete_started",
            function = function,
            version = version
        );

        retry_async(
            &self.policy,
            || self.client.delete_version(function, version),
            |err, retry| {
                warn!(
                    event = "core.versions.delete_retrying",
                    function = function,
                    version = version,
                    retry = retry,
                    error = %err
                );
            },
        )
        .await?;

        info!(
            event = "core.versions.delete_completed",
            function = function,
            version = version
        );

        Ok(DeletionOutcome::Deleted)
    }
}
