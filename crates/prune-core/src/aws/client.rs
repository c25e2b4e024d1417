use std::collections::BTreeMap;

use async_trait::async_trait;
use aws_sdk_lambda::Client;
use aws_sdk_lambda::config::Region;
use aws_sdk_lambda::config::retry::RetryConfig;
use aws_sdk_lambda::types::AliasConfiguration;
use tracing::{debug, warn};

use crate::api::{
    AliasRouting, AliasSummary, ApiError, ApiErrorKind, FunctionSummary, LambdaApi, Page,
    PageRequest, VersionSummary,
};
use crate::aws::classify::classify;

/// Lambda management API over `aws-sdk-lambda`.
///
/// The SDK's own retry layer is disabled; `Pruner` owns retry and backoff.
#[derive(Clone)]
pub struct AwsLambdaClient {
    client: Client,
}

impl AwsLambdaClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the standard AWS credential and region chain.
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        debug!(
            event = "core.aws.client_configured",
            region = ?sdk_config.region().map(|r| r.as_ref().to_string())
        );

        let lambda_config = aws_sdk_lambda::config::Builder::from(&sdk_config)
            .retry_config(RetryConfig::disabled())
            .build();

        Self::new(Client::from_conf(lambda_config))
    }
}

/// Convert one SDK alias. An alias without a target version is an error:
/// skipping it would drop its version from the retained set.
fn alias_summary(function: &str, alias: &AliasConfiguration) -> Result<AliasSummary, ApiError> {
    let name = alias.name().unwrap_or_default();
    let Some(function_version) = alias.function_version() else {
        warn!(
            event = "core.aws.alias_without_version",
            function = function,
            alias = name
        );
        return Err(ApiError::new(
            "ListAliases",
            ApiErrorKind::InvalidRequest,
            format!("alias '{}' of {} has no function version", name, function),
        ));
    };

    let routing = alias
        .routing_config()
        .and_then(|routing| routing.additional_version_weights())
        .map(|weights| AliasRouting {
            additional_version_weights: weights
                .iter()
                .map(|(version, weight)| (version.clone(), *weight))
                .collect::<BTreeMap<_, _>>(),
        });

    Ok(AliasSummary {
        name: name.to_string(),
        function_version: function_version.to_string(),
        routing,
    })
}

fn max_items(request: &PageRequest) -> i32 {
    i32::try_from(request.page_size).unwrap_or(i32::MAX)
}

#[async_trait]
impl LambdaApi for AwsLambdaClient {
    fn name(&self) -> &'static str {
        "aws"
    }

    async fn list_functions(
        &self,
        request: &PageRequest,
    ) -> Result<Page<FunctionSummary>, ApiError> {
        let output = self
            .client
            .list_functions()
            .set_marker(request.marker.clone())
            .max_items(max_items(request))
            .send()
            .await
            .map_err(|err| classify("ListFunctions", err))?;

        let items = output
            .functions()
            .iter()
            .filter_map(|function| {
                Some(FunctionSummary {
                    name: function.function_name()?.to_string(),
                    arn: function.function_arn()?.to_string(),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    async fn list_versions(
        &self,
        function: &str,
        request: &PageRequest,
    ) -> Result<Page<VersionSummary>, ApiError> {
        let output = self
            .client
            .list_versions_by_function()
            .function_name(function)
            .set_marker(request.marker.clone())
            .max_items(max_items(request))
            .send()
            .await
            .map_err(|err| classify("ListVersionsByFunction", err))?;

        let items = output
            .versions()
            .iter()
            .filter_map(|configuration| configuration.version())
            .map(VersionSummary::new)
            .collect();

        Ok(Page {
            items,
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    async fn list_aliases(
        &self,
        function: &str,
        request: &PageRequest,
    ) -> Result<Page<AliasSummary>, ApiError> {
        let output = self
            .client
            .list_aliases()
            .function_name(function)
            .set_marker(request.marker.clone())
            .max_items(max_items(request))
            .send()
            .await
            .map_err(|err| classify("ListAliases", err))?;

        let items = output
            .aliases()
            .iter()
            .map(|alias| alias_summary(function, alias))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            next_marker: output.next_marker().map(str::to_string),
        })
    }

    async fn delete_version(&self, function: &str, version: &str) -> Result<(), ApiError> {
        self.client
            .delete_function()
            .function_name(function)
            .qualifier(version)
            .send()
            .await
            .map_err(|err| classify("DeleteFunction", err))?;
        Ok(())
    }
}
