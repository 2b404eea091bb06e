#[cfg(feature = "aws")]
use crate::config::toml_config::ProviderSection;
#[cfg(feature = "aws")]
use crate::domain::model::{
    DescribePackagesFilter, DescribePackagesOutput, DomainPackageDetails, PackageDetails,
};
#[cfg(feature = "aws")]
use crate::domain::ports::PackageApi;
#[cfg(feature = "aws")]
use crate::utils::error::ApiError;
#[cfg(feature = "aws")]
use async_trait::async_trait;
#[cfg(feature = "aws")]
use aws_config::BehaviorVersion;
#[cfg(feature = "aws")]
use aws_sdk_opensearch::config::Region;
#[cfg(feature = "aws")]
use aws_sdk_opensearch::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
#[cfg(feature = "aws")]
use aws_sdk_opensearch::types as sdk;
#[cfg(feature = "aws")]
use aws_sdk_opensearch::Client as OpenSearchClient;

/// [`PackageApi`] backed by the Amazon OpenSearch Service control plane.
#[cfg(feature = "aws")]
#[derive(Debug, Clone)]
pub struct OpenSearchPackageApi {
    client: OpenSearchClient,
}

#[cfg(feature = "aws")]
impl OpenSearchPackageApi {
    pub fn new(client: OpenSearchClient) -> Self {
        Self { client }
    }

    /// Builds a client from the SDK's default credential chain, with optional
    /// region, profile and endpoint overrides.
    pub async fn from_provider_config(provider: &ProviderSection) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &provider.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &provider.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_opensearch::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &provider.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        tracing::debug!(
            region = ?sdk_config.region(),
            endpoint_url = ?provider.endpoint_url,
            "Built OpenSearch client"
        );

        Self::new(OpenSearchClient::from_conf(builder.build()))
    }
}

#[cfg(feature = "aws")]
fn api_error<E, R>(err: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match err.code() {
        Some(ApiError::NOT_FOUND_CODE) => ApiError::not_found(err.message().unwrap_or_default()),
        Some(code) => ApiError::service(code, err.message().unwrap_or_default()),
        None => ApiError::transport(DisplayErrorContext(&err).to_string()),
    }
}

#[cfg(feature = "aws")]
fn domain_package_details(details: &sdk::DomainPackageDetails) -> DomainPackageDetails {
    DomainPackageDetails {
        domain_name: details.domain_name().map(str::to_string),
        package_id: details.package_id().map(str::to_string),
        package_name: details.package_name().map(str::to_string),
        package_type: details.package_type().map(|t| t.as_str().to_string()),
        domain_package_status: details
            .domain_package_status()
            .map(|s| s.as_str().to_string()),
        reference_path: details.reference_path().map(str::to_string),
        error_details: details.error_details().map(|e| {
            format!(
                "{}: {}",
                e.error_type().unwrap_or_default(),
                e.error_message().unwrap_or_default()
            )
        }),
    }
}

#[cfg(feature = "aws")]
fn package_details(details: &sdk::PackageDetails) -> PackageDetails {
    PackageDetails {
        package_id: details.package_id().map(str::to_string),
        package_name: details.package_name().map(str::to_string),
        package_type: details.package_type().map(|t| t.as_str().to_string()),
        package_description: details.package_description().map(str::to_string),
    }
}

#[cfg(feature = "aws")]
fn sdk_filter(filter: DescribePackagesFilter) -> sdk::DescribePackagesFilter {
    sdk::DescribePackagesFilter::builder()
        .name(sdk::DescribePackagesFilterName::from(filter.name.as_str()))
        .set_value(Some(filter.values))
        .build()
}

#[cfg(feature = "aws")]
#[async_trait]
impl PackageApi for OpenSearchPackageApi {
    async fn associate_package(
        &self,
        domain_name: &str,
        package_id: &str,
    ) -> Result<Option<DomainPackageDetails>, ApiError> {
        let output = self
            .client
            .associate_package()
            .domain_name(domain_name)
            .package_id(package_id)
            .send()
            .await
            .map_err(api_error)?;

        Ok(output.domain_package_details().map(domain_package_details))
    }

    async fn describe_packages(
        &self,
        filters: Vec<DescribePackagesFilter>,
    ) -> Result<Option<DescribePackagesOutput>, ApiError> {
        let output = self
            .client
            .describe_packages()
            .set_filters(Some(filters.into_iter().map(sdk_filter).collect()))
            .send()
            .await
            .map_err(api_error)?;

        Ok(Some(DescribePackagesOutput {
            package_details_list: Some(
                output
                    .package_details_list()
                    .iter()
                    .map(package_details)
                    .collect(),
            ),
        }))
    }

    async fn delete_package(&self, package_id: &str) -> Result<(), ApiError> {
        self.client
            .delete_package()
            .package_id(package_id)
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn dissociate_package(
        &self,
        package_id: &str,
        domain_name: &str,
    ) -> Result<Option<DomainPackageDetails>, ApiError> {
        let output = self
            .client
            .dissociate_package()
            .package_id(package_id)
            .domain_name(domain_name)
            .send()
            .await
            .map_err(api_error)?;

        Ok(output.domain_package_details().map(domain_package_details))
    }
}
