use crate::domain::model::{
    DescribePackagesFilter, DescribePackagesOutput, DomainPackageDetails, PackageAssociation,
};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;

/// Control-plane operations the association resource consumes.
///
/// Implementations report a missing package or domain as
/// [`ApiError::NotFound`]; the lifecycle code branches on it.
#[async_trait]
pub trait PackageApi: Send + Sync {
    async fn associate_package(
        &self,
        domain_name: &str,
        package_id: &str,
    ) -> std::result::Result<Option<DomainPackageDetails>, ApiError>;

    async fn describe_packages(
        &self,
        filters: Vec<DescribePackagesFilter>,
    ) -> std::result::Result<Option<DescribePackagesOutput>, ApiError>;

    async fn delete_package(&self, package_id: &str) -> std::result::Result<(), ApiError>;

    async fn dissociate_package(
        &self,
        package_id: &str,
        domain_name: &str,
    ) -> std::result::Result<Option<DomainPackageDetails>, ApiError>;
}

pub trait StateStore: Send + Sync {
    fn load(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<PackageAssociation>>> + Send;
    fn save(
        &self,
        state: &PackageAssociation,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}
