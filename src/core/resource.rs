use crate::domain::model::{DescribePackagesFilter, PackageAssociation, PackageDetails};
use crate::domain::ports::PackageApi;
use crate::domain::schema;
use crate::utils::error::{ApiError, AssociationError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What destroying the resource does on the remote side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteBehavior {
    /// Delete the package definition itself, detaching it from every domain.
    #[default]
    DeletePackage,
    /// Remove only the link between this package and this domain.
    Dissociate,
}

/// Lifecycle operations for the package association resource.
///
/// The API client is handed in on every call; the resource holds no
/// connection of its own.
#[derive(Debug, Clone, Default)]
pub struct PackageAssociationResource {
    delete_behavior: DeleteBehavior,
}

impl PackageAssociationResource {
    pub fn new(delete_behavior: DeleteBehavior) -> Self {
        Self { delete_behavior }
    }

    pub fn delete_behavior(&self) -> DeleteBehavior {
        self.delete_behavior
    }

    /// Associates `state.package_id` with `state.domain_name`, then reads the
    /// package back to fill the computed attributes.
    pub async fn create<C>(&self, client: &C, state: &mut PackageAssociation) -> Result<()>
    where
        C: PackageApi + ?Sized,
    {
        schema::validate(state)?;

        let domain_name = state.domain_name.clone();
        let package_id = state.package_id.clone();

        tracing::info!(
            domain_name = %domain_name,
            package_id = %package_id,
            "Associating package with domain"
        );

        let details = client
            .associate_package(&domain_name, &package_id)
            .await
            .map_err(|source| AssociationError::AssociateError {
                package_id: package_id.clone(),
                domain_name: domain_name.clone(),
                source,
            })?
            .ok_or_else(|| AssociationError::MissingAssociationDetails {
                package_id: package_id.clone(),
            })?;

        tracing::debug!(?details, "Received association details");
        if let Some(error_details) = &details.error_details {
            tracing::warn!(
                package_id = %package_id,
                domain_name = %domain_name,
                "Association reported an error: {}",
                error_details
            );
        }

        state.set_id(details.package_id.clone().unwrap_or(package_id));
        state.domain_package_status = details.domain_package_status;
        state.reference_path = details.reference_path;

        self.read(client, state).await
    }

    /// Refreshes computed attributes from the package catalog. A package the
    /// catalog no longer knows clears the identity instead of failing.
    pub async fn read<C>(&self, client: &C, state: &mut PackageAssociation) -> Result<()>
    where
        C: PackageApi + ?Sized,
    {
        let Some(package_id) = state.lookup_package_id().map(str::to_string) else {
            tracing::debug!("Package association has no identity, nothing to read");
            return Ok(());
        };

        let output = match client
            .describe_packages(vec![DescribePackagesFilter::package_id(&package_id)])
            .await
        {
            Ok(output) => output,
            Err(err) if err.is_not_found() => {
                tracing::warn!("Package ({}) not found, removing", package_id);
                state.clear_id();
                return Ok(());
            }
            Err(source) => {
                return Err(AssociationError::DescribeError { package_id, source });
            }
        };

        tracing::debug!(?output, "Received package catalog response");

        match output.as_ref().map_or(0, |o| o.count()) {
            0 => {
                tracing::warn!("Package ({}) not found, removing from state", package_id);
                state.clear_id();
                return Ok(());
            }
            1 => {}
            count => return Err(AssociationError::UnexpectedPackageCount { count }),
        }

        let details = match get_package_association(client, &package_id).await {
            Ok(Some(details)) => details,
            Ok(None) => {
                tracing::warn!("Package ({}) not found, removing from state", package_id);
                state.clear_id();
                return Ok(());
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!("Package ({}) not found, removing from state", package_id);
                state.clear_id();
                return Ok(());
            }
            Err(source) => return Err(AssociationError::ReadError { source }),
        };

        state.set_id(details.package_id.unwrap_or(package_id));
        state.package_name = details.package_name;
        state.package_description = details.package_description;
        state.package_type = details.package_type;
        state.last_refreshed = Some(Utc::now());

        Ok(())
    }

    /// Destroys the association according to the configured
    /// [`DeleteBehavior`] and clears the identity on success. Not-found is
    /// reported like any other failure.
    pub async fn delete<C>(&self, client: &C, state: &mut PackageAssociation) -> Result<()>
    where
        C: PackageApi + ?Sized,
    {
        let Some(id) = state.id.clone() else {
            return Err(AssociationError::MissingIdentity);
        };

        match self.delete_behavior {
            DeleteBehavior::DeletePackage => {
                tracing::info!(package_id = %id, "Deleting package");
                client
                    .delete_package(&id)
                    .await
                    .map_err(|source| AssociationError::DeleteError {
                        package_id: id.clone(),
                        source,
                    })?;
            }
            DeleteBehavior::Dissociate => {
                let package_id = state.lookup_package_id().unwrap_or(id.as_str()).to_string();
                let domain_name = state.domain_name.clone();
                tracing::info!(
                    package_id = %package_id,
                    domain_name = %domain_name,
                    "Dissociating package from domain"
                );
                client
                    .dissociate_package(&package_id, &domain_name)
                    .await
                    .map_err(|source| AssociationError::DissociateError {
                        package_id: package_id.clone(),
                        domain_name: domain_name.clone(),
                        source,
                    })?;
            }
        }

        state.clear_id();
        Ok(())
    }
}

async fn get_package_association<C>(
    client: &C,
    package_id: &str,
) -> std::result::Result<Option<PackageDetails>, ApiError>
where
    C: PackageApi + ?Sized,
{
    let output = client
        .describe_packages(vec![DescribePackagesFilter::package_id(package_id)])
        .await?;

    Ok(output
        .and_then(|o| o.package_details_list)
        .and_then(|list| list.into_iter().next()))
}
