#![allow(dead_code)]

use async_trait::async_trait;
use search_package_assoc::core::{PackageApi, PackageDetails};
use search_package_assoc::domain::model::{
    DescribePackagesFilter, DescribePackagesOutput, DomainPackageDetails,
};
use search_package_assoc::ApiError;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Associate {
        domain_name: String,
        package_id: String,
    },
    Describe {
        values: Vec<String>,
    },
    Delete {
        package_id: String,
    },
    Dissociate {
        package_id: String,
        domain_name: String,
    },
}

/// In-memory package catalog that records every call made against it.
pub struct FakePackageApi {
    packages: Mutex<HashMap<String, PackageDetails>>,
    associations: Mutex<Vec<(String, String)>>,
    calls: Mutex<Vec<Call>>,
    describe_override: Mutex<Option<Result<Option<DescribePackagesOutput>, ApiError>>>,
    associate_error: Mutex<Option<ApiError>>,
    missing_as_not_found: bool,
}

impl FakePackageApi {
    /// Unknown package ids fail with `ResourceNotFoundException`.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Unknown package ids yield an empty result list.
    pub fn with_empty_results_for_missing() -> Self {
        Self::build(false)
    }

    fn build(missing_as_not_found: bool) -> Self {
        Self {
            packages: Mutex::new(HashMap::new()),
            associations: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            describe_override: Mutex::new(None),
            associate_error: Mutex::new(None),
            missing_as_not_found,
        }
    }

    pub fn with_package(self, package_id: &str, name: &str, package_type: &str) -> Self {
        self.packages.lock().expect("poisoned mutex").insert(
            package_id.to_string(),
            PackageDetails {
                package_id: Some(package_id.to_string()),
                package_name: Some(name.to_string()),
                package_type: Some(package_type.to_string()),
                package_description: Some(format!("{} description", name)),
            },
        );
        self
    }

    pub fn override_describe(&self, response: Result<Option<DescribePackagesOutput>, ApiError>) {
        *self.describe_override.lock().expect("poisoned mutex") = Some(response);
    }

    pub fn fail_associate(&self, error: ApiError) {
        *self.associate_error.lock().expect("poisoned mutex") = Some(error);
    }

    pub fn remove_package(&self, package_id: &str) {
        self.packages
            .lock()
            .expect("poisoned mutex")
            .remove(package_id);
    }

    pub fn has_package(&self, package_id: &str) -> bool {
        self.packages
            .lock()
            .expect("poisoned mutex")
            .contains_key(package_id)
    }

    pub fn is_associated(&self, domain_name: &str, package_id: &str) -> bool {
        self.associations
            .lock()
            .expect("poisoned mutex")
            .iter()
            .any(|(d, p)| d == domain_name && p == package_id)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn describe_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Describe { values } => Some(values),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("poisoned mutex").push(call);
    }
}

#[async_trait]
impl PackageApi for FakePackageApi {
    async fn associate_package(
        &self,
        domain_name: &str,
        package_id: &str,
    ) -> Result<Option<DomainPackageDetails>, ApiError> {
        self.record(Call::Associate {
            domain_name: domain_name.to_string(),
            package_id: package_id.to_string(),
        });

        if let Some(error) = self.associate_error.lock().expect("poisoned mutex").clone() {
            return Err(error);
        }

        let package = self
            .packages
            .lock()
            .expect("poisoned mutex")
            .get(package_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("Package {} not found", package_id)))?;

        self.associations
            .lock()
            .expect("poisoned mutex")
            .push((domain_name.to_string(), package_id.to_string()));

        Ok(Some(DomainPackageDetails {
            domain_name: Some(domain_name.to_string()),
            package_id: Some(package_id.to_string()),
            package_name: package.package_name,
            package_type: package.package_type,
            domain_package_status: Some("ASSOCIATING".to_string()),
            reference_path: Some(format!("analyzers/{}", package_id)),
            error_details: None,
        }))
    }

    async fn describe_packages(
        &self,
        filters: Vec<DescribePackagesFilter>,
    ) -> Result<Option<DescribePackagesOutput>, ApiError> {
        let values: Vec<String> = filters
            .iter()
            .filter(|f| f.name == "PackageID")
            .flat_map(|f| f.values.clone())
            .collect();
        self.record(Call::Describe {
            values: values.clone(),
        });

        if let Some(response) = self.describe_override.lock().expect("poisoned mutex").clone() {
            return response;
        }

        let packages = self.packages.lock().expect("poisoned mutex");
        let found: Vec<PackageDetails> = values
            .iter()
            .filter_map(|id| packages.get(id).cloned())
            .collect();

        if found.is_empty() && self.missing_as_not_found {
            return Err(ApiError::not_found("Package not found"));
        }

        Ok(Some(DescribePackagesOutput {
            package_details_list: Some(found),
        }))
    }

    async fn delete_package(&self, package_id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete {
            package_id: package_id.to_string(),
        });

        match self
            .packages
            .lock()
            .expect("poisoned mutex")
            .remove(package_id)
        {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(format!(
                "Package {} not found",
                package_id
            ))),
        }
    }

    async fn dissociate_package(
        &self,
        package_id: &str,
        domain_name: &str,
    ) -> Result<Option<DomainPackageDetails>, ApiError> {
        self.record(Call::Dissociate {
            package_id: package_id.to_string(),
            domain_name: domain_name.to_string(),
        });

        let mut associations = self.associations.lock().expect("poisoned mutex");
        let before = associations.len();
        associations.retain(|(d, p)| !(d == domain_name && p == package_id));
        if associations.len() == before {
            return Err(ApiError::not_found("Association not found"));
        }

        Ok(Some(DomainPackageDetails {
            domain_name: Some(domain_name.to_string()),
            package_id: Some(package_id.to_string()),
            domain_package_status: Some("DISSOCIATING".to_string()),
            ..Default::default()
        }))
    }
}
