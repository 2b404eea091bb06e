use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of the composite identity older state records carry.
pub const LEGACY_ID_PREFIX: &str = "association-";

/// Filter name the package catalog understands for lookups by id.
pub const PACKAGE_ID_FILTER: &str = "PackageID";

/// Local record of one package-to-domain association.
///
/// `id` is `None` while the association is absent; every other computed
/// attribute is whatever the remote side reported on the last create or read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageAssociation {
    pub id: Option<String>,
    pub domain_name: String,
    pub package_id: String,
    pub domain_package_status: Option<String>,
    pub package_name: Option<String>,
    pub package_type: Option<String>,
    pub package_description: Option<String>,
    pub reference_path: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationPhase {
    Absent,
    Associated,
}

impl PackageAssociation {
    pub fn new(domain_name: impl Into<String>, package_id: impl Into<String>) -> Self {
        Self {
            domain_name: domain_name.into(),
            package_id: package_id.into(),
            ..Default::default()
        }
    }

    pub fn phase(&self) -> AssociationPhase {
        match self.id {
            Some(_) => AssociationPhase::Associated,
            None => AssociationPhase::Absent,
        }
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Drops the identity, marking the association as gone. Configured
    /// attributes stay so the record can be recreated.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Package id to query the catalog with.
    ///
    /// Identities written as `association-<domain>-<package_id>` are reduced
    /// to the package id. Anything else is already a raw package id.
    pub fn lookup_package_id(&self) -> Option<&str> {
        let id = self.id.as_deref()?;
        let legacy_prefix = legacy_association_id(&self.domain_name, "");
        match id.strip_prefix(legacy_prefix.as_str()) {
            Some(package_id) if !package_id.is_empty() => Some(package_id),
            _ => Some(id),
        }
    }

    /// True while the identity is still in the composite form and has not
    /// been re-keyed by a read.
    pub fn has_legacy_id(&self) -> bool {
        self.id.as_deref() != self.lookup_package_id()
    }
}

/// Builds the composite identity older records were keyed by.
pub fn legacy_association_id(domain_name: &str, package_id: &str) -> String {
    format!("{}{}-{}", LEGACY_ID_PREFIX, domain_name, package_id)
}

/// Association record as returned by the associate call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainPackageDetails {
    pub domain_name: Option<String>,
    pub package_id: Option<String>,
    pub package_name: Option<String>,
    pub package_type: Option<String>,
    pub domain_package_status: Option<String>,
    pub reference_path: Option<String>,
    pub error_details: Option<String>,
}

/// One entry of the package catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDetails {
    pub package_id: Option<String>,
    pub package_name: Option<String>,
    pub package_type: Option<String>,
    pub package_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribePackagesFilter {
    pub name: String,
    pub values: Vec<String>,
}

impl DescribePackagesFilter {
    pub fn package_id(package_id: impl Into<String>) -> Self {
        Self {
            name: PACKAGE_ID_FILTER.to_string(),
            values: vec![package_id.into()],
        }
    }
}

/// `None` mirrors a response body the SDK could not give us at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescribePackagesOutput {
    pub package_details_list: Option<Vec<PackageDetails>>,
}

impl DescribePackagesOutput {
    pub fn count(&self) -> usize {
        self.package_details_list.as_ref().map_or(0, Vec::len)
    }
}
