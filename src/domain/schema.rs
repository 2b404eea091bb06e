use crate::domain::model::PackageAssociation;
use crate::utils::error::Result;
use crate::utils::validation::validate_non_empty_string;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub required: bool,
    pub computed: bool,
    pub force_new: bool,
}

impl Attribute {
    const fn input(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeKind::String,
            required: true,
            computed: false,
            force_new: true,
        }
    }

    const fn computed(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeKind::String,
            required: false,
            computed: true,
            force_new: false,
        }
    }
}

static ATTRIBUTES: [Attribute; 7] = [
    Attribute::input("domain_name"),
    Attribute::input("package_id"),
    Attribute::computed("domain_package_status"),
    Attribute::computed("package_name"),
    Attribute::computed("package_type"),
    Attribute::computed("package_description"),
    Attribute::computed("reference_path"),
];

pub fn schema() -> &'static [Attribute] {
    &ATTRIBUTES
}

fn input_value<'a>(association: &'a PackageAssociation, name: &str) -> Option<&'a str> {
    match name {
        "domain_name" => Some(&association.domain_name),
        "package_id" => Some(&association.package_id),
        _ => None,
    }
}

/// Checks that every required attribute is set.
pub fn validate(association: &PackageAssociation) -> Result<()> {
    for attribute in schema().iter().filter(|a| a.required) {
        let value = input_value(association, attribute.name).unwrap_or_default();
        validate_non_empty_string(attribute.name, value)?;
    }
    Ok(())
}

/// Both inputs are immutable once the association exists; a change to either
/// means destroy and create.
pub fn requires_replacement(old: &PackageAssociation, new: &PackageAssociation) -> bool {
    schema()
        .iter()
        .filter(|a| a.force_new)
        .any(|a| input_value(old, a.name) != input_value(new, a.name))
}
